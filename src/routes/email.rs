use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::chat::{EmailRequest, MessageResponse};
use crate::services::email_service::{self, EmailError};
use crate::AppState;

/*
    POST /send-email
*/
pub async fn send_email(data: web::Data<AppState>, input: web::Json<EmailRequest>) -> impl Responder {
    if input.email.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "Email address is missing" }));
    }

    match email_service::send_itinerary_email(&data.tools, &input.email, &input.markdown_text).await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: format!("Itinerary emailed to {}", input.email),
        }),
        Err(err @ EmailError::NotConfigured(_)) => {
            eprintln!("Email send rejected: {}", err);
            HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }))
        }
        Err(err) => {
            eprintln!("Email send failed: {}", err);
            HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }))
        }
    }
}
