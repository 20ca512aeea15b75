use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::chat::{ChatRequest, ItineraryResponse};
use crate::services::itinerary_service::{self, PipelineError};
use crate::AppState;

/*
    POST /chat
*/
pub async fn chat(data: web::Data<AppState>, input: web::Json<ChatRequest>) -> impl Responder {
    let request = input.into_inner();
    let Some(prompt) = request.prompt_text().map(str::to_string) else {
        return HttpResponse::BadRequest().json(json!({ "error": "Prompt is missing" }));
    };

    match itinerary_service::generate_itinerary(&data, &request, &prompt).await {
        Ok(itinerary) => HttpResponse::Ok().json(ItineraryResponse { itinerary }),
        Err(err @ PipelineError::NothingToResearch) => {
            HttpResponse::UnprocessableEntity().json(json!({ "error": err.to_string() }))
        }
        Err(err) => {
            eprintln!("Itinerary pipeline failed: {}", err);
            HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }))
        }
    }
}
