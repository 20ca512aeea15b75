use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, String>,
    version: String,
}

/*
    GET /health
*/
pub async fn health_check(data: web::Data<AppState>) -> impl Responder {
    let mut services = HashMap::new();
    services.insert(
        "llm".to_string(),
        if data.llm.is_some() {
            "initialized".to_string()
        } else {
            "unavailable".to_string()
        },
    );
    services.insert(
        "email".to_string(),
        if env::var("PUBLIC_BASE_URL").is_ok() {
            "configured".to_string()
        } else {
            "unconfigured".to_string()
        },
    );

    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        services,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
