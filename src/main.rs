use std::fs;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use journey_api::services::pdf_service;
use journey_api::{routes, AppState};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8000;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Journey API starting...");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let temp_dir = pdf_service::temp_storage_dir();
    if let Err(err) = fs::create_dir_all(&temp_dir) {
        eprintln!(
            "Could not create temp storage dir {}: {}",
            temp_dir.display(),
            err
        );
    }

    let state = AppState::from_env();

    println!("Attempting to bind to {}:{}", host, port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost")
            .allowed_origin("http://localhost:5173")
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
