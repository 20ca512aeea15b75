pub mod chat;
pub mod email;
pub mod features;
pub mod health;
pub mod pdf;

use actix_web::web;

/// Route table, shared by the binary and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .route("/chat", web::post().to(chat::chat))
        .route("/download-pdf", web::post().to(pdf::download_pdf))
        .route("/send-email", web::post().to(email::send_email))
        .route("/find-flights", web::post().to(features::find_flights))
        .route("/find-hotels", web::post().to(features::find_hotels))
        .route(
            "/find-youtube-vlogs",
            web::post().to(features::find_youtube_vlogs),
        )
        .route("/find-places", web::post().to(features::find_places))
        .route("/get-weather", web::post().to(features::get_weather))
        .route(
            "/add-calendar-event",
            web::post().to(features::add_calendar_event),
        )
        .route("/temp/{filename}", web::get().to(pdf::serve_temp_file));
}
