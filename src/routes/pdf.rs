use actix_web::{web, HttpResponse, Responder};
use regex::Regex;
use std::fs;

use crate::models::chat::PdfRequest;
use crate::services::pdf_service;

/*
    POST /download-pdf
*/
pub async fn download_pdf(input: web::Json<PdfRequest>) -> impl Responder {
    match pdf_service::create_pdf_from_itinerary(&input.markdown_text) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"itinerary.pdf\"",
            ))
            .body(bytes),
        Err(err) => {
            eprintln!("Failed to render PDF: {}", err);
            HttpResponse::InternalServerError().body("Failed to render the itinerary PDF")
        }
    }
}

/*
    GET /temp/{filename}

    Serves transient itinerary PDFs so the email capability can reference
    them by public URL. Only uuid-named PDFs are reachable.
*/
pub async fn serve_temp_file(path: web::Path<String>) -> impl Responder {
    let filename = path.into_inner();

    let pattern = Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\.pdf$")
        .expect("temp filename pattern is valid");
    if !pattern.is_match(&filename) {
        return HttpResponse::BadRequest().body("Invalid file name");
    }

    match fs::read(pdf_service::temp_storage_dir().join(&filename)) {
        Ok(bytes) => HttpResponse::Ok().content_type("application/pdf").body(bytes),
        Err(_) => HttpResponse::NotFound().body("File not found"),
    }
}
