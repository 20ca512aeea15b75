use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDateTime;
use serde_json::json;

use crate::models::chat::{
    CalendarEventRequest, FlightRequest, HotelRequest, PlacesRequest, ResearchResponse,
    WeatherRequest, YoutubeRequest,
};
use crate::services::calendar_service;
use crate::services::executor::{flight_search_query, hotel_search_query, DEFAULT_ORIGIN};
use crate::tools::ToolError;
use crate::AppState;

fn tool_failure(context: &str, err: ToolError) -> HttpResponse {
    eprintln!("{} failed: {}", context, err);
    HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }))
}

/*
    POST /find-flights
*/
pub async fn find_flights(data: web::Data<AppState>, input: web::Json<FlightRequest>) -> impl Responder {
    let origin = if input.origin.trim().is_empty() {
        DEFAULT_ORIGIN
    } else {
        input.origin.trim()
    };
    let query = flight_search_query(origin, &input.destination, &input.dates);

    match data.tools.invoke("search", json!({ "query": query })).await {
        Ok(result) => HttpResponse::Ok().json(ResearchResponse { result }),
        Err(err) => tool_failure("Flight search", err),
    }
}

/*
    POST /find-hotels
*/
pub async fn find_hotels(data: web::Data<AppState>, input: web::Json<HotelRequest>) -> impl Responder {
    let query = hotel_search_query(&input.destination, &input.dates, input.guests.max(1));

    match data.tools.invoke("search", json!({ "query": query })).await {
        Ok(result) => HttpResponse::Ok().json(ResearchResponse { result }),
        Err(err) => tool_failure("Hotel search", err),
    }
}

/*
    POST /find-youtube-vlogs
*/
pub async fn find_youtube_vlogs(
    data: web::Data<AppState>,
    input: web::Json<YoutubeRequest>,
) -> impl Responder {
    match data
        .tools
        .invoke("find_video", json!({ "topic": input.topic }))
        .await
    {
        Ok(result) => HttpResponse::Ok().json(ResearchResponse { result }),
        Err(err) => tool_failure("Video search", err),
    }
}

/*
    POST /find-places
*/
pub async fn find_places(data: web::Data<AppState>, input: web::Json<PlacesRequest>) -> impl Responder {
    match data
        .tools
        .invoke("find_place_details", json!({ "query": input.query }))
        .await
    {
        Ok(result) => HttpResponse::Ok().json(ResearchResponse { result }),
        Err(err) => tool_failure("Place lookup", err),
    }
}

/*
    POST /get-weather
*/
pub async fn get_weather(data: web::Data<AppState>, input: web::Json<WeatherRequest>) -> impl Responder {
    match data
        .tools
        .invoke("get_weather", json!({ "destination": input.destination }))
        .await
    {
        Ok(result) => HttpResponse::Ok().json(ResearchResponse { result }),
        Err(err) => tool_failure("Weather lookup", err),
    }
}

/*
    POST /add-calendar-event
*/
pub async fn add_calendar_event(
    data: web::Data<AppState>,
    input: web::Json<CalendarEventRequest>,
) -> impl Responder {
    for (label, value) in [("start_time", &input.start_time), ("end_time", &input.end_time)] {
        if NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_err() {
            return HttpResponse::BadRequest().json(json!({
                "error": format!("{} must be ISO formatted, e.g. 2024-09-20T20:00:00", label)
            }));
        }
    }

    match calendar_service::add_event_to_calendar(
        &data.tools,
        &input.title,
        &input.start_time,
        &input.end_time,
        &input.description,
        &input.attendees,
    )
    .await
    {
        Ok(result) => HttpResponse::Ok().json(ResearchResponse { result }),
        Err(err) => tool_failure("Calendar event", err),
    }
}
