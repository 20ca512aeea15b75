use serde::Deserialize;
use std::env;

use super::ToolError;

const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    weather: Vec<Condition>,
    main: Readings,
    name: String,
    sys: Sys,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct Readings {
    temp: f32,
    feels_like: f32,
}

#[derive(Debug, Deserialize)]
struct Sys {
    country: String,
}

/// Fetches the current weather for a destination from OpenWeather and
/// renders it as a single sentence.
pub async fn get_weather(http: &reqwest::Client, destination: &str) -> Result<String, ToolError> {
    let api_key = env::var("OPENWEATHER_API_KEY").map_err(|_| {
        ToolError::MissingCredentials("OPENWEATHER_API_KEY is not set".to_string())
    })?;

    let response = http
        .get(WEATHER_URL)
        .query(&[
            ("q", destination),
            ("appid", api_key.as_str()),
            ("units", "metric"),
        ])
        .send()
        .await?
        .error_for_status()?;

    let data: WeatherResponse = response
        .json()
        .await
        .map_err(|e| ToolError::Malformed(format!("unexpected weather response: {}", e)))?;

    let description = data
        .weather
        .first()
        .map(|c| c.description.clone())
        .ok_or_else(|| {
            ToolError::EmptyResult(format!("no weather data for '{}'", destination))
        })?;

    Ok(format!(
        "The current weather in {}, {} is {:.1}°C (feels like {:.1}°C) with {}",
        data.name, data.sys.country, data.main.temp, data.main.feels_like, description
    ))
}
