use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use thiserror::Error;

pub use reqwest::StatusCode;

use crate::model::WeatherReading;

const CURRENT_WEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Why a fetch produced no data. Every variant is terminal for the request;
/// there is no retry or backoff.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to reach OpenWeather: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("OpenWeather request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse OpenWeather JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Seam over the weather provider so callers such as the session loop can
/// be exercised with doubles.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    /// Fetch current conditions for a city. Callers treat any error as
    /// "no data" for this request.
    async fn current(&self, city: &str) -> Result<WeatherReading, FetchError>;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherClient {
    /// Single GET, no timeout override beyond the client default. The body
    /// is returned unmodified as a mapping.
    async fn current(&self, city: &str) -> Result<WeatherReading, FetchError> {
        let res = self
            .http
            .get(CURRENT_WEATHER_URL)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let raw: Map<String, Value> = serde_json::from_str(&body)?;
        Ok(WeatherReading::new(raw))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Back off to a char boundary so the cut never lands inside a
    // multibyte character.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }

    format!("{}...", &body[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_leaves_short_bodies_alone() {
        assert_eq!(truncate_body("city not found"), "city not found");
    }

    #[test]
    fn truncate_body_cuts_long_bodies() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);

        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        // Three-byte chars put byte 200 mid-character.
        let long = "€".repeat(100);
        let truncated = truncate_body(&long);

        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.len(), 201);
        assert!(truncated.trim_end_matches("...").chars().all(|c| c == '€'));
    }

    #[test]
    fn status_error_reports_code_and_body() {
        let err = FetchError::Status {
            status: StatusCode::NOT_FOUND,
            body: r#"{"cod":"404","message":"city not found"}"#.to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("city not found"));
    }
}
