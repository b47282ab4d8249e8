// src/services/weather.rs
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::{ConsoleError, ConsoleResult};

const DEFAULT_BASE_URL: &str = "https://wttr.in/";

#[derive(Debug, Deserialize)]
struct WttrResponse {
    current_condition: Vec<CurrentCondition>,
    nearest_area: Option<Vec<NearestArea>>,
}

#[derive(Debug, Deserialize)]
struct CurrentCondition {
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "FeelsLikeC")]
    feels_like_c: String,
    humidity: String,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: String,
    #[serde(rename = "weatherDesc")]
    weather_desc: Vec<ValueWrapper>,
}

#[derive(Debug, Deserialize)]
struct NearestArea {
    #[serde(rename = "areaName")]
    area_name: Vec<ValueWrapper>,
}

#[derive(Debug, Deserialize)]
struct ValueWrapper {
    value: String,
}

#[derive(Debug, Clone)]
pub struct WeatherService {
    client: Client,
    base_url: Url,
}

impl Default for WeatherService {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL).expect("default wttr.in URL")
    }
}

impl WeatherService {
    pub fn new(base_url: &str) -> ConsoleResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ConsoleError::Service(format!("Invalid weather URL: {}", e)))?;
        Ok(WeatherService {
            client: Client::new(),
            base_url,
        })
    }

    /// Current conditions for a location (wttr.in geolocates when the
    /// location is empty), formatted as a single transcript-ready block.
    pub async fn current(&self, location: &str) -> ConsoleResult<String> {
        let mut url = self
            .base_url
            .join(location.trim())
            .map_err(|e| ConsoleError::Service(format!("Failed to build URL: {}", e)))?;
        url.set_query(Some("format=j1"));

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ConsoleError::Service(format!(
                "Weather service returned an error: {}",
                status
            )));
        }

        let parsed: WttrResponse = response.json().await?;
        let current = parsed
            .current_condition
            .first()
            .ok_or_else(|| ConsoleError::Service("Weather response had no conditions".to_string()))?;

        let area = parsed
            .nearest_area
            .as_ref()
            .and_then(|areas| areas.first())
            .and_then(|area| area.area_name.first())
            .map(|name| name.value.clone())
            .unwrap_or_else(|| {
                if location.trim().is_empty() {
                    "your location".to_string()
                } else {
                    location.trim().to_string()
                }
            });

        let description = current
            .weather_desc
            .first()
            .map(|d| d.value.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(format!(
            "Weather for {}: {} | {}°C (feels like {}°C) | humidity {}% | wind {} km/h",
            area, description, current.temp_c, current.feels_like_c, current.humidity,
            current.windspeed_kmph
        ))
    }
}
