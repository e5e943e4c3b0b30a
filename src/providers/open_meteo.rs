//! Open-Meteo forecast client, the primary meteorological provider.

use crate::providers::error::ProviderError;
use crate::providers::http::get_json;
use crate::providers::{CurrentConditions, MeteorologicalSource};
use crate::types::coordinate::LatLon;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1";

/// Fetches current temperature, wind and precipitation from the Open-Meteo
/// `/forecast` endpoint. No API key is needed.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
    #[serde(default)]
    hourly: Option<HourlyPrecipitation>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    winddirection: f64,
}

#[derive(Debug, Deserialize)]
struct HourlyPrecipitation {
    // Open-Meteo reports missing hours as null.
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
}

impl From<ForecastResponse> for CurrentConditions {
    fn from(response: ForecastResponse) -> Self {
        let precipitation = response
            .hourly
            .and_then(|hourly| hourly.precipitation.first().copied().flatten())
            .unwrap_or(0.0);
        CurrentConditions {
            temperature: response.current_weather.temperature,
            precipitation,
            wind_speed: response.current_weather.windspeed,
            wind_direction: response.current_weather.winddirection,
        }
    }
}

impl OpenMeteoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Uses an existing reqwest client, sharing its connection pool.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast", self.base_url)
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new(DEFAULT_OPEN_METEO_URL)
    }
}

impl MeteorologicalSource for OpenMeteoClient {
    async fn current_conditions(
        &self,
        coordinate: LatLon,
    ) -> Result<CurrentConditions, ProviderError> {
        let endpoint = self.forecast_url();
        let url = format!(
            "{}?latitude={}&longitude={}",
            endpoint, coordinate.0, coordinate.1
        );
        debug!("Requesting current weather from {}", url);

        let request = self
            .client
            .get(&endpoint)
            .query(&[("latitude", coordinate.0), ("longitude", coordinate.1)])
            .query(&[("current_weather", "true"), ("hourly", "precipitation")]);
        let response: ForecastResponse = get_json(request, &url).await?;
        Ok(CurrentConditions::from(response))
    }
}
