//! OpenWeatherMap current-weather client, used only for cloud cover.

use crate::providers::error::ProviderError;
use crate::providers::http::get_json;
use crate::providers::CloudCoverSource;
use crate::types::coordinate::LatLon;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_OPEN_WEATHER_MAP_URL: &str = "https://api.openweathermap.org/data/2.5";

const PROVIDER_NAME: &str = "OpenWeatherMap";

/// Fetches cloud cover from the OpenWeatherMap `/weather` endpoint.
///
/// The API key travels as the `appid` query parameter. A client without a key can
/// still be constructed; each call then fails with [`ProviderError::MissingApiKey`].
#[derive(Clone)]
pub struct OpenWeatherMapClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CloudResponse {
    clouds: Clouds,
}

#[derive(Debug, Deserialize)]
struct Clouds {
    all: f64,
}

impl OpenWeatherMapClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        Self {
            client,
            base_url,
            api_key,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

// Hand-written so the API key never ends up in logs.
impl std::fmt::Debug for OpenWeatherMapClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CloudCoverSource for OpenWeatherMapClient {
    async fn cloud_cover(&self, coordinate: LatLon) -> Result<f64, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey {
            provider: PROVIDER_NAME,
        })?;

        let endpoint = format!("{}/weather", self.base_url);
        let url = format!("{}?lat={}&lon={}", endpoint, coordinate.0, coordinate.1);
        debug!("Requesting cloud cover from {}", url);

        let request = self
            .client
            .get(&endpoint)
            .query(&[("lat", coordinate.0), ("lon", coordinate.1)])
            .query(&[("appid", api_key)]);
        let response: CloudResponse = get_json(request, &url).await?;
        Ok(response.clouds.all)
    }
}
