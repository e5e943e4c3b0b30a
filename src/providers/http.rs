use crate::providers::error::ProviderError;
use log::warn;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

/// Sends a GET request and decodes the JSON body.
///
/// `url` is only used for error messages and logs, so callers pass a form of the
/// URL without credentials.
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    url: &str,
) -> Result<T, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::NetworkRequest(url.to_string(), e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("HTTP error for {}: {} {}", url, status, body);
        return Err(ProviderError::HttpStatus {
            url: url.to_string(),
            status,
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ProviderError::Decode(url.to_string(), e))
}
