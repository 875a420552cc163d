use crate::utils::error::{Result, SalaryError};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|e| SalaryError::ConfigError {
        message: format!("cannot build HTTP client: {}", e),
    })
}

/// Sends `request` and decodes the JSON body.
///
/// Network failures map to `Transport`, non-2xx answers to `HttpStatus` and
/// undecodable bodies to `Decode`.
pub async fn get_json<T: DeserializeOwned>(request: RequestBuilder, context: &str) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();
    tracing::debug!("{} responded {} for {}", context, status, response.url());

    if !status.is_success() {
        return Err(SalaryError::HttpStatus {
            status,
            url: response.url().to_string(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| SalaryError::Decode {
        context: context.to_string(),
        source,
    })
}
