//! Open-Meteo HTTP client.
//!
//! Issues a single `GET` per reading and hands back the body untouched.
//! No retries; a timeout applies only when one is configured.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::reading::WeatherReading;

pub type Result<T> = std::result::Result<T, FetchError>;

/// Something that yields one weather reading per call.
#[async_trait]
pub trait ReadingSource: Send + Sync {
    async fn fetch_reading(&self) -> Result<WeatherReading>;
}

/// Client for the Open-Meteo forecast endpoint.
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
    query: Vec<(&'static str, String)>,
}

impl OpenMeteoClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            query: query_params(config),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Query string for a current-conditions request.
fn query_params(config: &ApiConfig) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", config.latitude.to_string()),
        ("longitude", config.longitude.to_string()),
        ("current", config.current.join(",")),
    ]
}

#[async_trait]
impl ReadingSource for OpenMeteoClient {
    async fn fetch_reading(&self) -> Result<WeatherReading> {
        log::debug!("GET {} {:?}", self.base_url, self.query);

        let response = self
            .client
            .get(&self.base_url)
            .query(&self.query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        WeatherReading::from_bytes(body.to_vec())
    }
}
