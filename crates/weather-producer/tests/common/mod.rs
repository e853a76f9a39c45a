//! Test helpers for producer integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use weather_producer::{ApiConfig, OpenMeteoClient, PublishError, QueuePublisher, WeatherReading};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const QUEUE: &str = "weather_data";

pub const SAMPLE_READING: &str =
    r#"{"current":{"temperature_2m":21.4,"relative_humidity_2m":55,"wind_speed_10m":3.2}}"#;

/// In-memory stand-in for a broker: messages keyed by queue name.
#[derive(Clone, Default)]
pub struct MemoryQueue {
    queue: String,
    messages: Arc<Mutex<HashMap<String, Vec<Vec<u8>>>>>,
    closed: Arc<Mutex<bool>>,
}

impl MemoryQueue {
    pub fn new(queue: &str) -> Self {
        Self {
            queue: queue.to_string(),
            ..Self::default()
        }
    }

    pub fn messages(&self, queue: &str) -> Vec<Vec<u8>> {
        self.messages
            .lock()
            .unwrap()
            .get(queue)
            .cloned()
            .unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.messages.lock().unwrap().values().map(Vec::len).sum()
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.lock().unwrap()
    }

    pub fn shut(&self) {
        *self.closed.lock().unwrap() = true;
    }
}

#[async_trait]
impl QueuePublisher for MemoryQueue {
    async fn publish(&self, reading: &WeatherReading) -> Result<(), PublishError> {
        if self.is_closed() {
            return Err(PublishError::Closed);
        }
        self.messages
            .lock()
            .unwrap()
            .entry(self.queue.clone())
            .or_default()
            .push(reading.as_bytes().to_vec());
        Ok(())
    }

    async fn close(&self) -> Result<(), PublishError> {
        self.shut();
        Ok(())
    }
}

/// Client pointed at the mock server's `/v1/forecast`.
pub fn client_for(server: &MockServer) -> OpenMeteoClient {
    let config = ApiConfig {
        base_url: format!("{}/v1/forecast", server.uri()),
        timeout_secs: Some(5),
        ..ApiConfig::default()
    };
    OpenMeteoClient::new(&config).expect("Failed to create client")
}

/// Mount a forecast mock that only matches the default query parameters.
pub async fn mount_forecast(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "-15.79"))
        .and(query_param("longitude", "-47.88"))
        .and(query_param(
            "current",
            "temperature_2m,relative_humidity_2m,wind_speed_10m",
        ))
        .respond_with(response)
        .mount(server)
        .await;
}
