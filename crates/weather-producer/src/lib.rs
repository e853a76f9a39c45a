//! Open-Meteo weather data publisher for RabbitMQ.
//!
//! Polls the Open-Meteo forecast endpoint for current conditions and forwards
//! each response body, unchanged, to a durable queue on the default exchange.
//! One fetch, one publish, then a fixed sleep; no retries and no buffering.

pub mod api;
pub mod config;
pub mod error;
pub mod node;
pub mod publisher;
pub mod reading;
pub mod shutdown;

pub use api::{OpenMeteoClient, ReadingSource};
pub use config::{ApiConfig, BrokerConfig, Config};
pub use error::{ConfigError, FetchError, ProducerError, PublishError};
pub use node::{CycleState, ProducerNode};
pub use publisher::{AmqpPublisher, QueuePublisher};
pub use reading::WeatherReading;
pub use shutdown::setup_shutdown;
