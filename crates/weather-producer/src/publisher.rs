//! AMQP publishing to RabbitMQ.
//!
//! Readings go to the default exchange with the queue name as routing key.
//! The queue is declared once when the publisher is created; redeclaring an
//! existing queue with the same properties is a no-op on the broker.

use async_trait::async_trait;
use lapin::options::{BasicPublishOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::uri::{AMQPScheme, AMQPUri};
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties};

use crate::config::BrokerConfig;
use crate::error::PublishError;
use crate::reading::WeatherReading;

pub type Result<T> = std::result::Result<T, PublishError>;

/// AMQP reply code for a normal close.
const REPLY_SUCCESS: u16 = 200;

/// Destination for readings.
#[async_trait]
pub trait QueuePublisher: Send + Sync {
    /// Send one reading. Does not wait for a broker acknowledgement.
    async fn publish(&self, reading: &WeatherReading) -> Result<()>;

    /// Release the broker resources. Safe to call on an already closed publisher.
    async fn close(&self) -> Result<()>;
}

/// Publisher backed by a single lapin connection and channel.
pub struct AmqpPublisher {
    connection: Connection,
    channel: Channel,
    queue: String,
}

impl AmqpPublisher {
    /// Connect, open a channel and declare the target queue.
    pub async fn connect(config: &BrokerConfig) -> Result<Self> {
        let uri = parse_amqp_url(&config.amqp_url)?;
        let url = redact_uri(&uri);
        log::info!("Connecting to RabbitMQ at: {}", url);

        let connection = Connection::connect_uri(uri, ConnectionProperties::default())
            .await
            .map_err(|source| PublishError::Connect { url, source })?;

        let channel = connection
            .create_channel()
            .await
            .map_err(PublishError::Channel)?;

        channel
            .queue_declare(
                &config.queue,
                QueueDeclareOptions {
                    durable: config.durable,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|source| PublishError::Declare {
                queue: config.queue.clone(),
                source,
            })?;

        log::info!(
            "Declared queue '{}' (durable: {})",
            config.queue,
            config.durable
        );

        Ok(Self {
            connection,
            channel,
            queue: config.queue.clone(),
        })
    }

    pub fn queue(&self) -> &str {
        &self.queue
    }
}

#[async_trait]
impl QueuePublisher for AmqpPublisher {
    async fn publish(&self, reading: &WeatherReading) -> Result<()> {
        if !self.connection.status().connected() {
            return Err(PublishError::Closed);
        }

        // The returned confirm is dropped: the channel is not in confirm mode.
        self.channel
            .basic_publish(
                "",
                &self.queue,
                BasicPublishOptions::default(),
                reading.as_bytes(),
                BasicProperties::default(),
            )
            .await
            .map_err(|source| PublishError::Publish {
                queue: self.queue.clone(),
                source,
            })?;

        log::debug!("Published {} bytes to '{}'", reading.as_bytes().len(), self.queue);
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        if !self.connection.status().connected() {
            log::debug!("Broker connection already closed");
            return Ok(());
        }
        self.channel
            .close(REPLY_SUCCESS, "OK")
            .await
            .map_err(PublishError::Close)?;
        self.connection
            .close(REPLY_SUCCESS, "OK")
            .await
            .map_err(PublishError::Close)?;
        log::info!("Broker connection closed");
        Ok(())
    }
}

/// Parse and validate an `amqp://` or `amqps://` URL.
pub fn parse_amqp_url(url: &str) -> Result<AMQPUri> {
    url.parse::<AMQPUri>().map_err(PublishError::InvalidUrl)
}

/// Render a parsed URL for logging with the password masked.
fn redact_uri(uri: &AMQPUri) -> String {
    let scheme = match uri.scheme {
        AMQPScheme::AMQP => "amqp",
        AMQPScheme::AMQPS => "amqps",
    };
    let authority = &uri.authority;
    format!(
        "{}://{}:***@{}:{}/{}",
        scheme,
        authority.userinfo.username,
        authority.host,
        authority.port,
        uri.vhost.replace('/', "%2f")
    )
}
