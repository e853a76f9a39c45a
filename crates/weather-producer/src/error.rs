/// Errors from fetching a reading from the weather API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("Invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Errors from the AMQP side of the producer.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Invalid AMQP URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to connect to broker at {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: lapin::Error,
    },

    #[error("Failed to open channel: {0}")]
    Channel(#[source] lapin::Error),

    #[error("Failed to declare queue '{queue}': {source}")]
    Declare {
        queue: String,
        #[source]
        source: lapin::Error,
    },

    #[error("Broker connection is closed")]
    Closed,

    #[error("Failed to publish to '{queue}': {source}")]
    Publish {
        queue: String,
        #[source]
        source: lapin::Error,
    },

    #[error("Failed to close broker connection: {0}")]
    Close(#[source] lapin::Error),
}

/// Errors from loading or validating the producer configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level producer error.
#[derive(Debug, thiserror::Error)]
pub enum ProducerError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ProducerError>;
