use serde::de::IgnoredAny;
use serde_json::Value;

use crate::error::FetchError;

/// An opaque JSON document returned by the weather API.
///
/// Holds the exact response text. The only check applied is that the text
/// parses as JSON; no field is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReading {
    raw: String,
}

impl WeatherReading {
    /// Wrap a response body, rejecting anything that is not well-formed JSON.
    pub fn from_json(raw: impl Into<String>) -> Result<Self, FetchError> {
        let raw = raw.into();
        serde_json::from_str::<IgnoredAny>(&raw)?;
        Ok(Self { raw })
    }

    /// Wrap raw response bytes without any lossy decoding.
    ///
    /// Invalid UTF-8, inside or outside a string literal, is rejected.
    pub fn from_bytes(raw: Vec<u8>) -> Result<Self, FetchError> {
        serde_json::from_slice::<IgnoredAny>(&raw)?;
        let raw = String::from_utf8(raw)?;
        Ok(Self { raw })
    }

    /// The JSON text exactly as received.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Message body for the queue.
    pub fn as_bytes(&self) -> &[u8] {
        self.raw.as_bytes()
    }

    /// Parse the document into a generic JSON value.
    pub fn document(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.raw)
    }
}
