// File: crates/hits-core/src/error.rs
// Summary: Error taxonomy for response decoding, series construction and configuration.

use thiserror::Error;

/// Failure to turn a backend response body into series.
///
/// An empty-but-present result container is not an error; callers get an
/// empty series list instead.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The expected result container (`hits` or `data.result`) is absent.
    #[error("Error: No '{field}' field in response")]
    MalformedResponse { field: &'static str },
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("series has {timestamps} timestamps but {values} values")]
    LengthMismatch { timestamps: usize, values: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for parameter `{key}`")]
    InvalidValue { key: String, value: String },
}
