//! Error types for rulewatch.

use thiserror::Error;

use crate::history::HistoryError;

/// Errors produced while building a monitor or talking to AWS Config.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// The resolved region is not on the supported allow-list.
    #[error("unsupported region '{region}' (supported: {supported})")]
    UnsupportedRegion { region: String, supported: String },

    /// No region was given and none could be resolved from the environment.
    #[error("no AWS region configured; pass --region or set AWS_REGION")]
    RegionNotConfigured,

    /// A request to the Config service failed.
    #[error("{operation} failed: {message}")]
    Service {
        operation: &'static str,
        message: String,
    },

    /// Settings could not be loaded or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Report history could not be read or written.
    #[error("history error: {0}")]
    History(#[from] HistoryError),
}

impl MonitorError {
    /// Wrap an SDK error, keeping the full source chain in the message.
    pub fn service<E>(operation: &'static str, err: E) -> Self
    where
        E: std::error::Error,
    {
        Self::Service {
            operation,
            message: aws_sdk_config::error::DisplayErrorContext(err).to_string(),
        }
    }
}

/// Result type for monitor operations.
pub type MonitorResult<T> = Result<T, MonitorError>;
