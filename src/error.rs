//! Error types for the price pipeline.
//!
//! Validation variants carry messages meant for Discord users. Transport and
//! render variants carry the underlying cause for the logs; callers replace them
//! with a short generic message before replying.

use thiserror::Error;

use crate::api::quickchart::ChartError;

/// Largest history window the price API serves
pub const MAX_HISTORY_DAYS: i64 = 30;

#[derive(Error, Debug)]
pub enum GoldPriceError {
    /// A dependent parameter was supplied without the one it needs
    #[error("`{required}` parameter is required when `{dependent}` is specified")]
    MissingParameter {
        required: &'static str,
        dependent: &'static str,
    },

    /// Instrument code outside the closed set
    #[error("Invalid gold type: `{code}`. Valid types are: {valid}")]
    InvalidParameter { code: String, valid: String },

    #[error("Days parameter must be a number between 1 and 30 (got {days})")]
    DaysOutOfRange { days: i64 },

    /// The price API could not be reached or answered with something that is not JSON
    #[error("Gold price API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// History is empty or lacks the requested instrument
    #[error("No historical price data for `{0}`")]
    NoData(String),

    #[error("Chart rendering failed: {0}")]
    Render(#[from] ChartError),
}

impl GoldPriceError {
    /// Validation errors are safe to show to users as-is
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GoldPriceError::MissingParameter { .. }
                | GoldPriceError::InvalidParameter { .. }
                | GoldPriceError::DaysOutOfRange { .. }
        )
    }
}

/// Failure to reach the scheduled destination channel
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Guild {0} not found")]
    GuildNotFound(u64),

    #[error("Channel {0} not found or is not a text channel")]
    ChannelNotFound(u64),

    #[error("Failed to send message: {0}")]
    Send(String),
}
