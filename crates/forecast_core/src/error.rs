//! Error type for the simulation engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

/// Everything that can stop a forecast before or during its trials.
///
/// None of these are recovered locally: a forecast either completes every
/// trial or fails on the first invalid input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A draw or fixture references a competitor the rating mapping lacks
    #[error("no rating for competitor '{competitor}'")]
    MissingRating { competitor: String },

    #[error("rating for '{competitor}' is not a finite number (got {value})")]
    NonFiniteRating { competitor: String, value: f64 },

    #[error("malformed draw: {reason}")]
    MalformedDraw { reason: String },

    #[error("malformed fixture list: {reason}")]
    MalformedFixture { reason: String },

    #[error("invalid {field} = {value}: {reason}")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl SimError {
    pub(crate) fn missing_rating(competitor: &str) -> Self {
        SimError::MissingRating {
            competitor: competitor.to_string(),
        }
    }

    pub(crate) fn malformed_draw(reason: impl Into<String>) -> Self {
        SimError::MalformedDraw {
            reason: reason.into(),
        }
    }
}
