//! Layer-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayerError {
    #[error("malformed valid_time token: {0:?}")]
    Parse(String),

    #[error("feature query returned no features")]
    EmptyResult,

    #[error("feature record has no valid_time attribute")]
    MissingAttribute,

    #[error("duplicate layer id: {0}")]
    DuplicateLayer(String),

    #[error("layer registry is empty")]
    EmptyRegistry,

    #[error("feature service error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("label task failed: {0}")]
    Task(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl LayerError {
    /// User-friendly error message for UI display.
    ///
    /// Callers that choose to render a placeholder instead of a resolved
    /// valid-time label can use this text directly.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Parse(_) => "Forecast window data is malformed.",
            Self::EmptyResult | Self::MissingAttribute => "Forecast window unavailable.",
            Self::DuplicateLayer(_) | Self::EmptyRegistry => {
                "Layer configuration is invalid. Check your settings."
            }
            Self::Api { .. } => "The map service returned an error. Please try again later.",
            Self::Task(_) => "Something went wrong. Please try again.",
            Self::Network(_) => "Network error. Check your connection.",
        }
    }

    /// Whether this error indicates corrupt upstream data rather than a
    /// transient failure. Corrupt data will not improve on retry.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::Parse(_) | Self::EmptyResult | Self::MissingAttribute
        )
    }
}
