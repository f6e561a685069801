use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::BoxError;

/// Failure to convert one string into a field's native type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoerceError {
    #[error("parsing {value:?}: invalid syntax")]
    Syntax { value: String },

    #[error("parsing {value:?}: {source}")]
    Int {
        value: String,
        source: ParseIntError,
    },

    #[error("parsing {value:?}: {source}")]
    Float {
        value: String,
        source: ParseFloatError,
    },

    #[error("invalid duration {value:?}: {reason}")]
    Duration { value: String, reason: &'static str },

    #[error("invalid map item: {0:?}")]
    MapItem(String),

    #[error("{0}")]
    Custom(#[source] BoxError),
}

impl CoerceError {
    pub(crate) fn syntax(value: &str) -> Self {
        Self::Syntax {
            value: value.to_string(),
        }
    }

    pub(crate) fn duration(value: &str, reason: &'static str) -> Self {
        Self::Duration {
            value: value.to_string(),
            reason,
        }
    }
}
