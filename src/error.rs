use thiserror::Error;

use crate::codec::CoerceError;
use crate::BoxError;

/// Top-level error type for the kv-mapper library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid specification: {0}")]
    InvalidSpecification(String),

    #[error("required key {0} missing value")]
    MissingRequired(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Sink(#[source] BoxError),

    #[error("no {0} configured")]
    MissingCollaborator(&'static str),
}

/// A store value could not be converted to its field's type.
#[derive(Debug, Error)]
#[error(
    "assigning {key} to {field}: converting '{value}' to type {type_name}. details: {source}"
)]
pub struct ParseError {
    pub key: String,
    pub field: &'static str,
    pub type_name: &'static str,
    pub value: String,
    pub source: CoerceError,
}
