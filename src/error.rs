//! Error types for record parsing and holdings normalization.
//!
//! This module provides the [`MarcError`] type for the few failures that stop
//! work on a record, and the [`Result`] convenience type. Everything else a
//! record can get wrong is reported as a [`crate::warning::FieldWarning`].

use thiserror::Error;

/// Error type for all library operations.
///
/// Only structural failures live here. A record with a leader always parses;
/// malformed fields inside it become warnings on the parsed record.
#[derive(Error, Debug)]
pub enum MarcError {
    /// The input text has no `=LDR` line, so there is no record to build.
    #[error("Missing leader: {0}")]
    MissingLeader(String),

    /// A name was looked up in the accessor table that the table does not define.
    #[error("Unknown accessor: {0}")]
    UnknownAccessor(String),

    /// Configuration could not be loaded or holds a value out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// MARCXML input could not be read.
    #[error("XML error: {0}")]
    Xml(String),

    /// Error related to character encoding conversion.
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// IO error from the underlying source.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for MarcError {
    fn from(err: serde_json::Error) -> Self {
        MarcError::InvalidConfig(err.to_string())
    }
}

/// Convenience type alias for [`std::result::Result`] with [`MarcError`].
pub type Result<T> = std::result::Result<T, MarcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MarcError::MissingLeader("no =LDR line".to_string());
        assert_eq!(err.to_string(), "Missing leader: no =LDR line");

        let err = MarcError::UnknownAccessor("colour".to_string());
        assert_eq!(err.to_string(), "Unknown accessor: colour");
    }

    #[test]
    fn test_json_error_maps_to_config() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: MarcError = json_err.into();
        assert!(matches!(err, MarcError::InvalidConfig(_)));
    }
}
