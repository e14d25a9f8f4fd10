//! Trait to validate semantic errors.
//!
//! Options can deserialize fine and still be unusable, for example a zero
//! polling period.
use thiserror::Error;

/// Errors that can occur validating the configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SemanticValidationError {
    #[error("The poller interval must be greater than zero milliseconds.")]
    ZeroPollerInterval,

    #[error("The base url `{0}` cannot be used as a base for the data endpoints.")]
    CannotBeABaseUrl(String),

    #[error("The request timeout must be greater than zero seconds.")]
    ZeroRequestTimeout,
}

pub trait Validator {
    /// # Errors
    ///
    /// Will return an error if the configuration is invalid.
    fn validate(&self) -> Result<(), SemanticValidationError>;
}
