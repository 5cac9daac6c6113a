//! Configuration error types for the GraphQL APQ client.
//!
//! This module contains error types used for configuration and validation
//! errors raised before any request is sent.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and
//! actionable.
//!
//! # Example
//!
//! ```rust
//! use graphql_apq::{ConfigError, EndpointUrl};
//!
//! let result = EndpointUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidEndpointUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Please provide an absolute http or https URL (e.g., 'https://api.example.com/graphql').")]
    InvalidEndpointUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}
