//! Error types for GraphQL request execution.
//!
//! This module contains the error types surfaced by
//! [`GraphqlClient::execute`](crate::client::GraphqlClient::execute).
//!
//! # Error Handling
//!
//! Only the final outcome of a strategy crosses the client boundary. For
//! the APQ query strategy, a rejected or failed GET attempt is absorbed by
//! the POST fallback and never raises an error by itself; the fallback's
//! outcome is what the caller sees.
//!
//! - [`ClientError::UnsupportedOperation`]: Subscriptions, rejected before
//!   any network activity
//! - [`ClientError::Network`]: Transport failure of the only or final
//!   request of a strategy
//! - [`ClientError::Response`]: Non-2xx status on the final response
//! - [`ClientError::BodyParse`]: JSON parse failure when reading the final
//!   response body
//! - [`ClientError::Serialization`]: Request payload serialization failure
//!
//! # Example
//!
//! ```rust,ignore
//! use graphql_apq::ClientError;
//!
//! match client.execute(&operation, None).await {
//!     Ok(response) => println!("Success: {}", response.body()),
//!     Err(ClientError::Response(e)) => {
//!         println!("HTTP {} {}: {}", e.status, e.status_text, e.response.body());
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::client::response::GraphqlResponse;
use crate::operation::OperationKind;

/// Error returned when the final response of a strategy has a non-2xx
/// status.
///
/// Carries the original buffered response so the caller can inspect the
/// status, headers, and body. Interim rejected GET attempts in the APQ
/// strategy never produce this error; only the final response does.
#[derive(Debug, Error)]
#[error("GraphQL request failed with status {status} {status_text}")]
pub struct HttpResponseError {
    /// The HTTP status code of the final response.
    pub status: u16,
    /// The canonical reason phrase for the status code.
    pub status_text: String,
    /// The original response, buffered for inspection.
    pub response: GraphqlResponse,
}

/// Error returned when a response body cannot be parsed as JSON.
#[derive(Debug, Error)]
#[error("Failed to parse response body (status {status}) as JSON: {source}")]
pub struct BodyParseError {
    /// The HTTP status code of the response whose body failed to parse.
    pub status: u16,
    /// The underlying JSON parse error.
    #[source]
    pub source: serde_json::Error,
}

/// Unified error type for GraphQL request execution.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The operation kind cannot be executed over this client.
    ///
    /// Raised for subscriptions before any network activity.
    #[error("Unsupported GraphQL operation kind '{kind}'. Only queries and mutations can be executed.")]
    UnsupportedOperation {
        /// The rejected operation kind.
        kind: OperationKind,
    },

    /// A transport-level failure on the only or final request of a
    /// strategy.
    ///
    /// A transport failure on the APQ GET attempt is absorbed by the POST
    /// fallback and does not surface as this variant.
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    /// The final response of a strategy had a non-2xx status.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// The final response body could not be parsed as JSON.
    #[error(transparent)]
    BodyParse(#[from] BodyParseError),

    /// A request payload could not be serialized.
    #[error("Failed to serialize request payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Returns the HTTP status code associated with this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.status),
            Self::BodyParse(e) => Some(e.status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::UnsupportedOperation { .. } | Self::Serialization(_) => None,
        }
    }
}
