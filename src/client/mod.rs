//! GraphQL request client types.
//!
//! This module provides the request execution strategy engine and its
//! supporting types.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`GraphqlClient`]: The strategy selector/executor
//! - [`GraphqlResponse`]: A buffered, re-readable response
//! - [`PersistedQueryExtension`]: The APQ content-hash extension
//! - [`ClientError`]: Unified error type for request execution
//! - [`is_persisted_query_not_found`]: Detector for the server-side
//!   "persisted query unknown" signal
//!
//! # Strategy Selection
//!
//! For each operation, exactly one of three strategies runs:
//!
//! | Condition                          | Strategy       | Requests |
//! |------------------------------------|----------------|----------|
//! | subscription                       | rejected       | 0        |
//! | `disable_persisted_operations`     | standard POST  | 1        |
//! | mutation                           | mutation POST  | 1        |
//! | query                              | APQ GET (+POST)| 1–2      |
//!
//! The APQ strategy issues a lightweight GET first and falls back to a full
//! POST at most once: when the server signals `PersistedQueryNotFound`,
//! answers with a non-2xx status, or the GET fails at the transport level.
//!
//! # Example
//!
//! ```rust,ignore
//! use graphql_apq::{ClientConfig, EndpointUrl, GraphqlClient, Operation};
//!
//! let endpoint = EndpointUrl::new("https://api.example.com/graphql")?;
//! let client = GraphqlClient::new(&endpoint, ClientConfig::default());
//!
//! let operation = Operation::builder("query ListPosts { posts { id } }").build()?;
//! let response = client.execute(&operation, None).await?;
//! ```

mod detect;
mod errors;
mod graphql;
mod payload;
mod persisted;
mod response;

pub use detect::is_persisted_query_not_found;
pub use errors::{BodyParseError, ClientError, HttpResponseError};
pub use graphql::{GraphqlClient, CLIENT_VERSION};
pub use persisted::{PersistedQuery, PersistedQueryExtension, PERSISTED_QUERY_VERSION};
pub use response::GraphqlResponse;
