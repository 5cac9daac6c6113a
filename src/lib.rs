//! # GraphQL APQ Client
//!
//! A server-side GraphQL request client that minimizes network payloads via
//! Automatic Persisted Queries (APQ) and persisted-document identifiers,
//! with a single, well-defined GET→POST fallback when the server does not
//! recognize a persisted query.
//!
//! ## Overview
//!
//! This crate provides:
//! - An immutable [`Operation`] model built once per call from a document
//!   string, optional persisted-document id, and variables
//! - APQ content hashing via [`PersistedQueryExtension`]
//!   (Apollo-convention `persistedQuery.sha256Hash`)
//! - A strategy engine, [`GraphqlClient`], that chooses GET vs POST and
//!   which of `query` / `documentId` / `extensions` go on the wire
//! - Structural payload pruning: absent or empty fields are omitted
//!   entirely, never sent as `null` or `{}`
//! - Detection of the `PersistedQueryNotFound` /
//!   `PERSISTED_QUERY_NOT_FOUND` server signal
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use graphql_apq::{ClientConfig, EndpointUrl, GraphqlClient, Operation};
//! use serde_json::json;
//!
//! let endpoint = EndpointUrl::new("https://api.example.com/graphql")?;
//! let client = GraphqlClient::new(&endpoint, ClientConfig::default());
//!
//! let operation = Operation::builder(
//!     "query GetPost($id: ID!) { post(id: $id) { title } }",
//! )
//! .variables(json!({ "id": "42" }))
//! .build()?;
//!
//! let response = client.execute(&operation, None).await?;
//! println!("data: {}", response.json()?["data"]);
//! ```
//!
//! ## Transmission Strategies
//!
//! Exactly one strategy runs per operation, selected in strict order:
//!
//! 1. **Subscriptions** are rejected with
//!    [`ClientError::UnsupportedOperation`] before any network activity.
//! 2. **Persisted operations disabled**
//!    ([`ClientConfig::disable_persisted_operations`]): a plain POST with
//!    only `query` and `variables`.
//! 3. **Mutations**: a single POST, no fallback; a persisted-document id
//!    replaces the query text unless
//!    [`ClientConfig::always_include_query`] is set.
//! 4. **Queries**: the APQ strategy. A GET carries the SHA-256 hash of the
//!    document (or only the document id, when one is present and
//!    `always_include_query` is off). If the server does not recognize the
//!    persisted query, rejects the GET, or the GET fails at the transport
//!    level, a full POST is sent exactly once and its result is final.
//!
//! ## Persisted Documents
//!
//! Documents pre-registered with the server can be referenced by a stable
//! id, letting the client omit the query text under normal operation. The
//! document text is always retained on the [`Operation`] because the POST
//! fallback and APQ hashing need it. Host applications whose generated
//! document values carry their own id can implement [`PersistedDocument`]
//! and use [`Operation::from_persisted`].
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed
//!   explicitly
//! - **Fail-fast validation**: Endpoint and operation values validate on
//!   construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Final outcomes only**: Recoverable APQ conditions (rejected GET,
//!   transport failure on GET, not-found signal) are handled inside the
//!   executor and never surface to the caller

pub mod client;
pub mod config;
pub mod error;
pub mod operation;

// Re-export public types at crate root for convenience
pub use client::{
    is_persisted_query_not_found, BodyParseError, ClientError, GraphqlClient, GraphqlResponse,
    HttpResponseError, PersistedQuery, PersistedQueryExtension, CLIENT_VERSION,
    PERSISTED_QUERY_VERSION,
};
pub use config::{ClientConfig, ClientConfigBuilder, EndpointUrl};
pub use error::ConfigError;
pub use operation::{
    InvalidOperationError, Operation, OperationBuilder, OperationKind, PersistedDocument,
    FALLBACK_OPERATION_NAME,
};
