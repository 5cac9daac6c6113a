//! Configuration types for the GraphQL APQ client.
//!
//! This module provides the types used to configure how a
//! [`GraphqlClient`](crate::client::GraphqlClient) transmits operations.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: Per-client settings controlling strategy selection
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`]
//! - [`EndpointUrl`]: A validated GraphQL endpoint URL
//!
//! # Example
//!
//! ```rust
//! use graphql_apq::ClientConfig;
//!
//! let config = ClientConfig::builder()
//!     .always_include_query(true)
//!     .user_agent_prefix("MyApp/1.0")
//!     .build();
//!
//! assert!(config.always_include_query());
//! assert!(!config.disable_persisted_operations());
//! ```

mod endpoint;

pub use endpoint::EndpointUrl;

/// Configuration for the GraphQL APQ client.
///
/// Controls how operations are transmitted: whether persisted operations
/// (APQ and persisted-document ids) are used at all, and whether the full
/// document text is always included on the wire. Fixed at client
/// construction and read-only during request execution.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use graphql_apq::ClientConfig;
///
/// // Defaults: persisted operations enabled, query text only when needed
/// let config = ClientConfig::default();
/// assert!(!config.disable_persisted_operations());
/// assert!(!config.always_include_query());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    disable_persisted_operations: bool,
    always_include_query: bool,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use graphql_apq::ClientConfig;
    ///
    /// let config = ClientConfig::builder()
    ///     .disable_persisted_operations(true)
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns whether persisted operations are disabled.
    ///
    /// When `true`, every operation is sent as a plain POST containing only
    /// the query text and variables, regardless of operation kind or any
    /// persisted-document id.
    #[must_use]
    pub const fn disable_persisted_operations(&self) -> bool {
        self.disable_persisted_operations
    }

    /// Returns whether the document text is always included on the wire.
    ///
    /// When `true`, the query text is sent even when a persisted-document
    /// id or persisted-query hash alone would suffice. Primarily useful for
    /// debugging and observability.
    #[must_use]
    pub const fn always_include_query(&self) -> bool {
        self.always_include_query
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// Every field has a default, so `build` is infallible.
///
/// # Defaults
///
/// - `disable_persisted_operations`: `false`
/// - `always_include_query`: `false`
/// - `user_agent_prefix`: `None`
///
/// # Example
///
/// ```rust
/// use graphql_apq::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .disable_persisted_operations(false)
///     .always_include_query(true)
///     .user_agent_prefix("MyApp/1.0")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    disable_persisted_operations: bool,
    always_include_query: bool,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether persisted operations are disabled.
    #[must_use]
    pub const fn disable_persisted_operations(mut self, disable: bool) -> Self {
        self.disable_persisted_operations = disable;
        self
    }

    /// Sets whether the document text is always included on the wire.
    #[must_use]
    pub const fn always_include_query(mut self, always: bool) -> Self {
        self.always_include_query = always;
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`].
    #[must_use]
    pub fn build(self) -> ClientConfig {
        ClientConfig {
            disable_persisted_operations: self.disable_persisted_operations,
            always_include_query: self.always_include_query,
            user_agent_prefix: self.user_agent_prefix,
        }
    }
}
