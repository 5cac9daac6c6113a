//! The request execution strategy engine.
//!
//! This module provides [`GraphqlClient`], which decides how each operation
//! is transmitted and drives the APQ GET→POST fallback.

use std::collections::HashMap;

use serde_json::Value;
use url::Url;

use crate::client::detect::is_persisted_query_not_found;
use crate::client::errors::{ClientError, HttpResponseError};
use crate::client::payload::{self, RequestPayload};
use crate::client::persisted::PersistedQueryExtension;
use crate::client::response::GraphqlResponse;
use crate::config::{ClientConfig, EndpointUrl};
use crate::operation::{Operation, OperationKind};

/// Client version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A GraphQL request client with Automatic Persisted Queries and
/// persisted-document support.
///
/// Each call to [`execute`](Self::execute) selects one of three
/// transmission strategies for the operation:
///
/// - **Standard POST** when persisted operations are disabled: the body
///   carries only `query` and `variables`.
/// - **Mutation POST** for mutations: a single request with no fallback,
///   preferring the persisted-document id over the query text when one is
///   present.
/// - **APQ query strategy** for queries: a lightweight GET carrying the
///   persisted-query hash (or just the document id), falling back to a full
///   POST exactly once if the server does not recognize the persisted
///   query, rejects the GET, or the GET fails at the transport level.
///
/// Subscriptions are rejected with
/// [`ClientError::UnsupportedOperation`] before any network activity.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync` and holds no per-call mutable state;
/// concurrent `execute` calls are independent. Within one call the two
/// possible network operations are strictly sequential, because the
/// fallback payload depends on the GET outcome.
///
/// # Example
///
/// ```rust,ignore
/// use graphql_apq::{ClientConfig, EndpointUrl, GraphqlClient, Operation};
///
/// let endpoint = EndpointUrl::new("https://api.example.com/graphql")?;
/// let client = GraphqlClient::new(&endpoint, ClientConfig::default());
///
/// let operation = Operation::builder("query ListPosts { posts { id } }").build()?;
/// let response = client.execute(&operation, None).await?;
///
/// println!("data: {}", response.json()?["data"]);
/// ```
#[derive(Debug)]
pub struct GraphqlClient {
    /// The internal reqwest HTTP client.
    http: reqwest::Client,
    /// The GraphQL endpoint all requests are sent to.
    endpoint: Url,
    /// Strategy-selection configuration, fixed at construction.
    config: ClientConfig,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a new client for the given endpoint.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This
    /// should only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use graphql_apq::{ClientConfig, EndpointUrl, GraphqlClient};
    ///
    /// let endpoint = EndpointUrl::new("https://api.example.com/graphql").unwrap();
    /// let client = GraphqlClient::new(&endpoint, ClientConfig::default());
    /// ```
    #[must_use]
    pub fn new(endpoint: &EndpointUrl, config: ClientConfig) -> Self {
        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}GraphQL APQ Client v{CLIENT_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            endpoint: endpoint.url().clone(),
            config,
            default_headers,
        }
    }

    /// Returns the endpoint all requests are sent to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Executes a GraphQL operation, selecting the transmission strategy
    /// by operation kind and configuration.
    ///
    /// Selection order:
    ///
    /// 1. Subscriptions fail immediately; no network call is made.
    /// 2. If persisted operations are disabled, a plain POST carrying only
    ///    `query` and `variables` is sent, regardless of operation kind or
    ///    document id.
    /// 3. Mutations are sent as a single POST with no fallback.
    /// 4. Queries use the APQ strategy: a GET attempt, then at most one
    ///    POST fallback.
    ///
    /// # Errors
    ///
    /// - [`ClientError::UnsupportedOperation`] for subscriptions.
    /// - [`ClientError::Network`] if the only or final request of the
    ///   strategy fails at the transport level. A transport failure on the
    ///   APQ GET attempt is absorbed by the fallback, not surfaced.
    /// - [`ClientError::Response`] if the final response has a non-2xx
    ///   status. An interim rejected GET never raises this.
    /// - [`ClientError::Serialization`] if a payload cannot be serialized.
    pub async fn execute(
        &self,
        operation: &Operation,
        extra_headers: Option<HashMap<String, String>>,
    ) -> Result<GraphqlResponse, ClientError> {
        let extra = extra_headers.as_ref();
        match operation.kind() {
            OperationKind::Subscription => Err(ClientError::UnsupportedOperation {
                kind: OperationKind::Subscription,
            }),
            _ if self.config.disable_persisted_operations() => {
                tracing::debug!(
                    operation = operation.name(),
                    "persisted operations disabled, sending standard POST"
                );
                self.standard_post(operation, extra).await
            }
            OperationKind::Mutation => self.mutation_post(operation, extra).await,
            OperationKind::Query => self.persisted_query(operation, extra).await,
        }
    }

    /// Standard POST: `query` and `variables` only, never `documentId` or
    /// `extensions`.
    async fn standard_post(
        &self,
        operation: &Operation,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<GraphqlResponse, ClientError> {
        let body = payload::build_body(&RequestPayload {
            query: Some(operation.document()),
            variables: operation.variables(),
            ..RequestPayload::default()
        })?;

        let response = self.send_post(&body, extra_headers).await?;
        Self::finalize(response)
    }

    /// Mutation POST: a single request, no fallback. Prefers the
    /// persisted-document id over the query text when one is present.
    async fn mutation_post(
        &self,
        operation: &Operation,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<GraphqlResponse, ClientError> {
        let request_payload = if operation.document_id().is_some() {
            RequestPayload {
                query: self
                    .config
                    .always_include_query()
                    .then(|| operation.document()),
                document_id: operation.document_id(),
                variables: operation.variables(),
                extensions: None,
            }
        } else {
            RequestPayload {
                query: Some(operation.document()),
                variables: operation.variables(),
                ..RequestPayload::default()
            }
        };

        let body = payload::build_body(&request_payload)?;
        let response = self.send_post(&body, extra_headers).await?;
        Self::finalize(response)
    }

    /// APQ query strategy: GET attempt, then at most one POST fallback.
    ///
    /// The GET carries the persisted-query hash unless a document id alone
    /// is expected to satisfy the server (`document_id` present and
    /// `always_include_query` off). The fallback POST always carries the
    /// full query text; it carries `extensions` only when the GET itself
    /// did, so a document-id GET that fails falls back to a POST without
    /// the hash.
    async fn persisted_query(
        &self,
        operation: &Operation,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<GraphqlResponse, ClientError> {
        // The GET attempt always needs the hash unless the document id
        // alone is expected to resolve, and the fallback needs it whenever
        // the GET carried it, so compute it unconditionally.
        let extension = PersistedQueryExtension::new(operation.document());
        let include_extensions =
            operation.document_id().is_none() || self.config.always_include_query();

        let url = payload::build_url(
            &self.endpoint,
            operation,
            include_extensions.then_some(&extension),
        )?;

        // GET carries no body, so it must not carry a Content-Type either.
        let mut get_headers = self.merged_headers(extra_headers);
        get_headers.retain(|name, _| !name.eq_ignore_ascii_case("content-type"));

        match self.send_get(url, &get_headers).await {
            Ok(response) if response.is_ok() => match response.json_value() {
                // A non-JSON 2xx body is assumed to be a legitimate
                // payload the caller must handle itself; do not fall back.
                Err(_) => return Ok(response),
                Ok(body) => {
                    if !is_persisted_query_not_found(&body) {
                        return Ok(response);
                    }
                    tracing::debug!(
                        operation = operation.name(),
                        "server does not recognize persisted query, falling back to POST"
                    );
                }
            },
            Ok(response) => {
                tracing::debug!(
                    operation = operation.name(),
                    status = response.status(),
                    "persisted GET rejected, falling back to POST"
                );
            }
            Err(error) => {
                tracing::debug!(
                    operation = operation.name(),
                    error = %error,
                    "persisted GET failed, falling back to POST"
                );
            }
        }

        // POST fallback, attempted at most once. Its result is final.
        let body = payload::build_body(&RequestPayload {
            query: Some(operation.document()),
            document_id: operation.document_id(),
            variables: operation.variables(),
            extensions: include_extensions.then_some(&extension),
        })?;

        let response = self.send_post(&body, extra_headers).await?;
        Self::finalize(response)
    }

    /// Sends a GET request with the given headers and no body.
    async fn send_get(
        &self,
        url: Url,
        headers: &HashMap<String, String>,
    ) -> Result<GraphqlResponse, reqwest::Error> {
        let mut request = self.http.get(url);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.send().await?;
        GraphqlResponse::from_reqwest(response).await
    }

    /// Sends a POST request with a JSON body to the endpoint.
    async fn send_post(
        &self,
        body: &Value,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<GraphqlResponse, reqwest::Error> {
        let mut headers = self.merged_headers(extra_headers);
        if !headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case("content-type"))
        {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }

        let mut request = self.http.post(self.endpoint.clone());
        for (name, value) in &headers {
            request = request.header(name, value);
        }

        let response = request.body(body.to_string()).send().await?;
        GraphqlResponse::from_reqwest(response).await
    }

    /// Merges per-call headers over the client defaults.
    fn merged_headers(
        &self,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> HashMap<String, String> {
        let mut headers = self.default_headers.clone();
        if let Some(extra) = extra_headers {
            for (name, value) in extra {
                headers.insert(name.clone(), value.clone());
            }
        }
        headers
    }

    /// Turns the final response of a strategy into the caller-facing
    /// result: 2xx passes through, anything else becomes a
    /// [`ClientError::Response`] carrying the original response.
    fn finalize(response: GraphqlResponse) -> Result<GraphqlResponse, ClientError> {
        if response.is_ok() {
            return Ok(response);
        }

        let status = response.status();
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Unknown")
            .to_string();

        Err(HttpResponseError {
            status,
            status_text,
            response,
        }
        .into())
    }
}
