//! GraphQL operation model.
//!
//! This module provides the [`Operation`] type, the immutable description of
//! a single GraphQL call: its document text, kind, advisory name, optional
//! persisted-document id, and variables.
//!
//! # Overview
//!
//! - [`Operation`]: One GraphQL query or mutation instance
//! - [`OperationBuilder`]: A builder for constructing [`Operation`] values
//! - [`OperationKind`]: The classified kind of an operation
//! - [`PersistedDocument`]: A narrow trait for host-supplied documents that
//!   carry their own persisted-document id
//!
//! # Example
//!
//! ```rust
//! use graphql_apq::{Operation, OperationKind};
//! use serde_json::json;
//!
//! let operation = Operation::builder("query GetPost($id: ID!) { post(id: $id) { title } }")
//!     .variables(json!({ "id": "42" }))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(operation.kind(), OperationKind::Query);
//! assert_eq!(operation.name(), "GetPost");
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Fallback label used when no operation name can be extracted from the
/// document text.
pub const FALLBACK_OPERATION_NAME: &str = "(GraphQL)";

static OPERATION_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(query|mutation|subscription)\s+([A-Za-z0-9_]+)").expect("valid regex")
});

/// The kind of a GraphQL operation, classified from its document text.
///
/// Subscriptions are representable so they can be rejected with a dedicated
/// error by the executor; they are never transmitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationKind {
    /// A GraphQL query (including the anonymous `{ ... }` shorthand).
    Query,
    /// A GraphQL mutation.
    Mutation,
    /// A GraphQL subscription. Unsupported; rejected before any network
    /// activity.
    Subscription,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Mutation => write!(f, "mutation"),
            Self::Subscription => write!(f, "subscription"),
        }
    }
}

impl OperationKind {
    /// Classifies a document by its leading keyword.
    ///
    /// Anything that does not start with `mutation` or `subscription` is a
    /// query; this covers the `query` keyword and the anonymous `{ ... }`
    /// shorthand. Classification is explicit so a subscription is never
    /// silently treated as a query or mutation.
    #[must_use]
    pub fn classify(document: &str) -> Self {
        let trimmed = document.trim_start();
        if trimmed.starts_with("subscription") {
            Self::Subscription
        } else if trimmed.starts_with("mutation") {
            Self::Mutation
        } else {
            Self::Query
        }
    }
}

/// Error returned when an [`Operation`] fails validation on construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidOperationError {
    /// The document text is empty.
    ///
    /// The document is always required, even for persisted documents: the
    /// POST fallback and APQ hashing both need it.
    #[error("GraphQL document cannot be empty. The full document text is required even when a persisted-document id is supplied.")]
    EmptyDocument,
}

/// A host-supplied GraphQL document that may carry its own
/// persisted-document id.
///
/// Code-generation tools commonly attach a server-recognized identifier to
/// the documents they emit. This trait keeps that mechanism out of the
/// client core: implement it however your document values are produced and
/// use [`Operation::from_persisted`] to build operations from them.
///
/// # Example
///
/// ```rust
/// use graphql_apq::{Operation, PersistedDocument};
///
/// struct GeneratedDocument {
///     text: &'static str,
///     id: &'static str,
/// }
///
/// impl PersistedDocument for GeneratedDocument {
///     fn document(&self) -> &str {
///         self.text
///     }
///
///     fn document_id(&self) -> Option<&str> {
///         Some(self.id)
///     }
/// }
///
/// let doc = GeneratedDocument {
///     text: "query ListPosts { posts { id } }",
///     id: "posts-v1",
/// };
///
/// let operation = Operation::from_persisted(&doc, None).unwrap();
/// assert_eq!(operation.document_id(), Some("posts-v1"));
/// ```
pub trait PersistedDocument {
    /// Returns the full GraphQL document text.
    fn document(&self) -> &str;

    /// Returns the server-recognized persisted-document id, if any.
    fn document_id(&self) -> Option<&str> {
        None
    }
}

/// One GraphQL operation: document text, kind, name, optional
/// persisted-document id, and variables.
///
/// Created once per call via [`Operation::builder`] and immutable
/// afterward. The document text is always retained, even when a
/// persisted-document id is present, because the POST fallback and APQ
/// hashing need it.
///
/// # Example
///
/// ```rust
/// use graphql_apq::{Operation, OperationKind};
///
/// let operation = Operation::builder("mutation CreatePost { createPost { id } }")
///     .document_id("create-post-v2")
///     .build()
///     .unwrap();
///
/// assert_eq!(operation.kind(), OperationKind::Mutation);
/// assert_eq!(operation.name(), "CreatePost");
/// assert_eq!(operation.document_id(), Some("create-post-v2"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    kind: OperationKind,
    name: String,
    document: String,
    document_id: Option<String>,
    variables: Option<serde_json::Value>,
}

impl Operation {
    /// Creates a new builder for constructing an `Operation`.
    #[must_use]
    pub fn builder(document: impl Into<String>) -> OperationBuilder {
        OperationBuilder::new(document)
    }

    /// Builds an operation from a host-supplied persisted document.
    ///
    /// The document text and id are read through the
    /// [`PersistedDocument`] trait.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperationError::EmptyDocument`] if the document
    /// text is empty.
    pub fn from_persisted(
        doc: &impl PersistedDocument,
        variables: Option<serde_json::Value>,
    ) -> Result<Self, InvalidOperationError> {
        let mut builder = Self::builder(doc.document());
        if let Some(id) = doc.document_id() {
            builder = builder.document_id(id);
        }
        if let Some(variables) = variables {
            builder = builder.variables(variables);
        }
        builder.build()
    }

    /// Returns the classified operation kind.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Returns the operation name.
    ///
    /// Extracted from the document text; falls back to
    /// [`FALLBACK_OPERATION_NAME`] when the document has no named
    /// operation. Advisory only: used for tracing and debug query
    /// parameters, never for strategy decisions.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full GraphQL document text.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Returns the persisted-document id, if present.
    #[must_use]
    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    /// Returns the variables, if present.
    #[must_use]
    pub const fn variables(&self) -> Option<&serde_json::Value> {
        self.variables.as_ref()
    }
}

// Verify Operation is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Operation>();
};

/// Extracts the operation name from a document.
///
/// Matches the operation keyword followed by an identifier. A missing match
/// yields the fallback label rather than an error; name extraction must
/// never fail the request.
fn extract_name(document: &str) -> String {
    OPERATION_NAME
        .captures(document)
        .and_then(|captures| captures.get(2))
        .map_or_else(
            || FALLBACK_OPERATION_NAME.to_string(),
            |m| m.as_str().to_string(),
        )
}

/// Builder for constructing [`Operation`] instances.
#[derive(Debug)]
pub struct OperationBuilder {
    document: String,
    document_id: Option<String>,
    variables: Option<serde_json::Value>,
}

impl OperationBuilder {
    /// Creates a new builder with the required document text.
    fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            document_id: None,
            variables: None,
        }
    }

    /// Sets the persisted-document id.
    #[must_use]
    pub fn document_id(mut self, id: impl Into<String>) -> Self {
        self.document_id = Some(id.into());
        self
    }

    /// Sets the operation variables.
    #[must_use]
    pub fn variables(mut self, variables: impl Into<serde_json::Value>) -> Self {
        self.variables = Some(variables.into());
        self
    }

    /// Builds the [`Operation`], classifying its kind and extracting its
    /// name from the document text.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperationError::EmptyDocument`] if the document
    /// text is empty.
    pub fn build(self) -> Result<Operation, InvalidOperationError> {
        if self.document.trim().is_empty() {
            return Err(InvalidOperationError::EmptyDocument);
        }

        Ok(Operation {
            kind: OperationKind::classify(&self.document),
            name: extract_name(&self.document),
            document: self.document,
            document_id: self.document_id,
            variables: self.variables,
        })
    }
}
