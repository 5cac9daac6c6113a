//! Persisted query extension builder for APQ.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// APQ protocol version recognized by Apollo-convention servers.
pub const PERSISTED_QUERY_VERSION: u32 = 1;

/// The persisted-query extension sent to APQ-compatible servers.
///
/// Serializes to the Apollo-convention shape:
///
/// ```json
/// {"persistedQuery":{"version":1,"sha256Hash":"<hex digest>"}}
/// ```
///
/// The hash is a pure function of the exact document text (UTF-8 bytes, no
/// whitespace normalization), so identical documents always produce
/// identical extensions. Recomputed per request; caching is left to the
/// host application.
///
/// # Example
///
/// ```rust
/// use graphql_apq::PersistedQueryExtension;
///
/// let extension = PersistedQueryExtension::new("query ListPosts { posts { id } }");
/// assert_eq!(extension.sha256_hash().len(), 64);
///
/// let again = PersistedQueryExtension::new("query ListPosts { posts { id } }");
/// assert_eq!(extension, again);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PersistedQueryExtension {
    /// The inner persisted-query descriptor.
    #[serde(rename = "persistedQuery")]
    pub persisted_query: PersistedQuery,
}

/// The inner `persistedQuery` descriptor: protocol version and content hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PersistedQuery {
    /// The APQ protocol version. Always [`PERSISTED_QUERY_VERSION`].
    pub version: u32,
    /// Hex-encoded SHA-256 digest of the document text.
    #[serde(rename = "sha256Hash")]
    pub sha256_hash: String,
}

impl PersistedQueryExtension {
    /// Builds the extension for the given document text.
    ///
    /// Computes SHA-256 over the exact document bytes and hex-encodes the
    /// digest.
    #[must_use]
    pub fn new(document: &str) -> Self {
        let hash = hex::encode(Sha256::digest(document.as_bytes()));
        Self {
            persisted_query: PersistedQuery {
                version: PERSISTED_QUERY_VERSION,
                sha256_hash: hash,
            },
        }
    }

    /// Returns the hex-encoded SHA-256 digest of the document.
    #[must_use]
    pub fn sha256_hash(&self) -> &str {
        &self.persisted_query.sha256_hash
    }
}
