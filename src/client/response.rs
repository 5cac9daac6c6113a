//! HTTP response type for GraphQL requests.

use std::collections::HashMap;

use crate::client::errors::{BodyParseError, ClientError};

/// A buffered response from the GraphQL endpoint.
///
/// The body is read into memory once when the response is received, so it
/// can be inspected more than once without being exhausted: the APQ
/// strategy reads it to check for the not-found signal, and the caller
/// reads it again for the final result.
///
/// # Example
///
/// ```rust,ignore
/// let response = client.execute(&operation, None).await?;
///
/// assert!(response.is_ok());
/// let body = response.json()?;
/// println!("data: {}", body["data"]);
/// ```
#[derive(Clone, Debug)]
pub struct GraphqlResponse {
    status: u16,
    headers: HashMap<String, Vec<String>>,
    body: String,
}

impl GraphqlResponse {
    /// Creates a response from raw parts.
    ///
    /// Header names are expected to be lowercase; [`Self::header`] looks
    /// them up case-insensitively.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Buffers a reqwest response into a `GraphqlResponse`.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`reqwest::Error`] if reading the body fails.
    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self, reqwest::Error> {
        let status = response.status().as_u16();
        let headers = parse_headers(response.headers());
        let body = response.text().await?;

        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns whether the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns all response headers, keyed by lowercase header name.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, Vec<String>> {
        &self.headers
    }

    /// Returns the first value of the named header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the raw response body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the buffered body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::BodyParse`] if the body is not valid JSON,
    /// carrying the response status and the parse error.
    pub fn json(&self) -> Result<serde_json::Value, ClientError> {
        self.json_value().map_err(|source| {
            ClientError::BodyParse(BodyParseError {
                status: self.status,
                source,
            })
        })
    }

    /// Parses the buffered body as JSON without wrapping the error.
    ///
    /// Used internally where a parse failure is a control-flow signal
    /// rather than a client error.
    pub(crate) fn json_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Parses response headers into a lowercase-keyed map.
fn parse_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}
