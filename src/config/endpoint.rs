//! Validated endpoint URL newtype.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::ConfigError;

/// A validated GraphQL endpoint URL.
///
/// Wraps a parsed [`url::Url`] and guarantees on construction that the URL
/// is absolute and uses the `http` or `https` scheme. Validation happens
/// once, so request building never has to re-check the endpoint.
///
/// # Example
///
/// ```rust
/// use graphql_apq::EndpointUrl;
///
/// let endpoint = EndpointUrl::new("https://api.example.com/graphql").unwrap();
/// assert_eq!(endpoint.as_str(), "https://api.example.com/graphql");
///
/// assert!(EndpointUrl::new("ftp://api.example.com").is_err());
/// assert!(EndpointUrl::new("/graphql").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointUrl {
    url: Url,
}

impl EndpointUrl {
    /// Creates a new validated endpoint URL.
    ///
    /// Leading and trailing whitespace is trimmed before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpointUrl`] if the URL cannot be
    /// parsed as an absolute URL, or if its scheme is not `http` or `https`.
    pub fn new(url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = url.as_ref().trim();

        let parsed = Url::parse(raw).map_err(|_| ConfigError::InvalidEndpointUrl {
            url: raw.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpointUrl {
                url: raw.to_string(),
            });
        }

        Ok(Self { url: parsed })
    }

    /// Returns the parsed URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

impl FromStr for EndpointUrl {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for EndpointUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
