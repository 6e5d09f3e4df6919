// src/types/domain_types.rs
//! Credentials and endpoint roots for the HTTP client.

use super::ValidationError;
use std::fmt;
use std::str::FromStr;
use url::Url;

const KEY_PREFIXES: [&str; 2] = ["secret_", "ntn_"];
const MIN_KEY_LEN: usize = 20;

/// Integration token sent as the bearer credential.
///
/// The token ends up in an `Authorization` header, so it must be printable
/// ASCII. Only its prefix is ever shown by `Display` and `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validates a token, ignoring surrounding whitespace such as the
    /// trailing newline of a key read from a file.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into().trim().to_string();
        let invalid = |reason: &str| ValidationError::InvalidApiKey {
            reason: reason.to_string(),
        };

        if key.is_empty() {
            return Err(invalid("API key cannot be empty"));
        }
        if !KEY_PREFIXES.iter().any(|prefix| key.starts_with(prefix)) {
            return Err(invalid("API key must start with 'secret_' or 'ntn_'"));
        }
        if key.len() < MIN_KEY_LEN {
            return Err(invalid("API key is too short"));
        }
        if !key.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(invalid("API key contains characters not allowed in a header"));
        }

        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn prefix(&self) -> &str {
        KEY_PREFIXES
            .iter()
            .copied()
            .find(|prefix| self.0.starts_with(prefix))
            .unwrap_or_default()
    }
}

impl FromStr for ApiKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}***", self.prefix())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self)
    }
}

/// Root URL that endpoint paths are appended to, e.g. `https://api.notion.com/v1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBaseUrl(Url);

impl ApiBaseUrl {
    /// Accepts http(s) URLs that can take a path and carry no query or fragment.
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: String| ValidationError::InvalidUrl {
            url: url.to_string(),
            reason,
        };

        let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(invalid("Only HTTP and HTTPS URLs are supported".to_string()));
        }
        if parsed.cannot_be_a_base() {
            return Err(invalid("URL cannot take a path".to_string()));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(invalid("Base URL must not carry a query or fragment".to_string()));
        }
        Ok(Self(parsed))
    }

    /// Appends path segments, percent-encoding each one. A trailing slash on
    /// the base does not produce an empty segment.
    pub fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.0.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for ApiBaseUrl {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ApiBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn key_prefix_and_length_are_checked() {
        assert!(ApiKey::new("secret_abcdefghijklmnopqrs").is_ok());
        assert!(ApiKey::new("ntn_abcdefghijklmnopqrs").is_ok());
        assert!(ApiKey::new("").is_err());
        assert!(ApiKey::new("invalid_key_abcdefghijklm").is_err());
        assert!(ApiKey::new("secret_short").is_err());
    }

    #[test]
    fn key_is_trimmed_and_must_fit_a_header() {
        let key = ApiKey::new("  ntn_abcdefghijklmnopqrs\n").unwrap();
        assert_eq!(key.as_str(), "ntn_abcdefghijklmnopqrs");

        assert!(ApiKey::new("secret_abcdef ghijklmnopqrs").is_err());
        assert!(ApiKey::new("secret_abcdéfghijklmnopqrs").is_err());
    }

    #[test]
    fn key_prints_only_its_prefix() {
        let key: ApiKey = "secret_abcdefghijklmnopqrs".parse().unwrap();
        assert_eq!(key.to_string(), "secret_***");
        assert_eq!(format!("{:?}", key), "ApiKey(secret_***)");
    }

    #[test]
    fn base_url_rejects_non_http_and_unusable_roots() {
        assert!(ApiBaseUrl::parse("https://api.notion.com/v1").is_ok());
        assert!(ApiBaseUrl::parse("http://localhost:8080").is_ok());
        assert!(ApiBaseUrl::parse("ftp://example.com").is_err());
        assert!(ApiBaseUrl::parse("not a url").is_err());
        assert!(ApiBaseUrl::parse("https://api.notion.com/v1?debug=1").is_err());
    }

    #[test]
    fn join_appends_encoded_segments() {
        let base = ApiBaseUrl::parse("https://api.notion.com/v1").unwrap();
        assert_eq!(
            base.join(&["blocks", "b-1", "children"]).as_str(),
            "https://api.notion.com/v1/blocks/b-1/children"
        );

        let slashed = ApiBaseUrl::parse("http://localhost:8080/v1/").unwrap();
        assert_eq!(
            slashed.join(&["blocks", "a/b"]).as_str(),
            "http://localhost:8080/v1/blocks/a%2Fb"
        );
    }
}
