//! Fetching the external document for a record

use std::time::Duration;

use serde_json::Value;

use crate::config::HttpSection;
use crate::error::{Error, Result};

/// Placeholder in `task.base_url` replaced with a record's remote id
pub const ID_PLACEHOLDER: &str = "{{id}}";

/// Substitute `id` for every `{{id}}` in `base_url`.
///
/// ```
/// use json2cf_sync::render_url;
///
/// assert_eq!(
///     render_url("https://api.example.org/organisation/{{id}}", "18262"),
///     "https://api.example.org/organisation/18262"
/// );
/// ```
pub fn render_url(base_url: &str, id: &str) -> String {
    base_url.replace(ID_PLACEHOLDER, id)
}

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Only an exact 200 counts as a usable response
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Transport used to retrieve external documents
///
/// Errors are transport failures only; non-200 responses are returned as
/// responses so the caller can report the status.
pub trait PayloadFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse>;
}

/// Blocking HTTP fetcher
pub struct HttpFetcher {
    http_client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(settings: &HttpSection) -> Result<Self> {
        let http_client = reqwest::blocking::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::HttpClient {
                message: e.to_string(),
            })?;

        Ok(Self { http_client })
    }
}

impl PayloadFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse> {
        tracing::debug!(url = %url, "Fetching external document");

        let fetch_error = |e: reqwest::Error| Error::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.http_client.get(url).send().map_err(fetch_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(fetch_error)?;

        Ok(FetchResponse { status, body })
    }
}

/// Parse a fetched body into a document worth reconciling against.
///
/// Invalid JSON is rejected, and so are documents that carry nothing:
/// `null`, `false`, `0`, `""`, `"0"`, `[]` and `{}`.
pub fn parse_payload(body: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(body).map_err(|e| Error::InvalidPayload {
        reason: e.to_string(),
    })?;

    if is_empty_document(&value) {
        return Err(Error::InvalidPayload {
            reason: "document is empty".to_string(),
        });
    }

    Ok(value)
}

fn is_empty_document(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(members) => members.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_render_url_replaces_every_placeholder() {
        assert_eq!(render_url("https://x/{{id}}?ref={{id}}", "7"), "https://x/7?ref=7");
        assert_eq!(render_url("https://x/static", "7"), "https://x/static");
    }

    #[rstest]
    #[case("null")]
    #[case("false")]
    #[case("0")]
    #[case("0.0")]
    #[case(r#""""#)]
    #[case(r#""0""#)]
    #[case("[]")]
    #[case("{}")]
    fn test_parse_payload_rejects_empty_documents(#[case] body: &str) {
        assert!(matches!(parse_payload(body), Err(Error::InvalidPayload { .. })));
    }

    #[test]
    fn test_parse_payload_rejects_invalid_json() {
        let err = parse_payload("<html>Not found</html>").unwrap_err();
        assert!(matches!(err, Error::InvalidPayload { .. }));
    }

    #[test]
    fn test_parse_payload_accepts_document() {
        assert_eq!(
            parse_payload(r#"{"address": {"zip": "1000"}}"#).unwrap(),
            json!({"address": {"zip": "1000"}})
        );
    }

    #[test]
    fn test_invalid_user_agent_is_a_client_error() {
        let settings = HttpSection {
            timeout_secs: 5,
            user_agent: "json2cf\nbroken".to_string(),
        };

        let err = HttpFetcher::new(&settings).err().unwrap();

        assert!(matches!(err, Error::HttpClient { .. }));
        assert!(err.to_string().starts_with("Failed to build HTTP client"));
    }

    #[test]
    fn test_response_status() {
        assert!(FetchResponse::new(200, "{}").is_ok());
        assert!(!FetchResponse::new(204, "").is_ok());
        assert!(!FetchResponse::new(404, "").is_ok());
    }
}
