//! Shared plumbing for the REST clients.

use nl_core::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// A JSON client with the headers every service expects.
pub fn build_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let client = Client::builder()
        .default_headers(headers)
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}

/// Appends percent-encoded path segments to a service base URL.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| Error::InvalidUrl(format!("{} cannot be used as a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Turns non-2xx responses into errors, keeping the server's message when it sent one.
pub async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
    debug!("{} responded {}: {}", url, status, message);

    if status == StatusCode::NOT_FOUND {
        Err(Error::NotFound(message))
    } else {
        Err(Error::backend(status.as_u16(), message))
    }
}

fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "title", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_base_path() {
        let base = Url::parse("https://api.dictionaryapi.dev/api/v2/entries").unwrap();
        let url = endpoint(&base, &["en", "well-known"]).unwrap();
        assert_eq!(url.as_str(), "https://api.dictionaryapi.dev/api/v2/entries/en/well-known");

        let base = Url::parse("http://localhost:4002/").unwrap();
        let url = endpoint(&base, &["vocabularies", "abc"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:4002/vocabularies/abc");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let base = Url::parse("http://localhost:4002").unwrap();
        let url = endpoint(&base, &["vocabularies", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:4002/vocabularies/a%2Fb%20c");
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"title":"No Definitions Found","message":"Sorry pal"}"#),
            Some("Sorry pal".to_string())
        );
        assert_eq!(
            error_message(r#"{"title":"No Definitions Found"}"#),
            Some("No Definitions Found".to_string())
        );
        assert_eq!(error_message("<html>"), None);
    }
}
