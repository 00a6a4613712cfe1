use nl_core::{Error, Result};
use std::env;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_DICTIONARY_API: &str = "https://api.dictionaryapi.dev/api/v2/entries";

const USER_API_VAR: &str = "NEWSLINGO_USER_API";
const CONTENT_API_VAR: &str = "NEWSLINGO_CONTENT_API";
const LEARNING_API_VAR: &str = "NEWSLINGO_LEARNING_API";
const DICTIONARY_API_VAR: &str = "NEWSLINGO_DICTIONARY_API";
const CREDENTIALS_VAR: &str = "NEWSLINGO_CREDENTIALS";

/// Base URLs of the backing services plus where the signed-in session lives.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub user_api: Url,
    pub content_api: Url,
    pub learning_api: Url,
    pub dictionary_api: Url,
    pub credentials_path: PathBuf,
}

impl ServiceConfig {
    pub fn new(
        user_api: &str,
        content_api: &str,
        learning_api: &str,
        dictionary_api: &str,
        credentials_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        Ok(Self {
            user_api: parse_base(user_api)?,
            content_api: parse_base(content_api)?,
            learning_api: parse_base(learning_api)?,
            dictionary_api: parse_base(dictionary_api)?,
            credentials_path: credentials_path.into(),
        })
    }

    pub fn from_env() -> Result<Self> {
        let user_api =
            env::var(USER_API_VAR).unwrap_or_else(|_| "http://localhost:4000".to_string());
        let content_api =
            env::var(CONTENT_API_VAR).unwrap_or_else(|_| "http://localhost:4001".to_string());
        let learning_api =
            env::var(LEARNING_API_VAR).unwrap_or_else(|_| "http://localhost:4002".to_string());
        let dictionary_api =
            env::var(DICTIONARY_API_VAR).unwrap_or_else(|_| DEFAULT_DICTIONARY_API.to_string());
        let credentials_path = env::var(CREDENTIALS_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_credentials_path());

        Self::new(&user_api, &content_api, &learning_api, &dictionary_api, credentials_path)
    }

    pub fn with_user_api(mut self, url: &str) -> Result<Self> {
        self.user_api = parse_base(url)?;
        Ok(self)
    }

    pub fn with_content_api(mut self, url: &str) -> Result<Self> {
        self.content_api = parse_base(url)?;
        Ok(self)
    }

    pub fn with_learning_api(mut self, url: &str) -> Result<Self> {
        self.learning_api = parse_base(url)?;
        Ok(self)
    }

    pub fn with_dictionary_api(mut self, url: &str) -> Result<Self> {
        self.dictionary_api = parse_base(url)?;
        Ok(self)
    }

    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = path.into();
        self
    }
}

fn parse_base(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidUrl(format!("{} cannot be used as a base URL", raw)));
    }
    Ok(url)
}

fn default_credentials_path() -> PathBuf {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir())
        .join(".newslingo")
        .join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base() {
        let result = ServiceConfig::new(
            "not a url",
            "http://content",
            "http://learning",
            DEFAULT_DICTIONARY_API,
            "/tmp/s.json",
        );
        assert!(matches!(result, Err(Error::InvalidUrl(_))));

        let result = ServiceConfig::new(
            "mailto:someone@example.com",
            "http://content",
            "http://learning",
            DEFAULT_DICTIONARY_API,
            "/tmp/s.json",
        );
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::new(
            "http://user",
            "http://content",
            "http://learning",
            DEFAULT_DICTIONARY_API,
            "/tmp/s.json",
        )
        .unwrap()
        .with_learning_api("http://127.0.0.1:9000/api")
        .unwrap()
        .with_credentials_path("/tmp/other.json");

        assert_eq!(config.learning_api.as_str(), "http://127.0.0.1:9000/api");
        assert_eq!(config.credentials_path, PathBuf::from("/tmp/other.json"));
    }
}
