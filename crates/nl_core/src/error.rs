use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No response from server: {0}")]
    Network(String),

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not signed in")]
    Unauthenticated,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            if status == reqwest::StatusCode::NOT_FOUND {
                return Error::NotFound(err.to_string());
            }
            return Error::backend(status.as_u16(), err.to_string());
        }
        if err.is_decode() {
            return Error::External(anyhow::anyhow!("Malformed response body: {}", err));
        }
        Error::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::backend(500, "boom");
        assert_eq!(err.to_string(), "Backend error (500): boom");
        assert_eq!(Error::Unauthenticated.to_string(), "Not signed in");
    }
}
