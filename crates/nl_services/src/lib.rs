//! Clients for the services behind the reader: content, learning, user and dictionary.

pub mod auth;
pub mod config;
pub mod content;
pub mod credentials;
pub mod dictionary;
pub mod http;
pub mod learning;
pub mod memory;

pub use auth::UserClient;
pub use config::ServiceConfig;
pub use content::{ContentService, HttpContent};
pub use credentials::{Credential, CredentialStore};
pub use dictionary::{DictionaryService, HttpDictionary};
pub use learning::{HttpLearning, LearningService};
pub use memory::{InMemoryContent, InMemoryLearning};

pub mod prelude {
    pub use super::{ContentService, DictionaryService, LearningService};
    pub use nl_core::{Error, Result};
}
