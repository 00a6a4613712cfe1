use nl_core::{Level, Result, User};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::credentials::Credential;
use crate::http::{build_client, check, endpoint};

#[derive(Debug, Serialize)]
struct CodeExchange<'a> {
    code: &'a str,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct TokenData {
    token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Profile {
    #[serde(alias = "_id")]
    id: String,
    name: String,
    email: String,
    #[serde(default)]
    profile_image: Option<String>,
    level: Level,
}

/// Client for the user service: OAuth code exchange and profile lookup.
pub struct UserClient {
    client: Client,
    base: Url,
}

impl UserClient {
    pub fn new(base: Url) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base,
        })
    }

    /// Trades an OAuth authorization code for a bearer token.
    pub async fn exchange_code(&self, code: &str) -> Result<Credential> {
        let url = endpoint(&self.base, &["oauth", "google"])?;
        let response = self
            .client
            .post(url)
            .json(&CodeExchange { code })
            .send()
            .await?;
        let envelope: Envelope<TokenData> = check(response).await?.json().await?;
        Ok(Credential::new(envelope.data.token))
    }

    pub async fn profile(&self, credential: &Credential) -> Result<User> {
        let url = endpoint(&self.base, &["profile"])?;
        let response = self
            .client
            .get(url)
            .bearer_auth(credential.token())
            .send()
            .await?;
        let envelope: Envelope<Profile> = check(response).await?.json().await?;
        let profile = envelope.data;

        Ok(User {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            avatar: profile.profile_image,
            level: profile.level,
            token: credential.token().to_string(),
        })
    }

    /// Completes a sign-in: code exchange followed by the profile fetch.
    pub async fn login(&self, code: &str) -> Result<User> {
        let credential = self.exchange_code(code).await?;
        let user = self.profile(&credential).await?;
        info!("Signed in as {} ({})", user.name, user.level);
        Ok(user)
    }
}
