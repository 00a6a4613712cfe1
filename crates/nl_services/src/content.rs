use async_trait::async_trait;
use nl_core::{Article, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::http::{build_client, check, endpoint};

#[async_trait]
pub trait ContentService: Send + Sync {
    async fn list_articles(&self) -> Result<Vec<Article>>;

    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        Ok(self.list_articles().await?.into_iter().find(|a| a.id == id))
    }
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    data: Vec<Article>,
}

pub struct HttpContent {
    client: Client,
    base: Url,
}

impl HttpContent {
    pub fn new(base: Url) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base,
        })
    }
}

#[async_trait]
impl ContentService for HttpContent {
    async fn list_articles(&self) -> Result<Vec<Article>> {
        let url = endpoint(&self.base, &["contents"])?;
        let response = check(self.client.get(url).send().await?).await?;
        let contents: ContentsResponse = response.json().await?;
        debug!("Fetched {} articles", contents.data.len());
        Ok(contents.data)
    }
}
