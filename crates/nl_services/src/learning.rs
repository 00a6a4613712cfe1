use async_trait::async_trait;
use nl_core::{
    Error, NewSavedSentence, NewVocabularyWord, Result, SavedSentence, VocabularyWord,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::debug;
use url::Url;

use crate::credentials::Credential;
use crate::http::{build_client, check, endpoint};

/// The learning service: a user's saved words and sentences.
#[async_trait]
pub trait LearningService: Send + Sync {
    async fn list_words(&self) -> Result<Vec<VocabularyWord>>;

    async fn create_word(&self, word: &NewVocabularyWord) -> Result<VocabularyWord>;

    async fn delete_word(&self, id: &str) -> Result<()>;

    async fn list_sentences(&self) -> Result<Vec<SavedSentence>>;

    async fn create_sentence(&self, sentence: &NewSavedSentence) -> Result<SavedSentence>;

    async fn delete_sentence(&self, id: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct VocabulariesResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    vocabularies: Vec<VocabularyWord>,
}

#[derive(Debug, Deserialize)]
struct SentencesResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    sentences: Vec<SavedSentence>,
}

/// A missing or null list means the user has nothing saved yet.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Create endpoints answer with the record itself or wrapped in `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Created<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Created<T> {
    fn into_inner(self) -> T {
        match self {
            Created::Wrapped { data } => data,
            Created::Bare(record) => record,
        }
    }
}

const VOCABULARIES: &str = "vocabularies";
const SENTENCES: &str = "sentences";

pub struct HttpLearning {
    client: Client,
    base: Url,
    credential: Option<Credential>,
}

impl HttpLearning {
    /// Without a credential every call fails with `Error::Unauthenticated`
    /// before anything is sent.
    pub fn new(base: Url, credential: Option<Credential>) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base,
            credential,
        })
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let credential = self.credential.as_ref().ok_or(Error::Unauthenticated)?;
        Ok(request.bearer_auth(credential.token()))
    }

    async fn get<T: DeserializeOwned>(&self, resource: &str) -> Result<T> {
        let url = endpoint(&self.base, &[resource])?;
        debug!("GET {}", url);
        let response = self.authorize(self.client.get(url))?.send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn post<B, T>(&self, resource: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = endpoint(&self.base, &[resource])?;
        debug!("POST {}", url);
        let response = self.authorize(self.client.post(url).json(body))?.send().await?;
        let created: Created<T> = check(response).await?.json().await?;
        Ok(created.into_inner())
    }

    async fn delete(&self, resource: &str, id: &str) -> Result<()> {
        let url = endpoint(&self.base, &[resource, id])?;
        debug!("DELETE {}", url);
        let response = self.authorize(self.client.delete(url))?.send().await?;
        check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl LearningService for HttpLearning {
    async fn list_words(&self) -> Result<Vec<VocabularyWord>> {
        let response: VocabulariesResponse = self.get(VOCABULARIES).await?;
        Ok(response.vocabularies)
    }

    async fn create_word(&self, word: &NewVocabularyWord) -> Result<VocabularyWord> {
        self.post(VOCABULARIES, word).await
    }

    async fn delete_word(&self, id: &str) -> Result<()> {
        self.delete(VOCABULARIES, id).await
    }

    async fn list_sentences(&self) -> Result<Vec<SavedSentence>> {
        let response: SentencesResponse = self.get(SENTENCES).await?;
        Ok(response.sentences)
    }

    async fn create_sentence(&self, sentence: &NewSavedSentence) -> Result<SavedSentence> {
        self.post(SENTENCES, sentence).await
    }

    async fn delete_sentence(&self, id: &str) -> Result<()> {
        self.delete(SENTENCES, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_accepts_both_shapes() {
        let bare: Created<VocabularyWord> = serde_json::from_str(
            r#"{"_id":"w1","word":"loyal","definition":"faithful","sentence":"","articleId":"a","articleTitle":"A"}"#,
        )
        .unwrap();
        assert_eq!(bare.into_inner().id, "w1");

        let wrapped: Created<VocabularyWord> = serde_json::from_str(
            r#"{"data":{"id":"w2","word":"loyal","definition":"faithful","articleId":"a","articleTitle":"A"}}"#,
        )
        .unwrap();
        assert_eq!(wrapped.into_inner().id, "w2");
    }

    #[test]
    fn test_missing_or_null_lists_are_empty() {
        let missing: SentencesResponse = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert!(missing.sentences.is_empty());

        let null: VocabulariesResponse =
            serde_json::from_str(r#"{"vocabularies":null}"#).unwrap();
        assert!(null.vocabularies.is_empty());
    }

    #[tokio::test]
    async fn test_unauthenticated_fails_fast() {
        // Nothing listens on port 9; an attempted request would surface as a network error.
        let base = Url::parse("http://127.0.0.1:9").unwrap();
        let service = HttpLearning::new(base, None).unwrap();
        assert!(matches!(service.list_words().await, Err(Error::Unauthenticated)));
        assert!(matches!(service.delete_sentence("s1").await, Err(Error::Unauthenticated)));
    }
}
