use async_trait::async_trait;
use chrono::Utc;
use nl_core::{
    Article, Error, NewSavedSentence, NewVocabularyWord, Result, SavedSentence, VocabularyWord,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::content::ContentService;
use crate::learning::LearningService;

const SAMPLE_ARTICLES: &str = include_str!("../fixtures/sample_articles.json");

/// Articles bundled for offline use.
pub fn sample_articles() -> Result<Vec<Article>> {
    Ok(serde_json::from_str(SAMPLE_ARTICLES)?)
}

#[derive(Default)]
struct LearningStore {
    words: Vec<VocabularyWord>,
    sentences: Vec<SavedSentence>,
}

/// Learning backend kept in process memory.
#[derive(Clone, Default)]
pub struct InMemoryLearning {
    store: Arc<RwLock<LearningStore>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryLearning {
    pub fn new() -> Self {
        Self::default()
    }

    /// While unavailable every call fails with a network error and nothing changes.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::Network("learning service unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl LearningService for InMemoryLearning {
    async fn list_words(&self) -> Result<Vec<VocabularyWord>> {
        self.ensure_available()?;
        Ok(self.store.read().await.words.clone())
    }

    async fn create_word(&self, word: &NewVocabularyWord) -> Result<VocabularyWord> {
        self.ensure_available()?;
        let record = VocabularyWord {
            id: Uuid::new_v4().to_string(),
            word: word.word.clone(),
            definition: word.definition.clone(),
            sentence: word.sentence.clone(),
            article_id: word.article_id.clone(),
            article_title: word.article_title.clone(),
            created_at: Some(Utc::now()),
        };
        self.store.write().await.words.push(record.clone());
        Ok(record)
    }

    async fn delete_word(&self, id: &str) -> Result<()> {
        self.ensure_available()?;
        let mut store = self.store.write().await;
        let before = store.words.len();
        store.words.retain(|w| w.id != id);
        if store.words.len() == before {
            return Err(Error::NotFound(format!("vocabulary {}", id)));
        }
        Ok(())
    }

    async fn list_sentences(&self) -> Result<Vec<SavedSentence>> {
        self.ensure_available()?;
        Ok(self.store.read().await.sentences.clone())
    }

    async fn create_sentence(&self, sentence: &NewSavedSentence) -> Result<SavedSentence> {
        self.ensure_available()?;
        let record = SavedSentence {
            id: Uuid::new_v4().to_string(),
            sentence: sentence.sentence.clone(),
            context: sentence.context.clone(),
            article_id: sentence.article_id.clone(),
            article_title: sentence.article_title.clone(),
            created_at: Some(Utc::now()),
        };
        self.store.write().await.sentences.push(record.clone());
        Ok(record)
    }

    async fn delete_sentence(&self, id: &str) -> Result<()> {
        self.ensure_available()?;
        let mut store = self.store.write().await;
        let before = store.sentences.len();
        store.sentences.retain(|s| s.id != id);
        if store.sentences.len() == before {
            return Err(Error::NotFound(format!("sentence {}", id)));
        }
        Ok(())
    }
}

pub struct InMemoryContent {
    articles: Vec<Article>,
}

impl InMemoryContent {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    pub fn with_sample_articles() -> Result<Self> {
        Ok(Self::new(sample_articles()?))
    }
}

#[async_trait]
impl ContentService for InMemoryContent {
    async fn list_articles(&self) -> Result<Vec<Article>> {
        Ok(self.articles.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_word(word: &str) -> NewVocabularyWord {
        NewVocabularyWord {
            word: word.to_string(),
            definition: "a definition".to_string(),
            sentence: String::new(),
            article_id: "a1".to_string(),
            article_title: "Title".to_string(),
        }
    }

    #[tokio::test]
    async fn test_memory_learning() {
        let service = InMemoryLearning::new();
        let created = service.create_word(&new_word("loyal")).await.unwrap();
        service.create_word(&new_word("loyal")).await.unwrap();
        assert_eq!(service.list_words().await.unwrap().len(), 2);

        service.delete_word(&created.id).await.unwrap();
        assert_eq!(service.list_words().await.unwrap().len(), 1);
        assert!(matches!(
            service.delete_word(&created.id).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unavailable() {
        let service = InMemoryLearning::new();
        service.set_unavailable(true);
        assert!(matches!(
            service.create_word(&new_word("loyal")).await,
            Err(Error::Network(_))
        ));
        service.set_unavailable(false);
        assert!(service.list_words().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sample_articles() {
        let content = InMemoryContent::with_sample_articles().unwrap();
        let articles = content.list_articles().await.unwrap();
        assert!(!articles.is_empty());
        let first = content.get_article(&articles[0].id).await.unwrap();
        assert_eq!(first.as_ref(), Some(&articles[0]));
        assert!(content.get_article("missing").await.unwrap().is_none());
    }
}
