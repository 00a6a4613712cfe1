use nl_core::text::SentenceIndex;
use nl_core::{
    Article, Error, NewSavedSentence, NewVocabularyWord, Result, SavedSentence, VocabularyWord,
};
use nl_services::LearningService;
use std::sync::Arc;
use tracing::{info, warn};

use crate::book::VocabularySnapshot;

/// Owns the user's vocabulary and writes every change through the learning
/// service.
///
/// Local state changes only after the backend confirms, so a failed call
/// leaves the current snapshot exactly as it was.
pub struct Annotator {
    service: Arc<dyn LearningService>,
    snapshot: VocabularySnapshot,
}

impl Annotator {
    pub fn new(service: Arc<dyn LearningService>) -> Self {
        Self {
            service,
            snapshot: VocabularySnapshot::default(),
        }
    }

    /// Builds an annotator and loads the user's lists.
    pub async fn load(service: Arc<dyn LearningService>) -> Result<Self> {
        let mut annotator = Self::new(service);
        annotator.refresh().await?;
        Ok(annotator)
    }

    pub fn snapshot(&self) -> VocabularySnapshot {
        self.snapshot.clone()
    }

    pub fn is_word_saved(&self, word: &str) -> bool {
        self.snapshot.is_word_saved(word)
    }

    pub async fn refresh(&mut self) -> Result<VocabularySnapshot> {
        let words = self.service.list_words().await.map_err(|e| {
            warn!("Fetching vocabularies failed: {}", e);
            e
        })?;
        let sentences = self.service.list_sentences().await.map_err(|e| {
            warn!("Fetching sentences failed: {}", e);
            e
        })?;
        self.snapshot = VocabularySnapshot::new(words, sentences);
        Ok(self.snapshot())
    }

    pub async fn save_word(
        &mut self,
        word: &str,
        definition: &str,
        sentence: &str,
        article_id: &str,
        article_title: &str,
    ) -> Result<VocabularyWord> {
        if word.trim().is_empty() {
            return Err(Error::Validation("word must not be empty".to_string()));
        }
        if definition.trim().is_empty() {
            return Err(Error::Validation("definition must not be empty".to_string()));
        }

        let request = NewVocabularyWord {
            word: word.to_string(),
            definition: definition.to_string(),
            sentence: sentence.to_string(),
            article_id: article_id.to_string(),
            article_title: article_title.to_string(),
        };
        let created = self.service.create_word(&request).await.map_err(|e| {
            warn!("Adding vocabulary {:?} failed: {}", word, e);
            e
        })?;

        info!("Saved word {:?}", created.word);
        self.snapshot = self.snapshot.with_word(created.clone());
        Ok(created)
    }

    pub async fn save_sentence(
        &mut self,
        sentence: &str,
        context: &str,
        article_id: &str,
        article_title: &str,
    ) -> Result<SavedSentence> {
        if sentence.trim().is_empty() {
            return Err(Error::Validation("sentence must not be empty".to_string()));
        }

        let request = NewSavedSentence {
            sentence: sentence.to_string(),
            context: context.to_string(),
            article_id: article_id.to_string(),
            article_title: article_title.to_string(),
        };
        let created = self.service.create_sentence(&request).await.map_err(|e| {
            warn!("Adding sentence failed: {}", e);
            e
        })?;

        info!("Saved sentence {:?}", created.sentence);
        self.snapshot = self.snapshot.with_sentence(created.clone());
        Ok(created)
    }

    pub async fn remove_word(&mut self, id: &str) -> Result<()> {
        self.service.delete_word(id).await.map_err(|e| {
            warn!("Deleting vocabulary {} failed: {}", id, e);
            e
        })?;
        self.snapshot = self.snapshot.without_word(id);
        Ok(())
    }

    pub async fn remove_sentence(&mut self, id: &str) -> Result<()> {
        self.service.delete_sentence(id).await.map_err(|e| {
            warn!("Deleting sentence {} failed: {}", id, e);
            e
        })?;
        self.snapshot = self.snapshot.without_sentence(id);
        Ok(())
    }

    /// Saves `word` with the first sentence of `article` that mentions it.
    pub async fn save_word_from(
        &mut self,
        article: &Article,
        word: &str,
        definition: &str,
    ) -> Result<VocabularyWord> {
        let sentence = SentenceIndex::new(&article.content).containing_sentence(word);
        self.save_word(word, definition, &sentence, &article.id, &article.title)
            .await
    }

    /// Saves `sentence` together with its neighbours in `article`.
    pub async fn save_sentence_from(
        &mut self,
        article: &Article,
        sentence: &str,
    ) -> Result<SavedSentence> {
        let context = SentenceIndex::new(&article.content).context_window(sentence);
        self.save_sentence(sentence, &context, &article.id, &article.title)
            .await
    }
}
