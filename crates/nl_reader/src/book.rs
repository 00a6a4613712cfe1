use nl_core::text::SavedWords;
use nl_core::{SavedSentence, VocabularyWord};
use std::sync::Arc;

/// Immutable view of the user's saved words and sentences.
///
/// Cloning is cheap. Mutations on the owning [`crate::Annotator`] produce a
/// new snapshot and never touch ones already handed out.
#[derive(Debug, Clone, Default)]
pub struct VocabularySnapshot {
    words: Arc<Vec<VocabularyWord>>,
    sentences: Arc<Vec<SavedSentence>>,
}

impl VocabularySnapshot {
    pub fn new(words: Vec<VocabularyWord>, sentences: Vec<SavedSentence>) -> Self {
        Self {
            words: Arc::new(words),
            sentences: Arc::new(sentences),
        }
    }

    pub fn words(&self) -> &[VocabularyWord] {
        &self.words
    }

    pub fn sentences(&self) -> &[SavedSentence] {
        &self.sentences
    }

    pub fn is_word_saved(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.words.iter().any(|w| w.word.to_lowercase() == word)
    }

    pub fn saved_words(&self) -> SavedWords {
        SavedWords::from_words(self.words.iter().map(|w| w.word.as_str()))
    }

    pub fn search_words(&self, term: &str) -> Vec<&VocabularyWord> {
        let term = term.to_lowercase();
        self.words
            .iter()
            .filter(|w| {
                w.word.to_lowercase().contains(&term) || w.definition.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn search_sentences(&self, term: &str) -> Vec<&SavedSentence> {
        let term = term.to_lowercase();
        self.sentences
            .iter()
            .filter(|s| {
                s.sentence.to_lowercase().contains(&term)
                    || s.context.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub(crate) fn with_word(&self, word: VocabularyWord) -> Self {
        let mut words = self.words.as_ref().clone();
        words.push(word);
        Self {
            words: Arc::new(words),
            sentences: self.sentences.clone(),
        }
    }

    pub(crate) fn without_word(&self, id: &str) -> Self {
        Self {
            words: Arc::new(self.words.iter().filter(|w| w.id != id).cloned().collect()),
            sentences: self.sentences.clone(),
        }
    }

    pub(crate) fn with_sentence(&self, sentence: SavedSentence) -> Self {
        let mut sentences = self.sentences.as_ref().clone();
        sentences.push(sentence);
        Self {
            words: self.words.clone(),
            sentences: Arc::new(sentences),
        }
    }

    pub(crate) fn without_sentence(&self, id: &str) -> Self {
        Self {
            words: self.words.clone(),
            sentences: Arc::new(self.sentences.iter().filter(|s| s.id != id).cloned().collect()),
        }
    }
}
