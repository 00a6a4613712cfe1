use nl_core::text::{highlight, SavedWords, Selection, SentenceIndex, Token};
use nl_core::{Article, Result, SavedSentence, VocabularyWord, WordDefinition};
use nl_services::DictionaryService;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::annotator::Annotator;

/// Result of a dictionary lookup, tagged with the selection it was issued for.
#[derive(Debug)]
pub struct LookupOutcome {
    generation: u64,
    definition: Option<WordDefinition>,
}

/// One article being read, and whatever the reader currently has selected in it.
///
/// Each new selection gets a fresh generation number. A lookup that
/// finishes after the selection changed is dropped instead of replacing
/// the newer selection's definition.
pub struct ReadingSession {
    article: Article,
    dictionary: Arc<dyn DictionaryService>,
    generation: u64,
    selection: Option<Selection>,
    definition: Option<WordDefinition>,
    pending: Option<JoinHandle<()>>,
    outcomes_tx: mpsc::UnboundedSender<LookupOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<LookupOutcome>,
}

impl ReadingSession {
    pub fn new(article: Article, dictionary: Arc<dyn DictionaryService>) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            article,
            dictionary,
            generation: 0,
            selection: None,
            definition: None,
            pending: None,
            outcomes_tx,
            outcomes_rx,
        }
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn definition(&self) -> Option<&WordDefinition> {
        self.definition.as_ref()
    }

    pub fn is_lookup_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Replaces the current selection. Blank input is ignored.
    ///
    /// Single words start a dictionary lookup in the background; the form
    /// stays usable whether or not it ever produces a definition.
    pub fn select(&mut self, raw: &str) -> Option<&Selection> {
        let selection = Selection::capture(raw)?;

        self.cancel_lookup();
        self.generation += 1;
        self.definition = None;

        if selection.is_single_word() {
            self.spawn_lookup(selection.text().to_string());
        }
        self.selection = Some(selection);
        self.selection.as_ref()
    }

    /// Drops the selection and any definition, as when the dialog closes.
    pub fn clear(&mut self) {
        self.cancel_lookup();
        self.generation += 1;
        self.selection = None;
        self.definition = None;
    }

    fn cancel_lookup(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    fn spawn_lookup(&mut self, word: String) {
        let dictionary = self.dictionary.clone();
        let tx = self.outcomes_tx.clone();
        let generation = self.generation;

        self.pending = Some(tokio::spawn(async move {
            let definition = match dictionary.lookup(&word).await {
                Ok(definition) => Some(definition),
                Err(e) => {
                    debug!("No definition for {:?}: {}", word, e);
                    None
                }
            };
            let _ = tx.send(LookupOutcome {
                generation,
                definition,
            });
        }));
    }

    /// Applies a finished lookup. Returns false when it belongs to an older selection.
    pub fn apply_lookup(&mut self, outcome: LookupOutcome) -> bool {
        if outcome.generation != self.generation {
            debug!(
                "Discarding lookup for selection {} (current {})",
                outcome.generation, self.generation
            );
            return false;
        }
        self.pending = None;
        self.definition = outcome.definition;
        true
    }

    /// Applies every lookup that has already finished.
    ///
    /// A lookup task that ended without reporting (it panicked) counts as
    /// "no definition".
    pub fn poll_lookups(&mut self) {
        // Checked before draining: a finished task has already sent its outcome.
        let finished = self.pending.as_ref().is_some_and(|h| h.is_finished());
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            self.apply_lookup(outcome);
        }
        if finished && self.pending.take().is_some() {
            warn!("Lookup ended without an answer");
            self.definition = None;
        }
    }

    /// Waits for the current selection's lookup, if one is running.
    pub async fn wait_for_definition(&mut self) -> Option<&WordDefinition> {
        if let Some(handle) = self.pending.take() {
            if let Err(e) = handle.await {
                warn!("Lookup ended without an answer: {}", e);
                self.definition = None;
            }
        }
        self.poll_lookups();
        self.definition.as_ref()
    }

    /// The first article sentence containing the selected text.
    pub fn containing_sentence(&self) -> Option<String> {
        let selection = self.selection.as_ref()?;
        Some(SentenceIndex::new(&self.article.content).containing_sentence(selection.text()))
    }

    /// The selected sentence with its neighbours.
    pub fn context_window(&self) -> Option<String> {
        let selection = self.selection.as_ref()?;
        Some(SentenceIndex::new(&self.article.content).context_window(selection.text()))
    }

    /// Saves the selection as a vocabulary word. The selection is kept on
    /// failure so the user can retry.
    pub async fn save_word(
        &mut self,
        annotator: &mut Annotator,
        definition: &str,
    ) -> Result<VocabularyWord> {
        let Some(selection) = self.selection.clone() else {
            return Err(nl_core::Error::Validation("nothing is selected".to_string()));
        };
        let saved = annotator
            .save_word_from(&self.article, selection.text(), definition)
            .await?;
        self.clear();
        Ok(saved)
    }

    /// Saves the selection as a sentence with its surrounding context.
    pub async fn save_sentence(&mut self, annotator: &mut Annotator) -> Result<SavedSentence> {
        let Some(selection) = self.selection.clone() else {
            return Err(nl_core::Error::Validation("nothing is selected".to_string()));
        };
        let saved = annotator
            .save_sentence_from(&self.article, selection.text())
            .await?;
        self.clear();
        Ok(saved)
    }

    /// Article paragraphs tokenized for display, saved words marked.
    pub fn render<'a>(&'a self, saved: &SavedWords) -> Vec<Vec<Token<'a>>> {
        self.article
            .paragraphs()
            .into_iter()
            .map(|paragraph| highlight(paragraph, saved))
            .collect()
    }
}

impl Drop for ReadingSession {
    fn drop(&mut self) {
        self.cancel_lookup();
    }
}
