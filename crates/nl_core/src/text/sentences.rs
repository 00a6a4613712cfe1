use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TERMINATORS: Regex = Regex::new(r"[.!?]+").unwrap();
}

const TERMINAL_CHARS: [char; 3] = ['.', '!', '?'];

/// An article body split into sentence fragments, in reading order.
///
/// Lookups resolve to the first matching fragment. A word that occurs in
/// several sentences always maps to its first occurrence.
#[derive(Debug, Clone)]
pub struct SentenceIndex<'a> {
    fragments: Vec<&'a str>,
}

impl<'a> SentenceIndex<'a> {
    pub fn new(body: &'a str) -> Self {
        let fragments = TERMINATORS
            .split(body)
            .filter(|fragment| !fragment.trim().is_empty())
            .collect();
        Self { fragments }
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Trimmed fragments.
    pub fn sentences(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.fragments.iter().map(|f| f.trim())
    }

    /// The first sentence mentioning `word`, compared case-insensitively.
    /// Returns an empty string when no sentence does.
    pub fn containing_sentence(&self, word: &str) -> String {
        let needle = word.to_lowercase();
        self.fragments
            .iter()
            .find(|fragment| fragment.to_lowercase().contains(&needle))
            .map(|fragment| format!("{}.", fragment.trim()))
            .unwrap_or_default()
    }

    /// The first sentence containing `selection` plus one neighbour on each
    /// side, joined back into prose.
    ///
    /// Matching is case-sensitive. If nothing matches, only the first
    /// sentence is returned.
    pub fn context_window(&self, selection: &str) -> String {
        if self.fragments.is_empty() {
            return String::new();
        }

        let needle = selection.trim().trim_end_matches(TERMINAL_CHARS).trim_end();
        let (start, end) = match self.anchor(needle) {
            Some(index) => (
                index.saturating_sub(1),
                (index + 2).min(self.fragments.len()),
            ),
            None => (0, 1),
        };

        let window = self.fragments[start..end]
            .iter()
            .map(|f| f.trim())
            .collect::<Vec<_>>()
            .join(". ");
        format!("{}.", window)
    }

    fn anchor(&self, needle: &str) -> Option<usize> {
        self.fragments.iter().position(|f| f.contains(needle))
    }
}

pub fn containing_sentence(body: &str, word: &str) -> String {
    SentenceIndex::new(body).containing_sentence(word)
}

pub fn context_window(body: &str, selection: &str) -> String {
    SentenceIndex::new(body).context_window(selection)
}
