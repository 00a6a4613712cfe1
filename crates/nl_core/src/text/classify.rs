use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEADWORD: Regex = Regex::new(r"^[a-zA-Z]+[-']?[a-zA-Z]*$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// A headword the dictionary can look up.
    SingleWord,
    Phrase,
}

pub fn classify(text: &str) -> SelectionKind {
    if HEADWORD.is_match(text) {
        SelectionKind::SingleWord
    } else {
        SelectionKind::Phrase
    }
}

/// Text the user highlighted, trimmed and classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    text: String,
    kind: SelectionKind,
}

impl Selection {
    /// Returns `None` when nothing but whitespace was selected.
    pub fn capture(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            kind: classify(text),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> SelectionKind {
        self.kind
    }

    pub fn is_single_word(&self) -> bool {
        self.kind == SelectionKind::SingleWord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_words() {
        for word in ["cat", "Dogs", "don't", "well-known", "o'", "x"] {
            assert_eq!(classify(word), SelectionKind::SingleWord, "{}", word);
        }
    }

    #[test]
    fn test_phrases() {
        for text in [
            "the cat",
            "cat sat.",
            "well--known",
            "rock'n'roll",
            "-cat",
            "cat3",
            "naïve",
            "cat\tdog",
            "",
        ] {
            assert_eq!(classify(text), SelectionKind::Phrase, "{:?}", text);
        }
    }

    #[test]
    fn test_capture_trims_and_rejects_blank() {
        assert!(Selection::capture("   \n\t").is_none());

        let selection = Selection::capture("  loyal \n").unwrap();
        assert_eq!(selection.text(), "loyal");
        assert!(selection.is_single_word());

        let selection = Selection::capture(" They protect homes ").unwrap();
        assert_eq!(selection.kind(), SelectionKind::Phrase);
    }
}
