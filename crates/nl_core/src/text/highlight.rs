use std::collections::HashSet;

/// Case-insensitive set of saved vocabulary words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedWords {
    words: HashSet<String>,
}

impl SavedWords {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub saved: bool,
}

/// Lookup key of a token: word characters only, lowercased.
pub fn token_key(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_lowercase()
}

/// Splits a paragraph into alternating whitespace and word tokens, marking
/// the words found in `saved`.
pub fn highlight<'a>(paragraph: &'a str, saved: &SavedWords) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space = None;

    for (offset, ch) in paragraph.char_indices() {
        let is_space = ch.is_whitespace();
        match in_space {
            Some(prev) if prev != is_space => {
                tokens.push(make_token(&paragraph[start..offset], saved));
                start = offset;
            }
            _ => {}
        }
        in_space = Some(is_space);
    }
    if start < paragraph.len() {
        tokens.push(make_token(&paragraph[start..], saved));
    }
    tokens
}

fn make_token<'a>(text: &'a str, saved: &SavedWords) -> Token<'a> {
    let key = token_key(text);
    Token {
        text,
        saved: !key.is_empty() && saved.contains(&key),
    }
}

/// Joins tokens back together, passing saved words through `mark`.
pub fn render_with<F>(tokens: &[Token<'_>], mut mark: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::new();
    for token in tokens {
        if token.saved {
            out.push_str(&mark(token.text));
        } else {
            out.push_str(token.text);
        }
    }
    out
}
