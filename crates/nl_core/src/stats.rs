use serde::Serialize;
use std::collections::BTreeMap;

use crate::types::{Article, Level, SavedSentence, VocabularyWord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub total_articles: usize,
    pub total_vocabularies: usize,
    pub total_sentences: usize,
    pub articles_by_level: BTreeMap<Level, usize>,
}

impl Dashboard {
    pub fn compute(
        articles: &[Article],
        words: &[VocabularyWord],
        sentences: &[SavedSentence],
    ) -> Self {
        let mut articles_by_level: BTreeMap<Level, usize> =
            Level::ALL.iter().map(|level| (*level, 0)).collect();
        for article in articles {
            *articles_by_level.entry(article.level).or_insert(0) += 1;
        }

        Self {
            total_articles: articles.len(),
            total_vocabularies: words.len(),
            total_sentences: sentences.len(),
            articles_by_level,
        }
    }
}
