//! Filtering and ordering of the article feed.

use crate::types::{Article, Level};

/// Feed filters. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub level: Option<Level>,
}

impl FeedFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() { None } else { Some(term) };
        self
    }

    /// `"all"` clears the category constraint.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.eq_ignore_ascii_case("all") { None } else { Some(category) };
        self
    }

    pub fn with_level(mut self, level: Option<Level>) -> Self {
        self.level = level;
        self
    }

    pub fn matches(&self, article: &Article) -> bool {
        let matches_search = match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                article.title.to_lowercase().contains(&term)
                    || article.summary.to_lowercase().contains(&term)
            }
            None => true,
        };
        let matches_category = self
            .category
            .as_ref()
            .map_or(true, |category| &article.category == category);
        let matches_level = self.level.map_or(true, |level| article.level == level);

        matches_search && matches_category && matches_level
    }

    pub fn apply<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        articles.iter().filter(|a| self.matches(a)).collect()
    }
}

/// Distinct categories in the order they first appear.
pub fn categories(articles: &[Article]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for article in articles {
        if !seen.contains(&article.category.as_str()) {
            seen.push(&article.category);
        }
    }
    seen
}

/// Puts articles at the reader's level first, keeping the original order
/// within each group.
pub fn recommend<'a>(articles: Vec<&'a Article>, user_level: Option<Level>) -> Vec<&'a Article> {
    match user_level {
        Some(level) => {
            let (mut preferred, others): (Vec<_>, Vec<_>) =
                articles.into_iter().partition(|a| a.level == level);
            preferred.extend(others);
            preferred
        }
        None => articles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn article(id: &str, title: &str, category: &str, level: Level) -> Article {
        Article {
            id: id.to_string(),
            title: title.to_string(),
            summary: format!("Summary of {}", title),
            content: String::new(),
            level,
            category: category.to_string(),
            published_at: Utc::now(),
            reading_time: 3,
            image_url: None,
        }
    }

    fn feed() -> Vec<Article> {
        vec![
            article("1", "Markets rally", "business", Level::Advanced),
            article("2", "New park opens", "local", Level::Beginner),
            article("3", "Chip exports", "business", Level::Intermediate),
            article("4", "School lunches", "local", Level::Beginner),
        ]
    }

    fn ids(articles: &[&Article]) -> Vec<String> {
        articles.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn test_search_matches_title_or_summary() {
        let articles = feed();
        let filter = FeedFilter::new().with_search("PARK");
        assert_eq!(ids(&filter.apply(&articles)), vec!["2"]);

        let filter = FeedFilter::new().with_search("summary of chip");
        assert_eq!(ids(&filter.apply(&articles)), vec!["3"]);
    }

    #[test]
    fn test_category_and_level() {
        let articles = feed();
        let filter = FeedFilter::new()
            .with_category("local")
            .with_level(Some(Level::Beginner));
        assert_eq!(ids(&filter.apply(&articles)), vec!["2", "4"]);

        let filter = FeedFilter::new().with_category("all");
        assert_eq!(filter.apply(&articles).len(), 4);
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(categories(&feed()), vec!["business", "local"]);
    }

    #[test]
    fn test_recommend_is_stable() {
        let articles = feed();
        let all = FeedFilter::new().apply(&articles);
        let ordered = recommend(all, Some(Level::Beginner));
        assert_eq!(ids(&ordered), vec!["2", "4", "1", "3"]);

        let all = FeedFilter::new().apply(&articles);
        assert_eq!(ids(&recommend(all, None)), vec!["1", "2", "3", "4"]);
    }
}
