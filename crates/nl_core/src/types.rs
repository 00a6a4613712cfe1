use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            other => Err(Error::Validation(format!("Unknown level: {}", other))),
        }
    }
}

impl TryFrom<String> for Level {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub content: String,
    pub level: Level,
    #[serde(default)]
    pub category: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub reading_time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Article {
    /// Body paragraphs, split on blank lines and trimmed.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.content
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// The content service hands out 240px thumbnails; readers show the 960px variant.
    /// Only the first "240" is the size marker.
    pub fn large_image_url(&self) -> Option<String> {
        self.image_url.as_ref().map(|url| url.replacen("240", "960", 1))
    }
}

/// The content service emits either full RFC 3339 timestamps or bare dates.
mod timestamp {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyWord {
    #[serde(alias = "_id")]
    pub id: String,
    pub word: String,
    pub definition: String,
    #[serde(default)]
    pub sentence: String,
    pub article_id: String,
    pub article_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSentence {
    #[serde(alias = "_id")]
    pub id: String,
    pub sentence: String,
    #[serde(default)]
    pub context: String,
    pub article_id: String,
    pub article_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for creating a vocabulary word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVocabularyWord {
    pub word: String,
    pub definition: String,
    pub sentence: String,
    pub article_id: String,
    pub article_title: String,
}

/// Request body for creating a saved sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavedSentence {
    pub sentence: String,
    pub context: String,
    pub article_id: String,
    pub article_title: String,
}

/// Display model of a dictionary entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WordDefinition {
    pub word: String,
    pub phonetic: Option<String>,
    pub audio: Vec<String>,
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meaning {
    pub part_of_speech: String,
    pub definitions: Vec<String>,
}

impl WordDefinition {
    pub fn is_empty(&self) -> bool {
        self.meanings.iter().all(|m| m.definitions.is_empty())
    }

    /// First definition across all meanings, used to prefill the save form.
    pub fn first_definition(&self) -> Option<&str> {
        self.meanings
            .iter()
            .flat_map(|m| m.definitions.iter())
            .next()
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub level: Level,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_level_parsing() {
        assert_eq!("Beginner".parse::<Level>().unwrap(), Level::Beginner);
        assert_eq!(" advanced ".parse::<Level>().unwrap(), Level::Advanced);
        assert!("expert".parse::<Level>().is_err());
    }

    #[test]
    fn test_article_from_content_service() {
        let article: Article = serde_json::from_value(json!({
            "_id": "a1",
            "title": "Rivers rise",
            "summary": "Heavy rain",
            "content": "First paragraph.\n\n  Second paragraph.  \n\n",
            "level": "Intermediate",
            "category": "weather",
            "publishedAt": "2024-03-01T08:00:00Z",
            "readingTime": 4,
            "imageUrl": "https://img.example.com/240/river.jpg"
        }))
        .unwrap();

        assert_eq!(article.id, "a1");
        assert_eq!(article.level, Level::Intermediate);
        assert_eq!(article.reading_time, 4);
        assert_eq!(article.paragraphs(), vec!["First paragraph.", "Second paragraph."]);
        assert_eq!(
            article.large_image_url().as_deref(),
            Some("https://img.example.com/960/river.jpg")
        );
    }

    #[test]
    fn test_large_image_url_swaps_first_size_only() {
        let mut article: Article = serde_json::from_value(json!({
            "_id": "a2",
            "title": "Photo",
            "content": "",
            "level": "Beginner",
            "category": "art",
            "publishedAt": "2024-03-01",
            "readingTime": 1,
        }))
        .unwrap();
        assert_eq!(article.large_image_url(), None);

        article.image_url = Some("https://img.example.com/240/photo_240.jpg".to_string());
        assert_eq!(
            article.large_image_url().as_deref(),
            Some("https://img.example.com/960/photo_240.jpg")
        );
    }

    #[test]
    fn test_bare_date_timestamp() {
        let ts = timestamp::parse("2024-01-15").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-15T00:00:00+00:00");
        assert!(timestamp::parse("yesterday").is_none());
    }

    #[test]
    fn test_new_word_body_is_camel_case() {
        let body = NewVocabularyWord {
            word: "loyal".to_string(),
            definition: "faithful".to_string(),
            sentence: "Dogs are loyal.".to_string(),
            article_id: "a1".to_string(),
            article_title: "Dogs".to_string(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["articleId"], "a1");
        assert_eq!(value["articleTitle"], "Dogs");
    }

    #[test]
    fn test_first_definition() {
        let def = WordDefinition {
            word: "run".to_string(),
            phonetic: None,
            audio: vec![],
            meanings: vec![
                Meaning { part_of_speech: "noun".to_string(), definitions: vec![] },
                Meaning {
                    part_of_speech: "verb".to_string(),
                    definitions: vec!["To move swiftly.".to_string()],
                },
            ],
        };
        assert_eq!(def.first_definition(), Some("To move swiftly."));
        assert!(!def.is_empty());
        assert!(WordDefinition::default().is_empty());
    }
}
