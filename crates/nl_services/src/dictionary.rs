use async_trait::async_trait;
use nl_core::{Error, Meaning, Result, WordDefinition};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::http::{build_client, check, endpoint};

#[async_trait]
pub trait DictionaryService: Send + Sync {
    /// Looks up a single headword.
    async fn lookup(&self, word: &str) -> Result<WordDefinition>;
}

#[derive(Debug, Deserialize)]
struct Entry {
    word: String,
    #[serde(default)]
    phonetic: Option<String>,
    #[serde(default)]
    phonetics: Vec<Phonetic>,
    #[serde(default)]
    meanings: Vec<EntryMeaning>,
}

#[derive(Debug, Deserialize)]
struct Phonetic {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    audio: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryMeaning {
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<EntryDefinition>,
}

#[derive(Debug, Deserialize)]
struct EntryDefinition {
    definition: String,
}

impl From<Entry> for WordDefinition {
    fn from(entry: Entry) -> Self {
        let phonetic = entry
            .phonetic
            .filter(|p| !p.is_empty())
            .or_else(|| entry.phonetics.first().and_then(|p| p.text.clone()));
        let audio = entry
            .phonetics
            .iter()
            .filter_map(|p| p.audio.as_ref())
            .filter(|a| !a.is_empty())
            .cloned()
            .collect();
        let meanings = entry
            .meanings
            .into_iter()
            .map(|m| Meaning {
                part_of_speech: m.part_of_speech,
                definitions: m.definitions.into_iter().map(|d| d.definition).collect(),
            })
            .collect();

        WordDefinition {
            word: entry.word,
            phonetic,
            audio,
            meanings,
        }
    }
}

/// Builds the display model from a dictionary response body.
pub fn parse_entries(body: &str) -> Result<Option<WordDefinition>> {
    let entries: Vec<Entry> = serde_json::from_str(body)?;
    Ok(entries.into_iter().next().map(WordDefinition::from))
}

/// Client for dictionaryapi.dev style services: `GET {base}/en/{word}`.
pub struct HttpDictionary {
    client: Client,
    base: Url,
}

impl HttpDictionary {
    pub fn new(base: Url) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base,
        })
    }
}

#[async_trait]
impl DictionaryService for HttpDictionary {
    async fn lookup(&self, word: &str) -> Result<WordDefinition> {
        let url = endpoint(&self.base, &["en", word])?;
        debug!("Looking up {:?} at {}", word, url);

        let response = check(self.client.get(url).send().await?).await?;
        let body = response.text().await?;
        parse_entries(&body)?.ok_or_else(|| Error::NotFound(format!("No definitions for {}", word)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOYAL: &str = r#"[
        {
            "word": "loyal",
            "phonetics": [
                {"text": "/ˈlɔɪ.əl/", "audio": ""},
                {"audio": "https://audio.example.com/loyal-us.mp3"}
            ],
            "meanings": [
                {
                    "partOfSpeech": "adjective",
                    "definitions": [
                        {"definition": "Firm in allegiance.", "synonyms": ["faithful"], "antonyms": []},
                        {"definition": "Showing loyalty.", "example": "a loyal friend"}
                    ]
                },
                {"partOfSpeech": "noun", "definitions": [{"definition": "A loyal person."}]}
            ]
        },
        {"word": "loyal", "meanings": []}
    ]"#;

    #[test]
    fn test_parse_first_entry() {
        let def = parse_entries(LOYAL).unwrap().unwrap();
        assert_eq!(def.word, "loyal");
        assert_eq!(def.phonetic.as_deref(), Some("/ˈlɔɪ.əl/"));
        assert_eq!(def.audio, vec!["https://audio.example.com/loyal-us.mp3"]);
        assert_eq!(def.meanings.len(), 2);
        assert_eq!(def.meanings[0].part_of_speech, "adjective");
        assert_eq!(
            def.meanings[0].definitions,
            vec!["Firm in allegiance.", "Showing loyalty."]
        );
    }

    #[test]
    fn test_entry_phonetic_wins() {
        let body = r#"[{"word": "cat", "phonetic": "/kæt/", "phonetics": [{"text": "/kat/"}], "meanings": []}]"#;
        let def = parse_entries(body).unwrap().unwrap();
        assert_eq!(def.phonetic.as_deref(), Some("/kæt/"));
        assert!(def.audio.is_empty());
    }

    #[test]
    fn test_empty_list() {
        assert!(parse_entries("[]").unwrap().is_none());
    }

    #[test]
    fn test_not_found_body_is_not_a_list() {
        let body = r#"{"title": "No Definitions Found", "message": "Sorry pal"}"#;
        assert!(matches!(parse_entries(body), Err(Error::Serialization(_))));
    }
}
