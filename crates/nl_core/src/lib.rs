pub mod error;
pub mod feed;
pub mod stats;
pub mod text;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    Article, Level, Meaning, NewSavedSentence, NewVocabularyWord, SavedSentence, User,
    VocabularyWord, WordDefinition,
};
