//! Reading state: the user's vocabulary and the article currently open.

pub mod annotator;
pub mod book;
pub mod session;

pub use annotator::Annotator;
pub use book::VocabularySnapshot;
pub use session::{LookupOutcome, ReadingSession};
