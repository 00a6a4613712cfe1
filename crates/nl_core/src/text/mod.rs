//! Text pipeline applied to article bodies and user selections.

pub mod classify;
pub mod highlight;
pub mod sentences;

pub use classify::{classify, Selection, SelectionKind};
pub use highlight::{highlight, render_with, SavedWords, Token};
pub use sentences::{containing_sentence, context_window, SentenceIndex};
