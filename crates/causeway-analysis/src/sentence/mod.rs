//! Sentence data model consumed by the tagger: tokens, dependency and
//! constituency parses, gold annotations, tree serialization.

pub mod bracketed;
pub mod constituency;
pub mod instance;
pub mod parsed;
pub mod token;

pub use constituency::ConstituencyTree;
pub use instance::CausationInstance;
pub use parsed::{DependencyStep, ParsedSentence, SentenceBuilder};
pub use token::Token;
