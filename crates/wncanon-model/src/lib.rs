//! wncanon entity model
//!
//! In-memory representation of a WordNet-style lexical resource:
//!
//! - [`model`]: resolved entities (`Lexicon`, `LexicalEntry`, `Sense`, `Synset`, ...)
//! - [`provisional`]: entries as they come out of the editable source, before
//!   sense ids have been assigned
//! - [`relations`]: closed sense/synset relation kinds and their inverses
//! - [`ids`]: lemma escaping and id templates
//!
//! The model has no behaviour beyond storage and simple mutation. Everything
//! that reasons about the graph lives in `wncanon-engine`.

pub mod ids;
pub mod model;
pub mod provisional;
pub mod relations;

pub use model::*;
pub use provisional::{ProvisionalEntry, ProvisionalSense, SourceLexicon, SynsetMembers};
pub use relations::{SenseRelType, SynsetRelType};

/// A tag string that does not belong to one of the closed vocabularies
/// (part of speech, adjective position, relation kind).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {vocabulary} `{tag}`")]
pub struct UnknownTag {
    pub vocabulary: &'static str,
    pub tag: String,
}

impl UnknownTag {
    pub fn new(vocabulary: &'static str, tag: &str) -> Self {
        Self {
            vocabulary,
            tag: tag.to_string(),
        }
    }
}
