//! Entities as read from the editable source, before identity resolution.
//!
//! A `ProvisionalSense` carries everything a sense needs except its final id:
//! the ordinal that completes the id depends on the lemma's position in the
//! synset member list, which is only known once every synset file has been
//! read. The identity resolver turns provisional entries into
//! [`LexicalEntry`](crate::LexicalEntry) values.

use crate::model::{AdjPosition, Form, Lemma, LexiconMeta, SenseRelation, Synset, SyntacticBehaviour};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionalSense {
    /// Sense id without the member ordinal.
    pub provisional_id: String,
    pub sense_key: String,
    pub synset: String,
    pub n: usize,
    pub adjposition: Option<AdjPosition>,
    /// Relations whose targets are still sense keys.
    pub relations: Vec<SenseRelation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionalEntry {
    pub id: String,
    pub lemma: Lemma,
    pub forms: Vec<Form>,
    pub senses: Vec<ProvisionalSense>,
    /// Behaviours listing provisional sense ids.
    pub syntactic_behaviours: Vec<SyntacticBehaviour>,
}

/// Ordered member lemmas of every synset, as recorded in the synset files.
///
/// Built once by the loader and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynsetMembers {
    members: BTreeMap<String, Vec<String>>,
}

impl SynsetMembers {
    pub fn members(&self, synset: &str) -> Option<&[String]> {
        self.members.get(synset).map(Vec::as_slice)
    }

    /// Zero-based position of `lemma` in the member list of `synset`.
    pub fn position(&self, synset: &str, lemma: &str) -> Option<usize> {
        self.members(synset)?.iter().position(|m| m == lemma)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for SynsetMembers {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

/// Everything the loader hands to the engine.
#[derive(Debug, Clone, Default)]
pub struct SourceLexicon {
    pub meta: LexiconMeta,
    pub entries: Vec<ProvisionalEntry>,
    pub synsets: Vec<Synset>,
    pub members: SynsetMembers,
}
