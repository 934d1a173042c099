//! Identity resolution: provisional senses → senses with final ids.
//!
//! A final sense id is the provisional id plus a two-digit ordinal: the
//! position of the entry's lemma in the member list of the sense's synset.
//! Members are numbered from one, except in the synsets of
//! [`ZeroBasedSynsets`].
//!
//! Resolution also records, per sense key, both the final id and the
//! provisional id. Relations in the source name their targets by sense key;
//! the closure pass uses these maps to rewrite them.

use crate::error::{CanonError, Result};
use std::collections::{BTreeSet, HashMap};
use wncanon_model::ids::final_sense_id;
use wncanon_model::{
    LexicalEntry, Lexicon, ProvisionalEntry, ProvisionalSense, Sense, SourceLexicon,
    SynsetMembers, SyntacticBehaviour,
};

/// Synsets whose member ordinals start at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZeroBasedSynsets(BTreeSet<String>);

impl ZeroBasedSynsets {
    pub fn contains(&self, synset: &str) -> bool {
        self.0.contains(synset)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for ZeroBasedSynsets {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Sense key → id mappings produced by resolution.
#[derive(Debug, Clone, Default)]
pub struct SenseIdentity {
    final_ids: HashMap<String, String>,
    provisional_ids: HashMap<String, String>,
}

impl SenseIdentity {
    pub fn final_id(&self, sense_key: &str) -> Option<&str> {
        self.final_ids.get(sense_key).map(String::as_str)
    }

    pub fn provisional_id(&self, sense_key: &str) -> Option<&str> {
        self.provisional_ids.get(sense_key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.final_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.final_ids.is_empty()
    }

    fn record(&mut self, sense_key: &str, provisional: &str, final_id: &str) -> Result<()> {
        if let Some(first) = self.final_ids.get(sense_key) {
            return Err(CanonError::DuplicateSenseKey {
                key: sense_key.to_string(),
                first: first.clone(),
                second: final_id.to_string(),
            });
        }
        self.final_ids
            .insert(sense_key.to_string(), final_id.to_string());
        self.provisional_ids
            .insert(sense_key.to_string(), provisional.to_string());
        Ok(())
    }
}

pub struct IdentityResolver<'a> {
    members: &'a SynsetMembers,
    zero_based: &'a ZeroBasedSynsets,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(members: &'a SynsetMembers, zero_based: &'a ZeroBasedSynsets) -> Self {
        Self {
            members,
            zero_based,
        }
    }

    /// Ordinal of `lemma` within `synset`.
    pub fn ordinal(&self, synset: &str, lemma: &str) -> Result<usize> {
        let index = self
            .members
            .position(synset, lemma)
            .ok_or_else(|| CanonError::LemmaNotInMembers {
                lemma: lemma.to_string(),
                synset: synset.to_string(),
            })?;
        if self.zero_based.contains(synset) {
            Ok(index)
        } else {
            Ok(index + 1)
        }
    }

    pub fn resolve_sense(&self, sense: ProvisionalSense, lemma: &str) -> Result<Sense> {
        let ordinal = self.ordinal(&sense.synset, lemma)?;
        Ok(Sense {
            id: final_sense_id(&sense.provisional_id, ordinal),
            synset: sense.synset,
            sense_key: Some(sense.sense_key),
            n: sense.n,
            adjposition: sense.adjposition,
            relations: sense.relations,
        })
    }

    /// Resolve every sense of `entry`, recording keys in `identity`.
    ///
    /// Syntactic behaviours are rewritten from provisional to final ids.
    pub fn resolve_entry(
        &self,
        entry: ProvisionalEntry,
        identity: &mut SenseIdentity,
    ) -> Result<LexicalEntry> {
        let lemma = entry.lemma.written_form.clone();
        let mut by_provisional: HashMap<String, String> = HashMap::new();
        let mut senses = Vec::with_capacity(entry.senses.len());

        for provisional in entry.senses {
            let provisional_id = provisional.provisional_id.clone();
            let sense_key = provisional.sense_key.clone();
            let sense = self.resolve_sense(provisional, &lemma)?;
            identity.record(&sense_key, &provisional_id, &sense.id)?;
            by_provisional.insert(provisional_id, sense.id.clone());
            senses.push(sense);
        }

        let mut syntactic_behaviours = Vec::with_capacity(entry.syntactic_behaviours.len());
        for behaviour in entry.syntactic_behaviours {
            let mut resolved = Vec::with_capacity(behaviour.senses.len());
            for provisional_id in &behaviour.senses {
                let final_id = by_provisional.get(provisional_id).ok_or_else(|| {
                    CanonError::UnresolvedSenseTarget {
                        from_sense: entry.id.clone(),
                        target: provisional_id.clone(),
                    }
                })?;
                resolved.push(final_id.clone());
            }
            syntactic_behaviours.push(SyntacticBehaviour {
                frame: behaviour.frame,
                senses: resolved,
            });
        }

        Ok(LexicalEntry {
            id: entry.id,
            lemma: entry.lemma,
            forms: entry.forms,
            senses,
            syntactic_behaviours,
        })
    }

    /// Resolve a whole source lexicon.
    pub fn resolve(&self, source: SourceLexicon) -> Result<(Lexicon, SenseIdentity)> {
        let mut identity = SenseIdentity::default();
        let mut lexicon = Lexicon::new(source.meta);
        for entry in source.entries {
            let resolved = self.resolve_entry(entry, &mut identity)?;
            lexicon.add_entry(resolved);
        }
        lexicon.synsets = source.synsets;
        tracing::debug!(
            senses = identity.len(),
            zero_based = self.zero_based.len(),
            "assigned final sense ids"
        );
        Ok((lexicon, identity))
    }
}
