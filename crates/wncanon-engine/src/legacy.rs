//! Capabilities over the previously published (legacy) resource.
//!
//! The published XML serves two unrelated purposes, kept as two traits so
//! each can be mocked on its own:
//!
//! - [`LegacySenseIndex`]: the legacy sense numbering, scanned once for
//!   synsets whose members are numbered from zero;
//! - [`SnapshotStore`]: per-lex-name canonical snapshots that fix ordering.

use crate::error::BoxError;
use crate::identity::ZeroBasedSynsets;
use std::collections::BTreeMap;
use wncanon_model::Lexicon;

pub trait LegacySenseIndex {
    /// Visit every `(sense id, synset id)` pair of the legacy resource.
    fn for_each_sense(&self, visit: &mut dyn FnMut(&str, &str));
}

pub trait SnapshotStore {
    /// The canonical snapshot for `lex_name`, if one has been published.
    fn snapshot(&self, lex_name: &str) -> std::result::Result<Option<Lexicon>, BoxError>;
}

impl LegacySenseIndex for Lexicon {
    fn for_each_sense(&self, visit: &mut dyn FnMut(&str, &str)) {
        for sense in self.senses() {
            visit(&sense.id, &sense.synset);
        }
    }
}

impl LegacySenseIndex for [Lexicon] {
    fn for_each_sense(&self, visit: &mut dyn FnMut(&str, &str)) {
        for lexicon in self {
            lexicon.for_each_sense(visit);
        }
    }
}

impl LegacySenseIndex for BTreeMap<String, Lexicon> {
    fn for_each_sense(&self, visit: &mut dyn FnMut(&str, &str)) {
        for lexicon in self.values() {
            lexicon.for_each_sense(visit);
        }
    }
}

impl SnapshotStore for BTreeMap<String, Lexicon> {
    fn snapshot(&self, lex_name: &str) -> std::result::Result<Option<Lexicon>, BoxError> {
        Ok(self.get(lex_name).cloned())
    }
}

/// No legacy resource and no snapshots: every synset is one-based and every
/// partition keeps its construction order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLegacy;

impl LegacySenseIndex for NoLegacy {
    fn for_each_sense(&self, _visit: &mut dyn FnMut(&str, &str)) {}
}

impl SnapshotStore for NoLegacy {
    fn snapshot(&self, _lex_name: &str) -> std::result::Result<Option<Lexicon>, BoxError> {
        Ok(None)
    }
}

/// Synsets whose legacy member numbering starts at zero.
///
/// Compatibility shim: any legacy sense id ending in `00` marks its synset.
/// Remove once the published XML numbers every synset from one.
pub fn zero_based_synsets<L: LegacySenseIndex + ?Sized>(legacy: &L) -> ZeroBasedSynsets {
    let mut synsets = Vec::new();
    legacy.for_each_sense(&mut |sense_id, synset_id| {
        if sense_id.ends_with("00") {
            synsets.push(synset_id.to_string());
        }
    });
    synsets.into_iter().collect()
}
