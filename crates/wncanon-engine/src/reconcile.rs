//! Canonical order reconciliation against a published snapshot.
//!
//! Freshly built partitions come out in construction order. To keep diffs
//! against the previous release small, every ordered collection is re-sorted
//! by the position its items had in the snapshot of the same partition:
//!
//! | collection                    | key                      |
//! |-------------------------------|--------------------------|
//! | entries of a lexicon          | entry id                 |
//! | senses of an entry            | sense id                 |
//! | relations of a sense          | (target id, kind)        |
//! | behaviours of an entry        | subcategorization frame  |
//! | sense ids of a behaviour      | sense id                 |
//! | synsets of a lexicon          | synset id                |
//! | relations of a synset         | (target id, kind)        |
//!
//! Items the snapshot does not know get [`UNKNOWN_RANK`] and, since the sorts
//! are stable, end up after every known item in arrival order.
//!
//! Before ordering, sense ids are repaired from the snapshot: the published
//! numbering of a synset's members is not always derivable from member order,
//! so a fresh sense whose id stem (id minus its two ordinal digits) matches a
//! snapshot sense takes that sense's id. Renames have to be applied to every
//! partition, since relations cross partition boundaries; see
//! [`Reconciler::sense_renames`] and [`rename_senses`].

use serde::Serialize;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use wncanon_model::ids::sense_id_stem;
use wncanon_model::{LexicalEntry, Lexicon, Sense, SenseRef, SenseRelType, Synset, SynsetRelType};

/// Rank of any key missing from the snapshot; larger than every real position.
pub const UNKNOWN_RANK: usize = usize::MAX;

/// Position of each key in a snapshot collection.
#[derive(Debug, Clone)]
pub struct RankTable<K> {
    ranks: HashMap<K, usize>,
}

impl<K: Eq + Hash> RankTable<K> {
    pub fn new<I: IntoIterator<Item = K>>(keys: I) -> Self {
        Self {
            ranks: keys.into_iter().enumerate().map(|(i, k)| (k, i)).collect(),
        }
    }

    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ranks.get(key).copied().unwrap_or(UNKNOWN_RANK)
    }
}

fn sense_relation_ranks(sense: &Sense) -> RankTable<(String, SenseRelType)> {
    RankTable::new(
        sense
            .relations
            .iter()
            .map(|r| (r.target.as_str().to_string(), r.rel_type)),
    )
}

fn synset_relation_ranks(synset: &Synset) -> RankTable<(String, SynsetRelType)> {
    RankTable::new(
        synset
            .relations
            .iter()
            .map(|r| (r.target.clone(), r.rel_type)),
    )
}

/// Fresh items without a counterpart in the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub missing_entries: Vec<String>,
    pub missing_senses: Vec<String>,
    pub missing_synsets: Vec<String>,
    pub renamed_senses: usize,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.missing_entries.is_empty()
            && self.missing_senses.is_empty()
            && self.missing_synsets.is_empty()
    }
}

pub struct Reconciler<'s> {
    snapshot: &'s Lexicon,
    entries: HashMap<&'s str, &'s LexicalEntry>,
    senses: HashMap<&'s str, &'s Sense>,
    synsets: HashMap<&'s str, &'s Synset>,
    ids_by_stem: HashMap<&'s str, &'s str>,
    entry_ranks: RankTable<String>,
    synset_ranks: RankTable<String>,
}

impl<'s> Reconciler<'s> {
    pub fn new(snapshot: &'s Lexicon) -> Self {
        let entries = snapshot
            .entries
            .iter()
            .map(|e| (e.id.as_str(), e))
            .collect();
        let senses: HashMap<&str, &Sense> =
            snapshot.senses().map(|s| (s.id.as_str(), s)).collect();
        let ids_by_stem = senses
            .keys()
            .map(|id| (sense_id_stem(*id), *id))
            .collect();
        let synsets = snapshot
            .synsets
            .iter()
            .map(|s| (s.id.as_str(), s))
            .collect();
        Self {
            snapshot,
            entries,
            senses,
            synsets,
            ids_by_stem,
            entry_ranks: RankTable::new(snapshot.entries.iter().map(|e| e.id.clone())),
            synset_ranks: RankTable::new(snapshot.synsets.iter().map(|s| s.id.clone())),
        }
    }

    /// Sense ids that should be replaced by the snapshot's own id.
    ///
    /// Only entries the snapshot knows are considered.
    pub fn sense_renames(&self, lexicon: &Lexicon) -> BTreeMap<String, String> {
        let mut renames = BTreeMap::new();
        for entry in &lexicon.entries {
            if !self.entries.contains_key(entry.id.as_str()) {
                continue;
            }
            for sense in &entry.senses {
                if let Some(published) = self.ids_by_stem.get(sense_id_stem(&sense.id)) {
                    if *published != sense.id {
                        renames.insert(sense.id.clone(), published.to_string());
                    }
                }
            }
        }
        renames
    }

    /// Sort every collection of `lexicon` into snapshot order and copy sense
    /// ranks and synset comments from the snapshot.
    pub fn reorder(&self, lexicon: &mut Lexicon) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        lexicon
            .entries
            .sort_by_key(|e| self.entry_ranks.rank(e.id.as_str()));
        for entry in &mut lexicon.entries {
            match self.entries.get(entry.id.as_str()) {
                Some(published) => self.reorder_entry(entry, published, &mut report),
                None => {
                    tracing::warn!(entry = %entry.id, "entry not found in snapshot");
                    report.missing_entries.push(entry.id.clone());
                }
            }
        }

        lexicon
            .synsets
            .sort_by_key(|s| self.synset_ranks.rank(s.id.as_str()));
        for synset in &mut lexicon.synsets {
            match self.synsets.get(synset.id.as_str()) {
                Some(published) => {
                    let ranks = synset_relation_ranks(published);
                    synset
                        .relations
                        .sort_by_key(|r| ranks.rank(&(r.target.clone(), r.rel_type)));
                }
                None => {
                    tracing::warn!(synset = %synset.id, "synset not found in snapshot");
                    report.missing_synsets.push(synset.id.clone());
                }
            }
            if let Some(comment) = self.snapshot.comments.get(&synset.id) {
                lexicon
                    .comments
                    .insert(synset.id.clone(), comment.clone());
            }
        }

        report
    }

    fn reorder_entry(
        &self,
        entry: &mut LexicalEntry,
        published: &LexicalEntry,
        report: &mut ReconcileReport,
    ) {
        let sense_ranks = RankTable::new(published.senses.iter().map(|s| s.id.clone()));
        entry
            .senses
            .sort_by_key(|s| sense_ranks.rank(s.id.as_str()));

        for sense in &mut entry.senses {
            let Some(published_sense) = self.senses.get(sense.id.as_str()) else {
                tracing::warn!(sense = %sense.id, "sense not found in snapshot");
                report.missing_senses.push(sense.id.clone());
                continue;
            };
            sense.n = published_sense.n;
            let ranks = sense_relation_ranks(published_sense);
            sense
                .relations
                .sort_by_key(|r| ranks.rank(&(r.target.as_str().to_string(), r.rel_type)));
        }

        let frame_ranks = RankTable::new(
            published
                .syntactic_behaviours
                .iter()
                .map(|b| b.frame.clone()),
        );
        entry
            .syntactic_behaviours
            .sort_by_key(|b| frame_ranks.rank(b.frame.as_str()));
        for behaviour in &mut entry.syntactic_behaviours {
            let Some(published_behaviour) = published
                .syntactic_behaviours
                .iter()
                .find(|b| b.frame == behaviour.frame)
            else {
                continue;
            };
            let member_ranks = RankTable::new(published_behaviour.senses.iter().cloned());
            behaviour
                .senses
                .sort_by_key(|id| member_ranks.rank(id.as_str()));
        }
    }
}

/// Apply sense id renames to sense ids, sense relation targets and behaviour
/// members. Every slot is looked up once, so swapped ids are safe.
///
/// Returns the number of rewritten slots.
pub fn rename_senses(lexicon: &mut Lexicon, renames: &BTreeMap<String, String>) -> usize {
    if renames.is_empty() {
        return 0;
    }
    let mut rewritten = 0;
    for entry in &mut lexicon.entries {
        for sense in &mut entry.senses {
            if let Some(new_id) = renames.get(&sense.id) {
                sense.id = new_id.clone();
                rewritten += 1;
            }
            for rel in &mut sense.relations {
                if let SenseRef::Id(target) = &mut rel.target {
                    if let Some(new_id) = renames.get(target.as_str()) {
                        *target = new_id.clone();
                        rewritten += 1;
                    }
                }
            }
        }
        for behaviour in &mut entry.syntactic_behaviours {
            for id in &mut behaviour.senses {
                if let Some(new_id) = renames.get(id.as_str()) {
                    *id = new_id.clone();
                    rewritten += 1;
                }
            }
        }
    }
    rewritten
}

/// Reconcile one self-contained lexicon against its snapshot.
///
/// Without a snapshot the lexicon is left untouched.
pub fn reconcile(lexicon: &mut Lexicon, snapshot: Option<&Lexicon>) -> ReconcileReport {
    let Some(snapshot) = snapshot else {
        return ReconcileReport::default();
    };
    let reconciler = Reconciler::new(snapshot);
    let renames = reconciler.sense_renames(lexicon);
    rename_senses(lexicon, &renames);
    let mut report = reconciler.reorder(lexicon);
    report.renamed_senses = renames.len();
    report
}
