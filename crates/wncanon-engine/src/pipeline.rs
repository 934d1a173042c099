//! One batch pass over a source lexicon.

use crate::closure::{close_relations, ClosureStats};
use crate::error::{CanonError, Result};
use crate::identity::IdentityResolver;
use crate::legacy::{zero_based_synsets, LegacySenseIndex, SnapshotStore};
use crate::partition::partition_by_lex_name;
use crate::reconcile::{rename_senses, ReconcileReport, Reconciler};
use serde::Serialize;
use std::collections::BTreeMap;
use wncanon_model::{Lexicon, SourceLexicon};

/// Everything a run produces. Nothing here has been written anywhere yet.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The whole resource after closure, with snapshot id repairs applied.
    pub unified: Lexicon,
    /// One reconciled lexicon per lex name.
    pub partitions: BTreeMap<String, Lexicon>,
    pub report: PipelineReport,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub zero_based_synsets: usize,
    pub closure: ClosureStats,
    pub renamed_senses: usize,
    pub partitions_without_snapshot: Vec<String>,
    pub reconcile: BTreeMap<String, ReconcileReport>,
}

impl PipelineReport {
    pub fn warning_count(&self) -> usize {
        self.reconcile
            .values()
            .map(|r| r.missing_entries.len() + r.missing_senses.len() + r.missing_synsets.len())
            .sum()
    }
}

/// Run resolve → close → partition → reconcile.
///
/// Any error aborts the whole pass.
pub fn run_pipeline<L, S>(source: SourceLexicon, legacy: &L, snapshots: &S) -> Result<PipelineOutput>
where
    L: LegacySenseIndex + ?Sized,
    S: SnapshotStore + ?Sized,
{
    let mut report = PipelineReport::default();

    let zero_based = zero_based_synsets(legacy);
    report.zero_based_synsets = zero_based.len();

    let members = source.members.clone();
    let resolver = IdentityResolver::new(&members, &zero_based);
    let (mut unified, identity) = resolver.resolve(source)?;

    report.closure = close_relations(&mut unified, &identity)?;
    tracing::info!(
        rewritten = report.closure.rewritten_targets,
        added = report.closure.added(),
        "relation closure complete"
    );

    let mut partitions = partition_by_lex_name(&unified)?;

    let mut published = BTreeMap::new();
    for lex_name in partitions.keys() {
        let snapshot = snapshots
            .snapshot(lex_name)
            .map_err(|source| CanonError::Snapshot {
                lex_name: lex_name.clone(),
                source,
            })?;
        match snapshot {
            Some(snapshot) => {
                published.insert(lex_name.clone(), snapshot);
            }
            None => {
                tracing::warn!(lex_name = %lex_name, "no snapshot, keeping construction order");
                report.partitions_without_snapshot.push(lex_name.clone());
            }
        }
    }

    // Relations cross partitions, so renames from every snapshot are
    // collected first and then applied everywhere.
    let mut renames = BTreeMap::new();
    for (lex_name, snapshot) in &published {
        if let Some(partition) = partitions.get(lex_name) {
            renames.extend(Reconciler::new(snapshot).sense_renames(partition));
        }
    }
    report.renamed_senses = renames.len();
    if !renames.is_empty() {
        tracing::info!(renamed = renames.len(), "repaired sense ids from snapshots");
        rename_senses(&mut unified, &renames);
        for partition in partitions.values_mut() {
            rename_senses(partition, &renames);
        }
    }

    for (lex_name, partition) in partitions.iter_mut() {
        if let Some(snapshot) = published.get(lex_name) {
            let reconcile = Reconciler::new(snapshot).reorder(partition);
            report.reconcile.insert(lex_name.clone(), reconcile);
        }
    }
    // Unified output keeps comments for every synset.
    for snapshot in published.values() {
        for (synset, comment) in &snapshot.comments {
            if unified.synset_by_id(synset).is_some() {
                unified.comments.insert(synset.clone(), comment.clone());
            }
        }
    }

    Ok(PipelineOutput {
        unified,
        partitions,
        report,
    })
}
