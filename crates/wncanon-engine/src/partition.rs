//! Split a unified lexicon by lexicographer file.
//!
//! Every synset goes to the partition of its own lex name. An entry is copied
//! into each partition that holds at least one of its senses' synsets, keeping
//! only those senses (renumbered from zero in their original relative order)
//! and only the syntactic behaviours that still list one of them.

use crate::error::{CanonError, Result};
use std::collections::{BTreeMap, HashMap, HashSet};
use wncanon_model::{LexicalEntry, Lexicon, Sense, SyntacticBehaviour};

pub fn partition_by_lex_name(lexicon: &Lexicon) -> Result<BTreeMap<String, Lexicon>> {
    let mut partitions: BTreeMap<String, Lexicon> = BTreeMap::new();
    let mut lex_name_of: HashMap<&str, &str> = HashMap::with_capacity(lexicon.synsets.len());

    for synset in &lexicon.synsets {
        lex_name_of.insert(&synset.id, &synset.lex_name);
        let partition = partitions
            .entry(synset.lex_name.clone())
            .or_insert_with(|| Lexicon::new(lexicon.meta.clone()));
        if let Some(comment) = lexicon.comments.get(&synset.id) {
            partition.comments.insert(synset.id.clone(), comment.clone());
        }
        partition.add_synset(synset.clone());
    }

    for entry in &lexicon.entries {
        // Lex names in order of first appearance among the entry's senses.
        let mut grouped: Vec<(&str, Vec<&Sense>)> = Vec::new();
        for sense in &entry.senses {
            let lex_name = *lex_name_of
                .get(sense.synset.as_str())
                .ok_or_else(|| CanonError::MissingSynset {
                    from: sense.id.clone(),
                    synset: sense.synset.clone(),
                })?;
            match grouped.iter_mut().find(|(name, _)| *name == lex_name) {
                Some((_, senses)) => senses.push(sense),
                None => grouped.push((lex_name, vec![sense])),
            }
        }

        for (lex_name, senses) in grouped {
            let copy = entry_subset(entry, &senses);
            if let Some(partition) = partitions.get_mut(lex_name) {
                partition.add_entry(copy);
            }
        }
    }

    tracing::debug!(partitions = partitions.len(), "partitioned lexicon by lex name");
    Ok(partitions)
}

fn entry_subset(entry: &LexicalEntry, senses: &[&Sense]) -> LexicalEntry {
    let mut copy = LexicalEntry::new(entry.id.clone(), entry.lemma.clone());
    copy.forms = entry.forms.clone();
    copy.senses = senses
        .iter()
        .enumerate()
        .map(|(n, sense)| Sense {
            n,
            ..(*sense).clone()
        })
        .collect();

    let kept: HashSet<&str> = senses.iter().map(|s| s.id.as_str()).collect();
    copy.syntactic_behaviours = entry
        .syntactic_behaviours
        .iter()
        .filter_map(|behaviour| {
            let ids: Vec<String> = behaviour
                .senses
                .iter()
                .filter(|id| kept.contains(id.as_str()))
                .cloned()
                .collect();
            (!ids.is_empty()).then(|| SyntacticBehaviour {
                frame: behaviour.frame.clone(),
                senses: ids,
            })
        })
        .collect();
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use wncanon_model::{Lemma, PartOfSpeech, Synset};

    fn sense(id: &str, synset: &str, n: usize) -> Sense {
        Sense {
            id: id.to_string(),
            synset: synset.to_string(),
            sense_key: None,
            n,
            adjposition: None,
            relations: vec![],
        }
    }

    fn lexicon() -> Lexicon {
        let mut lex = Lexicon::default();
        lex.add_synset(Synset::new("ewn-run-act", PartOfSpeech::Noun, "noun.act"));
        lex.add_synset(Synset::new("ewn-run-event", PartOfSpeech::Noun, "noun.event"));
        lex.add_synset(Synset::new("ewn-run-act2", PartOfSpeech::Noun, "noun.act"));
        let mut run = LexicalEntry::new(
            "ewn-run-n",
            Lemma {
                written_form: "run".to_string(),
                part_of_speech: PartOfSpeech::Noun,
            },
        );
        run.senses = vec![
            sense("run-1", "ewn-run-event", 0),
            sense("run-2", "ewn-run-act", 1),
            sense("run-3", "ewn-run-act2", 2),
        ];
        run.syntactic_behaviours = vec![
            SyntacticBehaviour {
                frame: "f-act".to_string(),
                senses: vec!["run-2".to_string(), "run-3".to_string()],
            },
            SyntacticBehaviour {
                frame: "f-mixed".to_string(),
                senses: vec!["run-1".to_string(), "run-3".to_string()],
            },
        ];
        lex.add_entry(run);
        lex
    }

    #[test]
    fn entries_split_with_renumbered_senses() {
        let parts = partition_by_lex_name(&lexicon()).unwrap();
        assert_eq!(parts.keys().collect::<Vec<_>>(), vec!["noun.act", "noun.event"]);

        let act = &parts["noun.act"];
        assert_eq!(act.synsets.len(), 2);
        let run = &act.entries[0];
        let ids: Vec<_> = run.senses.iter().map(|s| (s.id.as_str(), s.n)).collect();
        assert_eq!(ids, vec![("run-2", 0), ("run-3", 1)]);

        let event = &parts["noun.event"];
        assert_eq!(event.entries[0].senses.len(), 1);
        assert_eq!(event.entries[0].senses[0].n, 0);
    }

    #[test]
    fn behaviours_are_filtered_and_empty_ones_dropped() {
        let parts = partition_by_lex_name(&lexicon()).unwrap();
        let act = &parts["noun.act"].entries[0];
        assert_eq!(act.syntactic_behaviours.len(), 2);
        assert_eq!(act.syntactic_behaviours[1].senses, vec!["run-3"]);

        let event = &parts["noun.event"].entries[0];
        assert_eq!(event.syntactic_behaviours.len(), 1);
        assert_eq!(event.syntactic_behaviours[0].frame, "f-mixed");
        assert_eq!(event.syntactic_behaviours[0].senses, vec!["run-1"]);
    }

    #[test]
    fn every_sense_lands_in_exactly_one_partition() {
        let lex = lexicon();
        let parts = partition_by_lex_name(&lex).unwrap();
        let total: usize = parts.values().map(Lexicon::sense_count).sum();
        assert_eq!(total, lex.sense_count());
    }

    #[test]
    fn sense_with_unknown_synset_is_fatal() {
        let mut lex = lexicon();
        lex.entries[0].senses.push(sense("run-4", "ewn-nowhere", 3));
        assert!(matches!(
            partition_by_lex_name(&lex),
            Err(CanonError::MissingSynset { .. })
        ));
    }
}
