//! Relation closure.
//!
//! Completes the relation graph after identity resolution:
//!
//! 1. every sense relation target still expressed as a sense key is rewritten
//!    to the final sense id;
//! 2. every sense relation whose kind has an inverse gets the inverse edge on
//!    its target sense (symmetric kinds get the same kind back);
//! 3. every synset relation whose kind has a *distinct* inverse gets the
//!    inverse edge on its target synset.
//!
//! An inverse edge is only added when the target does not already carry it,
//! so relations authored in both directions are never duplicated and running
//! the pass twice adds nothing. New edges are appended; ordering is the
//! reconciler's job.

use crate::error::{CanonError, Result};
use crate::identity::SenseIdentity;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use wncanon_model::{Lexicon, SenseRef, SenseRelType, SenseRelation, SynsetRelType, SynsetRelation};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClosureStats {
    /// Sense relation targets rewritten from sense key to id.
    pub rewritten_targets: usize,
    pub added_sense_relations: usize,
    pub added_synset_relations: usize,
}

impl ClosureStats {
    pub fn added(&self) -> usize {
        self.added_sense_relations + self.added_synset_relations
    }
}

pub fn close_relations(lexicon: &mut Lexicon, identity: &SenseIdentity) -> Result<ClosureStats> {
    let rewritten_targets = rewrite_sense_targets(lexicon, identity)?;
    let added_sense_relations = complete_sense_inverses(lexicon)?;
    let added_synset_relations = complete_synset_inverses(lexicon)?;
    let stats = ClosureStats {
        rewritten_targets,
        added_sense_relations,
        added_synset_relations,
    };
    tracing::debug!(
        rewritten = stats.rewritten_targets,
        sense_inverses = stats.added_sense_relations,
        synset_inverses = stats.added_synset_relations,
        "closed relation graph"
    );
    Ok(stats)
}

/// Rewrite sense-key targets to final ids. Returns the number rewritten.
pub fn rewrite_sense_targets(lexicon: &mut Lexicon, identity: &SenseIdentity) -> Result<usize> {
    let mut rewritten = 0;
    for entry in &mut lexicon.entries {
        for sense in &mut entry.senses {
            for rel in &mut sense.relations {
                let SenseRef::Key(key) = &rel.target else {
                    continue;
                };
                let final_id = identity
                    .final_id(key)
                    .ok_or_else(|| CanonError::MissingSenseKey {
                        from_sense: sense.id.clone(),
                        key: key.clone(),
                        rel_type: rel.rel_type,
                    })?;
                rel.target = SenseRef::Id(final_id.to_string());
                rewritten += 1;
            }
        }
    }
    Ok(rewritten)
}

/// Add missing inverse sense relations. Every target must already be an id.
pub fn complete_sense_inverses(lexicon: &mut Lexicon) -> Result<usize> {
    let mut location: HashMap<String, (usize, usize)> = HashMap::new();
    let mut present: HashSet<(String, SenseRelType, String)> = HashSet::new();
    for (ei, entry) in lexicon.entries.iter().enumerate() {
        for (si, sense) in entry.senses.iter().enumerate() {
            location.insert(sense.id.clone(), (ei, si));
            for rel in &sense.relations {
                present.insert((sense.id.clone(), rel.rel_type, rel.target.as_str().to_string()));
            }
        }
    }

    let mut additions: Vec<((usize, usize), SenseRelation)> = Vec::new();
    for entry in &lexicon.entries {
        for sense in &entry.senses {
            for rel in &sense.relations {
                let Some(inverse) = rel.rel_type.inverse() else {
                    continue;
                };
                let target = rel.target.as_id().ok_or_else(|| CanonError::MissingSenseKey {
                    from_sense: sense.id.clone(),
                    key: rel.target.as_str().to_string(),
                    rel_type: rel.rel_type,
                })?;
                let at = *location
                    .get(target)
                    .ok_or_else(|| CanonError::UnresolvedSenseTarget {
                        from_sense: sense.id.clone(),
                        target: target.to_string(),
                    })?;
                if present.insert((target.to_string(), inverse, sense.id.clone())) {
                    additions.push((at, SenseRelation::to_id(sense.id.clone(), inverse)));
                }
            }
        }
    }

    let added = additions.len();
    for ((ei, si), rel) in additions {
        lexicon.entries[ei].senses[si].relations.push(rel);
    }
    Ok(added)
}

/// Add missing inverse synset relations for kinds with a distinct inverse.
pub fn complete_synset_inverses(lexicon: &mut Lexicon) -> Result<usize> {
    let location: HashMap<String, usize> = lexicon
        .synsets
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id.clone(), i))
        .collect();
    let mut present: HashSet<(String, SynsetRelType, String)> = lexicon
        .synsets
        .iter()
        .flat_map(|s| {
            s.relations
                .iter()
                .map(move |r| (s.id.clone(), r.rel_type, r.target.clone()))
        })
        .collect();

    let mut additions: Vec<(usize, SynsetRelation)> = Vec::new();
    for synset in &lexicon.synsets {
        for rel in &synset.relations {
            let Some(inverse) = rel.rel_type.distinct_inverse() else {
                continue;
            };
            let at = *location
                .get(&rel.target)
                .ok_or_else(|| CanonError::MissingSynset {
                    from: synset.id.clone(),
                    synset: rel.target.clone(),
                })?;
            if present.insert((rel.target.clone(), inverse, synset.id.clone())) {
                additions.push((at, SynsetRelation::new(synset.id.clone(), inverse)));
            }
        }
    }

    let added = additions.len();
    for (i, rel) in additions {
        lexicon.synsets[i].relations.push(rel);
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wncanon_model::{Lemma, LexicalEntry, PartOfSpeech, Sense, Synset};

    fn sense(id: &str, key: &str, synset: &str, relations: Vec<SenseRelation>) -> Sense {
        Sense {
            id: id.to_string(),
            synset: synset.to_string(),
            sense_key: Some(key.to_string()),
            n: 0,
            adjposition: None,
            relations,
        }
    }

    fn entry(id: &str, senses: Vec<Sense>) -> LexicalEntry {
        let mut e = LexicalEntry::new(
            id,
            Lemma {
                written_form: id.to_string(),
                part_of_speech: PartOfSpeech::Noun,
            },
        );
        e.senses = senses;
        e
    }

    fn identity_for(lexicon: &Lexicon) -> SenseIdentity {
        // Resolve through the real resolver so the maps are populated the
        // same way the pipeline populates them.
        let members: wncanon_model::SynsetMembers = lexicon
            .entries
            .iter()
            .flat_map(|e| {
                e.senses
                    .iter()
                    .map(move |s| (s.synset.clone(), vec![e.lemma.written_form.clone()]))
            })
            .collect();
        let zero = crate::identity::ZeroBasedSynsets::default();
        let resolver = crate::identity::IdentityResolver::new(&members, &zero);
        let mut identity = SenseIdentity::default();
        for e in &lexicon.entries {
            let provisional = wncanon_model::ProvisionalEntry {
                id: e.id.clone(),
                lemma: e.lemma.clone(),
                forms: vec![],
                senses: e
                    .senses
                    .iter()
                    .map(|s| wncanon_model::ProvisionalSense {
                        provisional_id: s.id.trim_end_matches("-01").to_string(),
                        sense_key: s.sense_key.clone().unwrap(),
                        synset: s.synset.clone(),
                        n: s.n,
                        adjposition: None,
                        relations: vec![],
                    })
                    .collect(),
                syntactic_behaviours: vec![],
            };
            resolver.resolve_entry(provisional, &mut identity).unwrap();
        }
        identity
    }

    fn sample() -> Lexicon {
        let mut lex = Lexicon::default();
        lex.add_entry(entry(
            "hot",
            vec![sense(
                "hot-01",
                "hot%3",
                "ewn-s-hot",
                vec![
                    SenseRelation::to_key("cold%3", SenseRelType::Antonym),
                    SenseRelation::to_key("physics%1", SenseRelType::DomainTopic),
                ],
            )],
        ));
        lex.add_entry(entry(
            "cold",
            vec![sense("cold-01", "cold%3", "ewn-s-cold", vec![])],
        ));
        lex.add_entry(entry(
            "physics",
            vec![sense("physics-01", "physics%1", "ewn-s-physics", vec![])],
        ));
        lex
    }

    fn relations_of<'a>(lex: &'a Lexicon, id: &str) -> &'a [SenseRelation] {
        lex.senses()
            .find(|s| s.id == id)
            .map(|s| s.relations.as_slice())
            .unwrap()
    }

    #[test]
    fn keys_are_rewritten_and_inverses_added() {
        let mut lex = sample();
        let identity = identity_for(&lex);
        let stats = close_relations(&mut lex, &identity).unwrap();

        assert_eq!(stats.rewritten_targets, 2);
        assert_eq!(
            relations_of(&lex, "hot-01"),
            &[
                SenseRelation::to_id("cold-01", SenseRelType::Antonym),
                SenseRelation::to_id("physics-01", SenseRelType::DomainTopic),
            ]
        );
        assert_eq!(
            relations_of(&lex, "cold-01"),
            &[SenseRelation::to_id("hot-01", SenseRelType::Antonym)]
        );
        assert_eq!(
            relations_of(&lex, "physics-01"),
            &[SenseRelation::to_id("hot-01", SenseRelType::HasDomainTopic)]
        );
        assert_eq!(stats.added_sense_relations, 2);
    }

    #[test]
    fn authored_reverse_edges_are_not_duplicated() {
        let mut lex = sample();
        lex.entries[1].senses[0]
            .relations
            .push(SenseRelation::to_key("hot%3", SenseRelType::Antonym));
        let identity = identity_for(&lex);
        let stats = close_relations(&mut lex, &identity).unwrap();

        assert_eq!(relations_of(&lex, "cold-01").len(), 1);
        assert_eq!(relations_of(&lex, "hot-01").len(), 2);
        assert_eq!(stats.added_sense_relations, 1);
    }

    #[test]
    fn second_pass_adds_nothing() {
        let mut lex = sample();
        let identity = identity_for(&lex);
        close_relations(&mut lex, &identity).unwrap();
        let snapshot = lex.clone();

        let again = close_relations(&mut lex, &identity).unwrap();
        assert_eq!(again, ClosureStats::default());
        assert_eq!(lex, snapshot);
    }

    #[test]
    fn unknown_sense_key_is_fatal() {
        let mut lex = sample();
        lex.entries[2].senses[0]
            .relations
            .push(SenseRelation::to_key("typo%1", SenseRelType::Derivation));
        let identity = identity_for(&lex);
        let err = close_relations(&mut lex, &identity).unwrap_err();
        assert!(matches!(err, CanonError::MissingSenseKey { ref key, .. } if key == "typo%1"));
    }

    #[test]
    fn synset_inverses_respect_existing_edges() {
        let mut lex = Lexicon::default();
        let mut cat = Synset::new("ewn-cat", PartOfSpeech::Noun, "noun.animal");
        cat.relations
            .push(SynsetRelation::new("ewn-feline", SynsetRelType::Hypernym));
        cat.relations
            .push(SynsetRelation::new("ewn-lion", SynsetRelType::Similar));
        let mut feline = Synset::new("ewn-feline", PartOfSpeech::Noun, "noun.animal");
        feline
            .relations
            .push(SynsetRelation::new("ewn-cat", SynsetRelType::Hyponym));
        let mut lion = Synset::new("ewn-lion", PartOfSpeech::Noun, "noun.animal");
        lion.relations
            .push(SynsetRelation::new("ewn-feline", SynsetRelType::Hypernym));
        lex.synsets = vec![cat, feline, lion];

        let added = complete_synset_inverses(&mut lex).unwrap();
        assert_eq!(added, 1);
        let feline = lex.synset_by_id("ewn-feline").unwrap();
        assert_eq!(
            feline.relations,
            vec![
                SynsetRelation::new("ewn-cat", SynsetRelType::Hyponym),
                SynsetRelation::new("ewn-lion", SynsetRelType::Hyponym),
            ]
        );
        // `similar` is symmetric and left as authored.
        assert!(lex.synset_by_id("ewn-lion").unwrap().relations.len() == 1);
        assert_eq!(complete_synset_inverses(&mut lex).unwrap(), 0);
    }

    #[test]
    fn synset_relation_to_unknown_synset_is_fatal() {
        let mut lex = Lexicon::default();
        let mut cat = Synset::new("ewn-cat", PartOfSpeech::Noun, "noun.animal");
        cat.relations
            .push(SynsetRelation::new("ewn-missing", SynsetRelType::Hypernym));
        lex.synsets = vec![cat];
        assert!(matches!(
            complete_synset_inverses(&mut lex),
            Err(CanonError::MissingSynset { .. })
        ));
    }
}
