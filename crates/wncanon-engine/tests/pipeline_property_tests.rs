use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use wncanon_engine::closure::close_relations;
use wncanon_engine::identity::SenseIdentity;
use wncanon_engine::legacy::NoLegacy;
use wncanon_engine::run_pipeline;
use wncanon_model::ids::provisional_sense_id;
use wncanon_model::{
    Definition, Lemma, Lexicon, PartOfSpeech, ProvisionalEntry, ProvisionalSense, SenseRelType,
    SenseRelation, SourceLexicon, Synset, SynsetRelType, SynsetRelation,
};

const LEMMAS: &[&str] = &["bank", "shore", "river bank", "slope", "edge"];
const LEX_NAMES: &[&str] = &["noun.object", "noun.location"];

const SENSE_KINDS: &[SenseRelType] = &[
    SenseRelType::Antonym,
    SenseRelType::Derivation,
    SenseRelType::Pertainym,
    SenseRelType::DomainTopic,
    SenseRelType::HasDomainRegion,
    SenseRelType::Also,
];

const SYNSET_KINDS: &[SynsetRelType] = &[
    SynsetRelType::Hypernym,
    SynsetRelType::Hyponym,
    SynsetRelType::MeroPart,
    SynsetRelType::Similar,
    SynsetRelType::Also,
    SynsetRelType::Entails,
];

#[derive(Debug, Clone)]
struct Shape {
    /// (lex name index, member lemma indexes) per synset
    synsets: Vec<(usize, BTreeSet<usize>)>,
    sense_relations: Vec<(prop::sample::Index, prop::sample::Index, usize)>,
    synset_relations: Vec<(usize, usize, usize)>,
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let synsets = prop::collection::vec(
        (0..LEX_NAMES.len(), prop::collection::btree_set(0..LEMMAS.len(), 1..=3)),
        1..=6,
    );
    let sense_relations = prop::collection::vec(
        (any::<prop::sample::Index>(), any::<prop::sample::Index>(), 0..SENSE_KINDS.len()),
        0..12,
    );
    let synset_relations =
        prop::collection::vec((0usize..6, 0usize..6, 0..SYNSET_KINDS.len()), 0..8);
    (synsets, sense_relations, synset_relations).prop_map(
        |(synsets, sense_relations, synset_relations)| Shape {
            synsets,
            sense_relations,
            synset_relations,
        },
    )
}

fn build_source(shape: &Shape) -> SourceLexicon {
    let raw_ids: Vec<String> = (0..shape.synsets.len())
        .map(|i| format!("{:08}-n", 1000 + i))
        .collect();
    let synset_ids: Vec<String> = raw_ids.iter().map(|raw| format!("ewn-{raw}")).collect();

    let mut synsets = Vec::new();
    let mut members = Vec::new();
    for (i, (lex, lemma_idx)) in shape.synsets.iter().enumerate() {
        let mut synset = Synset::new(synset_ids[i].clone(), PartOfSpeech::Noun, LEX_NAMES[*lex]);
        synset.definitions.push(Definition::new(format!("gloss {i}")));
        synsets.push(synset);
        members.push((
            synset_ids[i].clone(),
            lemma_idx.iter().map(|l| LEMMAS[*l].to_string()).collect::<Vec<_>>(),
        ));
    }

    // One entry per lemma, one sense per synset listing it.
    let mut entries: Vec<ProvisionalEntry> = Vec::new();
    let mut keys: Vec<(usize, usize)> = Vec::new();
    for (l, lemma) in LEMMAS.iter().enumerate() {
        let mut senses = Vec::new();
        for (s, (_, lemma_idx)) in shape.synsets.iter().enumerate() {
            if !lemma_idx.contains(&l) {
                continue;
            }
            keys.push((entries.len(), senses.len()));
            senses.push(ProvisionalSense {
                provisional_id: provisional_sense_id("ewn", lemma, PartOfSpeech::Noun, None, &raw_ids[s]),
                sense_key: format!("{lemma}%{s}"),
                synset: synset_ids[s].clone(),
                n: senses.len(),
                adjposition: None,
                relations: vec![],
            });
        }
        if senses.is_empty() {
            continue;
        }
        entries.push(ProvisionalEntry {
            id: format!("ewn-{lemma}-n"),
            lemma: Lemma {
                written_form: lemma.to_string(),
                part_of_speech: PartOfSpeech::Noun,
            },
            forms: vec![],
            senses,
            syntactic_behaviours: vec![],
        });
    }

    for (from, to, kind) in &shape.sense_relations {
        let (fe, fs) = keys[from.index(keys.len())];
        let (te, ts) = keys[to.index(keys.len())];
        let target_key = entries[te].senses[ts].sense_key.clone();
        entries[fe].senses[fs]
            .relations
            .push(SenseRelation::to_key(target_key, SENSE_KINDS[*kind]));
    }
    for (from, to, kind) in &shape.synset_relations {
        let from = from % synsets.len();
        let target = synset_ids[to % synset_ids.len()].clone();
        synsets[from]
            .relations
            .push(SynsetRelation::new(target, SYNSET_KINDS[*kind]));
    }

    SourceLexicon {
        entries,
        synsets,
        members: members.into_iter().collect(),
        ..SourceLexicon::default()
    }
}

fn sense_edges(lexicon: &Lexicon) -> HashSet<(String, SenseRelType, String)> {
    lexicon
        .senses()
        .flat_map(|s| {
            s.relations
                .iter()
                .map(move |r| (s.id.clone(), r.rel_type, r.target.as_str().to_string()))
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn identical_input_gives_identical_output(shape in shape_strategy()) {
        let a = run_pipeline(build_source(&shape), &NoLegacy, &NoLegacy).expect("run a");
        let b = run_pipeline(build_source(&shape), &NoLegacy, &NoLegacy).expect("run b");
        prop_assert_eq!(a.unified, b.unified);
        prop_assert_eq!(a.partitions, b.partitions);
    }

    #[test]
    fn closing_twice_adds_nothing(shape in shape_strategy()) {
        let out = run_pipeline(build_source(&shape), &NoLegacy, &NoLegacy).expect("run");
        let mut again = out.unified.clone();
        let stats = close_relations(&mut again, &SenseIdentity::default()).expect("close");
        prop_assert_eq!(stats.added(), 0);
        prop_assert_eq!(stats.rewritten_targets, 0);
        prop_assert_eq!(again, out.unified);
    }

    #[test]
    fn every_invertible_edge_has_its_inverse(shape in shape_strategy()) {
        let out = run_pipeline(build_source(&shape), &NoLegacy, &NoLegacy).expect("run");
        let edges = sense_edges(&out.unified);
        for (from, kind, to) in &edges {
            if let Some(inverse) = kind.inverse() {
                prop_assert!(
                    edges.contains(&(to.clone(), inverse, from.clone())),
                    "missing {} {} {}", to, inverse, from
                );
            }
        }
        // No edge is ever present twice unless the source authored it twice.
        let total: usize = out.unified.senses().map(|s| s.relations.len()).sum();
        let authored_dupes: usize = shape.sense_relations.len();
        prop_assert!(total <= edges.len() + authored_dupes);

        let synset_edges: HashSet<(String, SynsetRelType, String)> = out
            .unified
            .synsets
            .iter()
            .flat_map(|s| s.relations.iter().map(move |r| (s.id.clone(), r.rel_type, r.target.clone())))
            .collect();
        for (from, kind, to) in &synset_edges {
            if let Some(inverse) = kind.distinct_inverse() {
                prop_assert!(synset_edges.contains(&(to.clone(), inverse, from.clone())));
            }
        }
    }

    #[test]
    fn ordinals_follow_member_positions(shape in shape_strategy()) {
        let source = build_source(&shape);
        let members = source.members.clone();
        let out = run_pipeline(source, &NoLegacy, &NoLegacy).expect("run");
        for entry in &out.unified.entries {
            for sense in &entry.senses {
                let position = members
                    .position(&sense.synset, &entry.lemma.written_form)
                    .expect("lemma is a member");
                let suffix = format!("-{:02}", position + 1);
                prop_assert!(sense.id.ends_with(&suffix), "{} should end in {}", sense.id, suffix);
            }
        }
    }

    #[test]
    fn partitions_cover_everything_once(shape in shape_strategy()) {
        let out = run_pipeline(build_source(&shape), &NoLegacy, &NoLegacy).expect("run");

        let mut seen_senses: HashMap<String, usize> = HashMap::new();
        let mut seen_synsets: HashMap<String, usize> = HashMap::new();
        for (lex_name, partition) in &out.partitions {
            let local: HashSet<&str> = partition.synsets.iter().map(|s| s.id.as_str()).collect();
            for synset in &partition.synsets {
                prop_assert_eq!(&synset.lex_name, lex_name);
                *seen_synsets.entry(synset.id.clone()).or_default() += 1;
            }
            for entry in &partition.entries {
                for (n, sense) in entry.senses.iter().enumerate() {
                    prop_assert!(local.contains(sense.synset.as_str()));
                    prop_assert_eq!(sense.n, n);
                    *seen_senses.entry(sense.id.clone()).or_default() += 1;
                }
            }
        }
        prop_assert_eq!(seen_synsets.len(), out.unified.synsets.len());
        prop_assert!(seen_synsets.values().all(|c| *c == 1));
        prop_assert_eq!(seen_senses.len(), out.unified.sense_count());
        prop_assert!(seen_senses.values().all(|c| *c == 1));
    }

    #[test]
    fn rerun_against_own_output_changes_nothing(shape in shape_strategy()) {
        let first = run_pipeline(build_source(&shape), &NoLegacy, &NoLegacy).expect("first");
        let snapshots: BTreeMap<String, Lexicon> = first.partitions.clone();
        let second = run_pipeline(build_source(&shape), &NoLegacy, &snapshots).expect("second");
        prop_assert_eq!(second.report.renamed_senses, 0);
        prop_assert_eq!(second.partitions, first.partitions);
    }
}
