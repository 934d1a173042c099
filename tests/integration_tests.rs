//! Integration tests for the complete wncanon pipeline
//!
//! These tests drive every crate together on files in a temporary directory:
//! - YAML source → pipeline → WN-LMF partitions + unified file
//! - Published WN-LMF → legacy numbering + snapshot order → next release
//!
//! Run with: cargo test --test integration_tests

use std::fs;
use std::path::Path;
use tempfile::tempdir;
use wncanon_engine::{run_pipeline, PipelineOutput};
use wncanon_ingest_yaml::{load_source, LoadOptions};
use wncanon_lmf::{to_lmf_string, write_lmf_file, LmfDirectory};
use wncanon_model::{Definition, Lemma, LexicalEntry, Lexicon, PartOfSpeech, Sense, Synset};

// ============================================================================
// Fixtures
// ============================================================================

const ENTRIES: &str = r#"
cat:
  n:
    sense:
    - id: 'cat%1:05:00::'
      synset: 02121620-n
      antonym: ['dog%1:05:00::']
dog:
  n:
    sense:
    - id: 'dog%1:05:00::'
      synset: 02084071-n
feline:
  n:
    sense:
    - id: 'feline%1:05:00::'
      synset: 02121620-n
"#;

const ANIMALS: &str = r#"
02121620-n:
  definition: [feline mammal]
  members: [cat, feline]
  partOfSpeech: n
02084071-n:
  definition: [a domesticated canid]
  hypernym: [02121620-n]
  members: [dog]
  partOfSpeech: n
"#;

const FOODS: &str = r#"
07583197-n:
  definition: [liquid food]
  members: [soup]
  partOfSpeech: n
"#;

const SOUP: &str = r#"
soup:
  n:
    sense:
    - id: 'soup%1:13:00::'
      synset: 07583197-n
"#;

fn write_source(dir: &Path) {
    fs::write(dir.join("frames.yaml"), "via: Somebody ----s\n").unwrap();
    fs::write(dir.join("entries-a.yaml"), ENTRIES).unwrap();
    fs::write(dir.join("noun.animal.yaml"), ANIMALS).unwrap();
}

fn run(source: &Path, xml_dir: &Path) -> PipelineOutput {
    let source = load_source(source, &LoadOptions::default()).unwrap();
    let published = LmfDirectory::open(xml_dir).unwrap();
    run_pipeline(source, &published, &published).unwrap()
}

fn publish(output: &PipelineOutput, xml_dir: &Path) -> String {
    LmfDirectory::write_partitions(xml_dir, &output.partitions).unwrap();
    to_lmf_string(&output.unified).unwrap()
}

fn sense_ids(lexicon: &Lexicon) -> Vec<&str> {
    lexicon
        .entries
        .iter()
        .flat_map(|e| e.senses.iter().map(|s| s.id.as_str()))
        .collect()
}

// ============================================================================
// Release cycle
// ============================================================================

#[test]
fn test_yaml_to_release_and_back_is_stable() {
    let root = tempdir().unwrap();
    let source = root.path().join("yaml");
    let xml = root.path().join("xml");
    fs::create_dir_all(&source).unwrap();
    write_source(&source);

    let first = run(&source, &xml);
    assert_eq!(first.report.partitions_without_snapshot, vec!["noun.animal"]);
    let first_unified = publish(&first, &xml);
    let first_partition = fs::read_to_string(xml.join("wn-noun.animal.xml")).unwrap();

    let second = run(&source, &xml);
    assert!(second.report.partitions_without_snapshot.is_empty());
    assert!(second.report.reconcile.values().all(|r| r.is_clean()));
    assert_eq!(second.report.closure.added(), first.report.closure.added());

    let second_unified = publish(&second, &xml);
    assert_eq!(second_unified, first_unified);
    assert_eq!(
        fs::read_to_string(xml.join("wn-noun.animal.xml")).unwrap(),
        first_partition
    );
}

#[test]
fn test_new_lex_name_gets_its_own_file() {
    let root = tempdir().unwrap();
    let source = root.path().join("yaml");
    let xml = root.path().join("xml");
    fs::create_dir_all(&source).unwrap();
    write_source(&source);
    publish(&run(&source, &xml), &xml);

    fs::write(source.join("entries-s.yaml"), SOUP).unwrap();
    fs::write(source.join("noun.food.yaml"), FOODS).unwrap();
    let output = run(&source, &xml);
    assert_eq!(output.report.partitions_without_snapshot, vec!["noun.food"]);
    publish(&output, &xml);

    let reopened = LmfDirectory::open(&xml).unwrap();
    assert_eq!(
        reopened.lex_names().collect::<Vec<_>>(),
        vec!["noun.animal", "noun.food"]
    );
    let food = reopened.get("noun.food").unwrap();
    assert_eq!(sense_ids(food), vec!["ewn-soup-n-07583197-01"]);
}

// ============================================================================
// Published release with legacy numbering
// ============================================================================

fn legacy_partition() -> Lexicon {
    let mut lexicon = Lexicon::default();
    let mut dog = LexicalEntry::new(
        "ewn-dog-n",
        Lemma {
            written_form: "dog".to_string(),
            part_of_speech: PartOfSpeech::Noun,
        },
    );
    dog.senses.push(Sense {
        id: "ewn-dog-n-02084071-00".to_string(),
        synset: "ewn-02084071-n".to_string(),
        sense_key: Some("dog%1:05:00::".to_string()),
        n: 0,
        adjposition: None,
        relations: vec![],
    });
    lexicon.add_entry(dog);

    let mut synset = Synset::new("ewn-02084071-n", PartOfSpeech::Noun, "noun.animal");
    synset.definitions.push(Definition::new("a domesticated canid"));
    lexicon.add_synset(synset);
    lexicon
}

#[test]
fn test_legacy_zero_based_ids_survive_regeneration() {
    let root = tempdir().unwrap();
    let source = root.path().join("yaml");
    let xml = root.path().join("xml");
    fs::create_dir_all(&source).unwrap();
    fs::create_dir_all(&xml).unwrap();
    write_source(&source);
    write_lmf_file(&xml.join("wn-noun.animal.xml"), &legacy_partition()).unwrap();

    let output = run(&source, &xml);
    assert_eq!(output.report.zero_based_synsets, 1);

    let ids = sense_ids(&output.unified);
    assert!(ids.contains(&"ewn-dog-n-02084071-00"));
    assert!(ids.contains(&"ewn-cat-n-02121620-01"));

    // Published entries keep their place; the rest follow.
    let animal = &output.partitions["noun.animal"];
    let entry_ids: Vec<_> = animal.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(entry_ids[0], "ewn-dog-n");
    assert_eq!(output.report.reconcile["noun.animal"].missing_entries.len(), 2);

    let unified = to_lmf_string(&output.unified).unwrap();
    assert!(unified.contains(r#"<SenseRelation relType="antonym" target="ewn-dog-n-02084071-00"/>"#));
}
