//! YAML source loader
//!
//! The editable source is a flat directory of YAML files:
//!
//! ```text
//! src/yaml/
//!   frames.yaml          frame key → subcategorization frame text
//!   entries-a.yaml       lemma → pos → { form, sense: [...] }
//!   entries-b.yaml
//!   ...
//!   noun.animal.yaml     synset id → { members, partOfSpeech, definition, ... }
//!   verb.motion.yaml     (lex name = file stem)
//! ```
//!
//! Loading produces a [`SourceLexicon`]: provisional entries whose senses do
//! not have final ids yet, the synsets, and the member-order table the
//! identity resolver needs. Files are read in sorted path order so that the
//! construction order of the result does not depend on the filesystem.

use anyhow::{anyhow, bail, Context, Result};
use serde_yaml::{Mapping, Value};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use wncanon_model::{LexiconMeta, SourceLexicon, SynsetMembers};

pub mod entries;
pub mod synsets;

pub use entries::parse_entries;
pub use synsets::{parse_synsets, ParsedSynset};

pub const FRAMES_FILE: &str = "frames.yaml";
pub const ENTRIES_PREFIX: &str = "entries-";

/// Frame key → frame text.
pub type Frames = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Prefix of every generated id (`ewn` → `ewn-02121620-n`).
    pub id_prefix: String,
    pub meta: LexiconMeta,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            id_prefix: "ewn".to_string(),
            meta: LexiconMeta::default(),
        }
    }
}

/// Classification of a file in the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFile {
    Frames,
    Entries,
    /// A lexicographer file holding synsets.
    Synsets { lex_name: String },
}

impl SourceFile {
    pub fn classify(path: &Path) -> Option<SourceFile> {
        if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        if path.file_name()?.to_str()? == FRAMES_FILE {
            Some(SourceFile::Frames)
        } else if stem.starts_with(ENTRIES_PREFIX) {
            Some(SourceFile::Entries)
        } else {
            Some(SourceFile::Synsets {
                lex_name: stem.to_string(),
            })
        }
    }
}

/// All `*.yaml` files directly inside `dir`, sorted by path.
pub fn yaml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        if entry.file_type().is_file() && SourceFile::classify(entry.path()).is_some() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn read_yaml(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_frames(text: &str) -> Result<Frames> {
    let value: Value = serde_yaml::from_str(text)?;
    let mut frames = Frames::new();
    for (key, frame) in as_mapping(&value, "frames")? {
        frames.insert(scalar(key)?, scalar(frame)?);
    }
    Ok(frames)
}

/// Load a whole source directory.
pub fn load_source(dir: &Path, options: &LoadOptions) -> Result<SourceLexicon> {
    let files = yaml_files(dir)?;
    if files.is_empty() {
        bail!("no YAML files in {}", dir.display());
    }

    let frames_path = dir.join(FRAMES_FILE);
    let frames = if frames_path.exists() {
        let text = std::fs::read_to_string(&frames_path)
            .with_context(|| format!("reading {}", frames_path.display()))?;
        parse_frames(&text).with_context(|| format!("parsing {}", frames_path.display()))?
    } else {
        tracing::warn!(dir = %dir.display(), "no frames.yaml, syntactic behaviours unavailable");
        Frames::new()
    };

    let mut source = SourceLexicon {
        meta: options.meta.clone(),
        ..SourceLexicon::default()
    };
    let mut entry_ids = HashSet::new();
    let mut members = Vec::new();

    for path in &files {
        match SourceFile::classify(path) {
            Some(SourceFile::Entries) => {
                let value = read_yaml(path)?;
                let entries = parse_entries(&value, &frames, &options.id_prefix)
                    .with_context(|| format!("loading entries from {}", path.display()))?;
                tracing::debug!(path = %path.display(), entries = entries.len(), "loaded entries");
                for entry in entries {
                    if !entry_ids.insert(entry.id.clone()) {
                        bail!("entry `{}` defined twice (again in {})", entry.id, path.display());
                    }
                    source.entries.push(entry);
                }
            }
            Some(SourceFile::Synsets { lex_name }) => {
                let value = read_yaml(path)?;
                let parsed = parse_synsets(&value, &lex_name, &options.id_prefix)
                    .with_context(|| format!("loading synsets from {}", path.display()))?;
                tracing::debug!(path = %path.display(), synsets = parsed.len(), "loaded synsets");
                for ParsedSynset { synset, members: m } in parsed {
                    members.push((synset.id.clone(), m));
                    source.synsets.push(synset);
                }
            }
            Some(SourceFile::Frames) | None => {}
        }
    }

    let mut seen = HashSet::new();
    for (id, _) in &members {
        if !seen.insert(id.as_str()) {
            bail!("synset `{id}` defined in more than one file");
        }
    }
    source.members = members.into_iter().collect::<SynsetMembers>();

    tracing::info!(
        entries = source.entries.len(),
        synsets = source.synsets.len(),
        "loaded YAML source"
    );
    Ok(source)
}

// ============================================================================
// Value helpers
// ============================================================================

/// Render a scalar key or value as text. Lemmas such as `1` or `null` parse
/// as non-strings in YAML.
pub(crate) fn scalar(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        other => Err(anyhow!("expected a scalar, found {other:?}")),
    }
}

pub(crate) fn as_mapping<'v>(value: &'v Value, what: &str) -> Result<&'v Mapping> {
    value
        .as_mapping()
        .ok_or_else(|| anyhow!("{what}: expected a mapping"))
}

/// A list of scalars; a lone scalar counts as a one-element list.
pub(crate) fn scalar_list(value: &Value, what: &str) -> Result<Vec<String>> {
    match value {
        Value::Sequence(items) => items
            .iter()
            .map(scalar)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("{what}: bad list item")),
        other => Ok(vec![scalar(other).with_context(|| format!("{what}: expected a list"))?]),
    }
}
