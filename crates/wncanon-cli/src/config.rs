//! Run configuration.
//!
//! Defaults match the layout of the English WordNet repository. A JSON file
//! can override any field; command-line flags override the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wncanon_ingest_yaml::LoadOptions;
use wncanon_model::LexiconMeta;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonConfig {
    pub id_prefix: String,
    /// Metadata of the unified lexicon.
    pub meta: LexiconMeta,
    /// Metadata written on each per-lex-name file; the unified metadata when
    /// unset.
    pub partition_meta: Option<LexiconMeta>,
    pub source_dir: PathBuf,
    pub xml_dir: PathBuf,
    pub unified_file: PathBuf,
}

impl Default for CanonConfig {
    fn default() -> Self {
        Self {
            id_prefix: "ewn".to_string(),
            meta: LexiconMeta::default(),
            partition_meta: None,
            source_dir: PathBuf::from("src/yaml"),
            xml_dir: PathBuf::from("src/xml"),
            unified_file: PathBuf::from("wn-from-yaml.xml"),
        }
    }
}

impl CanonConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            id_prefix: self.id_prefix.clone(),
            meta: self.meta.clone(),
        }
    }
}
