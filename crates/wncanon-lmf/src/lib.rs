//! WN-LMF XML for wncanon
//!
//! - [`reader`]: WN-LMF → [`Lexicon`] (published resource, snapshots)
//! - [`writer`]: [`Lexicon`] → WN-LMF
//! - [`LmfDirectory`]: the published `wn-<lex name>.xml` files of a release,
//!   serving both as legacy sense index and as snapshot store for the engine

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use wncanon_engine::error::BoxError;
use wncanon_engine::legacy::{LegacySenseIndex, SnapshotStore};
use wncanon_model::Lexicon;

pub mod error;
pub mod reader;
pub mod writer;

pub use error::LmfError;
pub use reader::parse_lmf;
pub use writer::{to_lmf_string, write_lmf};

pub fn read_lmf_file(path: &Path) -> Result<Lexicon> {
    let xml = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_lmf(&xml).with_context(|| format!("parsing {}", path.display()))
}

pub fn write_lmf_file(path: &Path, lexicon: &Lexicon) -> Result<()> {
    let xml = to_lmf_string(lexicon)?;
    std::fs::write(path, xml).with_context(|| format!("writing {}", path.display()))
}

/// File name of the partition for `lex_name`.
pub fn partition_file_name(lex_name: &str) -> String {
    format!("wn-{lex_name}.xml")
}

/// Lex name encoded in a partition file name, if it is one.
pub fn lex_name_of(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.strip_prefix("wn-")?.strip_suffix(".xml")
}

// ============================================================================
// Published release directory
// ============================================================================

/// Every `wn-*.xml` file of a directory, read eagerly.
#[derive(Debug, Clone, Default)]
pub struct LmfDirectory {
    dir: PathBuf,
    lexicons: BTreeMap<String, Lexicon>,
}

impl LmfDirectory {
    /// Read all partition files of `dir`. A missing directory yields an
    /// empty store.
    pub fn open(dir: &Path) -> Result<Self> {
        let mut lexicons = BTreeMap::new();
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "no published XML directory, starting fresh");
            return Ok(Self {
                dir: dir.to_path_buf(),
                lexicons,
            });
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
            if entry.file_type().is_file() && lex_name_of(entry.path()).is_some() {
                paths.push(entry.into_path());
            }
        }
        paths.sort();

        for path in paths {
            let Some(lex_name) = lex_name_of(&path).map(str::to_string) else {
                continue;
            };
            let lexicon = read_lmf_file(&path)?;
            tracing::debug!(
                lex_name = %lex_name,
                entries = lexicon.entries.len(),
                synsets = lexicon.synsets.len(),
                "loaded published partition"
            );
            lexicons.insert(lex_name, lexicon);
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            lexicons,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn lex_names(&self) -> impl Iterator<Item = &str> {
        self.lexicons.keys().map(String::as_str)
    }

    pub fn get(&self, lex_name: &str) -> Option<&Lexicon> {
        self.lexicons.get(lex_name)
    }

    pub fn len(&self) -> usize {
        self.lexicons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicons.is_empty()
    }

    /// Write each partition to `wn-<lex name>.xml` under `dir`.
    pub fn write_partitions(dir: &Path, partitions: &BTreeMap<String, Lexicon>) -> Result<Vec<PathBuf>> {
        // Render everything before touching the filesystem.
        let rendered = partitions
            .iter()
            .map(|(lex_name, lexicon)| Ok((dir.join(partition_file_name(lex_name)), to_lmf_string(lexicon)?)))
            .collect::<Result<Vec<_>>>()?;
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let mut written = Vec::with_capacity(rendered.len());
        for (path, xml) in rendered {
            std::fs::write(&path, xml).with_context(|| format!("writing {}", path.display()))?;
            written.push(path);
        }
        Ok(written)
    }
}

impl LegacySenseIndex for LmfDirectory {
    fn for_each_sense(&self, visit: &mut dyn FnMut(&str, &str)) {
        self.lexicons.for_each_sense(visit);
    }
}

impl SnapshotStore for LmfDirectory {
    fn snapshot(&self, lex_name: &str) -> std::result::Result<Option<Lexicon>, BoxError> {
        Ok(self.lexicons.get(lex_name).cloned())
    }
}
