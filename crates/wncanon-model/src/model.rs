//! Resolved lexicon entities.
//!
//! Ownership follows the containment of the distribution format: a `Lexicon`
//! owns its entries and synsets, an entry owns its senses and syntactic
//! behaviours, and senses/synsets own their outgoing relations. Cross
//! references (sense → synset, relation → target) are ids, never pointers.

use crate::relations::{SenseRelType, SynsetRelType};
use crate::UnknownTag;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Sentinel ili meaning "no inter-lingual index assigned yet".
pub const NO_ILI: &str = "in";

// ============================================================================
// Closed vocabularies
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    AdjectiveSatellite,
    Conjunction,
    Adposition,
    Other,
    Unknown,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 9] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
        PartOfSpeech::AdjectiveSatellite,
        PartOfSpeech::Conjunction,
        PartOfSpeech::Adposition,
        PartOfSpeech::Other,
        PartOfSpeech::Unknown,
    ];

    /// The one-letter WN-LMF tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "n",
            PartOfSpeech::Verb => "v",
            PartOfSpeech::Adjective => "a",
            PartOfSpeech::Adverb => "r",
            PartOfSpeech::AdjectiveSatellite => "s",
            PartOfSpeech::Conjunction => "c",
            PartOfSpeech::Adposition => "p",
            PartOfSpeech::Other => "x",
            PartOfSpeech::Unknown => "u",
        }
    }
}

impl FromStr for PartOfSpeech {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartOfSpeech::ALL
            .into_iter()
            .find(|pos| pos.as_str() == s)
            .ok_or_else(|| UnknownTag::new("part of speech", s))
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Syntactic position of an adjective sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AdjPosition {
    /// `a`: attributive
    Attributive,
    /// `ip`: immediately postnominal
    ImmediatelyPostnominal,
    /// `p`: predicative
    Predicative,
}

impl AdjPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjPosition::Attributive => "a",
            AdjPosition::ImmediatelyPostnominal => "ip",
            AdjPosition::Predicative => "p",
        }
    }
}

impl FromStr for AdjPosition {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" => Ok(AdjPosition::Attributive),
            "ip" => Ok(AdjPosition::ImmediatelyPostnominal),
            "p" => Ok(AdjPosition::Predicative),
            _ => Err(UnknownTag::new("adjective position", s)),
        }
    }
}

impl fmt::Display for AdjPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Lexicon
// ============================================================================

/// Descriptive metadata carried on the `<Lexicon>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconMeta {
    pub id: String,
    pub label: String,
    pub language: String,
    pub email: String,
    pub license: String,
    pub version: String,
    pub url: String,
}

impl Default for LexiconMeta {
    fn default() -> Self {
        Self {
            id: "ewn".to_string(),
            label: "English WordNet".to_string(),
            language: "en".to_string(),
            email: "english-wordnet@googlegroups.com".to_string(),
            license: "https://creativecommons.org/licenses/by/4.0".to_string(),
            version: "2020".to_string(),
            url: "https://github.com/globalwordnet/english-wordnet".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Lexicon {
    pub meta: LexiconMeta,
    pub entries: Vec<LexicalEntry>,
    pub synsets: Vec<Synset>,
    /// Free-text comments keyed by the synset they precede in the XML.
    pub comments: BTreeMap<String, String>,
}

impl Lexicon {
    pub fn new(meta: LexiconMeta) -> Self {
        Self {
            meta,
            entries: Vec::new(),
            synsets: Vec::new(),
            comments: BTreeMap::new(),
        }
    }

    pub fn add_entry(&mut self, entry: LexicalEntry) {
        self.entries.push(entry);
    }

    pub fn add_synset(&mut self, synset: Synset) {
        self.synsets.push(synset);
    }

    /// Linear lookup; callers that probe repeatedly should build an index.
    pub fn entry_by_id(&self, id: &str) -> Option<&LexicalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Linear lookup; callers that probe repeatedly should build an index.
    pub fn synset_by_id(&self, id: &str) -> Option<&Synset> {
        self.synsets.iter().find(|s| s.id == id)
    }

    pub fn senses(&self) -> impl Iterator<Item = &Sense> {
        self.entries.iter().flat_map(|e| e.senses.iter())
    }

    pub fn sense_count(&self) -> usize {
        self.entries.iter().map(|e| e.senses.len()).sum()
    }
}

// ============================================================================
// Entries and senses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lemma {
    pub written_form: String,
    pub part_of_speech: PartOfSpeech,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub written_form: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalEntry {
    pub id: String,
    pub lemma: Lemma,
    pub forms: Vec<Form>,
    pub senses: Vec<Sense>,
    pub syntactic_behaviours: Vec<SyntacticBehaviour>,
}

impl LexicalEntry {
    pub fn new(id: impl Into<String>, lemma: Lemma) -> Self {
        Self {
            id: id.into(),
            lemma,
            forms: Vec::new(),
            senses: Vec::new(),
            syntactic_behaviours: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sense {
    pub id: String,
    pub synset: String,
    pub sense_key: Option<String>,
    pub n: usize,
    pub adjposition: Option<AdjPosition>,
    pub relations: Vec<SenseRelation>,
}

/// Target of a sense relation.
///
/// Relations read from the editable source point at sense keys; the closure
/// pass rewrites every one of them to a final sense id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SenseRef {
    Key(String),
    Id(String),
}

impl SenseRef {
    pub fn as_id(&self) -> Option<&str> {
        match self {
            SenseRef::Id(id) => Some(id),
            SenseRef::Key(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SenseRef::Key(s) | SenseRef::Id(s) => s,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, SenseRef::Id(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SenseRelation {
    pub target: SenseRef,
    pub rel_type: SenseRelType,
}

impl SenseRelation {
    pub fn to_key(key: impl Into<String>, rel_type: SenseRelType) -> Self {
        Self {
            target: SenseRef::Key(key.into()),
            rel_type,
        }
    }

    pub fn to_id(id: impl Into<String>, rel_type: SenseRelType) -> Self {
        Self {
            target: SenseRef::Id(id.into()),
            rel_type,
        }
    }
}

/// A subcategorization frame shared by some senses of one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntacticBehaviour {
    pub frame: String,
    pub senses: Vec<String>,
}

// ============================================================================
// Synsets
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub text: String,
}

impl Definition {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub text: String,
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SynsetRelation {
    pub target: String,
    pub rel_type: SynsetRelType,
}

impl SynsetRelation {
    pub fn new(target: impl Into<String>, rel_type: SynsetRelType) -> Self {
        Self {
            target: target.into(),
            rel_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synset {
    pub id: String,
    pub ili: String,
    pub part_of_speech: PartOfSpeech,
    pub lex_name: String,
    pub source: Option<String>,
    pub definitions: Vec<Definition>,
    pub ili_definition: Option<Definition>,
    pub examples: Vec<Example>,
    pub relations: Vec<SynsetRelation>,
}

impl Synset {
    pub fn new(
        id: impl Into<String>,
        part_of_speech: PartOfSpeech,
        lex_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            ili: NO_ILI.to_string(),
            part_of_speech,
            lex_name: lex_name.into(),
            source: None,
            definitions: Vec::new(),
            ili_definition: None,
            examples: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn has_ili(&self) -> bool {
        self.ili != NO_ILI
    }

    /// A synset without an ili proposes its first definition as the ILI
    /// definition.
    pub fn promote_ili_definition(&mut self) {
        if !self.has_ili() && self.ili_definition.is_none() {
            self.ili_definition = self.definitions.first().cloned();
        }
    }
}
