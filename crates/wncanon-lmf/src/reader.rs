//! WN-LMF reader.
//!
//! Reads the dialect produced by [`crate::writer`] (and the published
//! resource) back into a [`Lexicon`]. Only the first `<Lexicon>` of a
//! document is read. Sense relation targets come back as resolved ids.
//!
//! A comment that is a direct child of `<Lexicon>` and sits immediately before
//! a `<Synset>` is kept as that synset's comment. Other comments are dropped.

use crate::error::LmfError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use wncanon_model::{
    AdjPosition, Definition, Example, Form, Lemma, LexicalEntry, Lexicon, LexiconMeta,
    PartOfSpeech, Sense, SenseRelType, SenseRelation, Synset, SynsetRelType, SynsetRelation,
    SyntacticBehaviour,
};

/// Attributes of one element, keys as written (`dc:identifier`).
struct Attrs(Vec<(String, String)>);

impl Attrs {
    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn require(&self, element: &'static str, attribute: &'static str) -> Result<&str, LmfError> {
        self.get(attribute)
            .ok_or(LmfError::MissingAttribute { element, attribute })
    }
}

/// Text-bearing synset children.
enum TextTarget {
    Definition,
    IliDefinition,
    Example { source: Option<String> },
}

#[derive(Default)]
struct State {
    lexicon: Option<Lexicon>,
    done: bool,
    entry: Option<LexicalEntry>,
    sense: Option<Sense>,
    synset: Option<Synset>,
    text: Option<(TextTarget, String)>,
    pending_comment: Option<String>,
}

pub fn parse_lmf(xml: &str) -> Result<Lexicon, LmfError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut state = State::default();

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|source| LmfError::Xml { position, source })?;
        match event {
            Event::Start(e) => state.open(&e, false, position)?,
            Event::Empty(e) => state.open(&e, true, position)?,
            Event::End(e) => state.close(e.name().as_ref()),
            Event::Text(t) => {
                if let Some((_, buf)) = state.text.as_mut() {
                    let text = t
                        .unescape()
                        .map_err(|source| LmfError::Xml { position, source })?;
                    buf.push_str(&text);
                }
            }
            Event::Comment(c) => {
                if state.at_lexicon_level() {
                    let text = String::from_utf8_lossy(&c).trim().to_string();
                    state.pending_comment = Some(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        if state.done {
            break;
        }
    }

    state.lexicon.ok_or(LmfError::NoLexicon)
}

fn attributes(e: &BytesStart<'_>, position: usize) -> Result<Attrs, LmfError> {
    let mut out = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|source| LmfError::Attribute { position, source })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|source| LmfError::Xml { position, source })?
            .into_owned();
        out.push((key, value));
    }
    Ok(Attrs(out))
}

impl State {
    fn lexicon_mut(&mut self, element: &'static str) -> Result<&mut Lexicon, LmfError> {
        self.lexicon.as_mut().ok_or(LmfError::Misplaced {
            element,
            parent: "Lexicon",
        })
    }

    fn entry_mut(&mut self, element: &'static str) -> Result<&mut LexicalEntry, LmfError> {
        self.entry.as_mut().ok_or(LmfError::Misplaced {
            element,
            parent: "LexicalEntry",
        })
    }

    fn synset_mut(&mut self, element: &'static str) -> Result<&mut Synset, LmfError> {
        self.synset.as_mut().ok_or(LmfError::Misplaced {
            element,
            parent: "Synset",
        })
    }

    fn at_lexicon_level(&self) -> bool {
        self.lexicon.is_some() && self.entry.is_none() && self.synset.is_none()
    }

    fn open(&mut self, e: &BytesStart<'_>, empty: bool, position: usize) -> Result<(), LmfError> {
        // Only the element right after the comment can claim it.
        let comment = self.pending_comment.take();
        match e.name().as_ref() {
            b"Lexicon" => {
                if self.lexicon.is_some() {
                    // A second lexicon ends the read.
                    self.done = true;
                    return Ok(());
                }
                let a = attributes(e, position)?;
                let defaults = LexiconMeta::default();
                let field = |key: &str, default: &str| a.get(key).unwrap_or(default).to_string();
                self.lexicon = Some(Lexicon::new(LexiconMeta {
                    id: a.require("Lexicon", "id")?.to_string(),
                    label: field("label", &defaults.label),
                    language: field("language", &defaults.language),
                    email: field("email", &defaults.email),
                    license: field("license", &defaults.license),
                    version: field("version", &defaults.version),
                    url: field("url", &defaults.url),
                }));
            }
            b"LexicalEntry" => {
                self.lexicon_mut("LexicalEntry")?;
                let a = attributes(e, position)?;
                self.entry = Some(LexicalEntry::new(
                    a.require("LexicalEntry", "id")?,
                    Lemma {
                        written_form: String::new(),
                        part_of_speech: PartOfSpeech::Unknown,
                    },
                ));
            }
            b"Lemma" => {
                let a = attributes(e, position)?;
                let lemma = Lemma {
                    written_form: a.require("Lemma", "writtenForm")?.to_string(),
                    part_of_speech: a.require("Lemma", "partOfSpeech")?.parse()?,
                };
                self.entry_mut("Lemma")?.lemma = lemma;
            }
            b"Form" => {
                let a = attributes(e, position)?;
                let written_form = a.require("Form", "writtenForm")?.to_string();
                self.entry_mut("Form")?.forms.push(Form { written_form });
            }
            b"Sense" => {
                let a = attributes(e, position)?;
                let default_n = self.entry_mut("Sense")?.senses.len();
                let n = match a.get("n") {
                    Some(n) => n.parse().map_err(|_| LmfError::InvalidRank {
                        element: "Sense",
                        value: n.to_string(),
                    })?,
                    None => default_n,
                };
                let sense = Sense {
                    id: a.require("Sense", "id")?.to_string(),
                    synset: a.require("Sense", "synset")?.to_string(),
                    sense_key: a.get("dc:identifier").map(str::to_string),
                    n,
                    adjposition: a.get("adjposition").map(str::parse::<AdjPosition>).transpose()?,
                    relations: Vec::new(),
                };
                if empty {
                    self.entry_mut("Sense")?.senses.push(sense);
                } else {
                    self.sense = Some(sense);
                }
            }
            b"SenseRelation" => {
                let a = attributes(e, position)?;
                let rel_type: SenseRelType = a.require("SenseRelation", "relType")?.parse()?;
                let target = a.require("SenseRelation", "target")?.to_string();
                self.sense
                    .as_mut()
                    .ok_or(LmfError::Misplaced {
                        element: "SenseRelation",
                        parent: "Sense",
                    })?
                    .relations
                    .push(SenseRelation::to_id(target, rel_type));
            }
            b"SyntacticBehaviour" => {
                let a = attributes(e, position)?;
                let behaviour = SyntacticBehaviour {
                    frame: a
                        .require("SyntacticBehaviour", "subcategorizationFrame")?
                        .to_string(),
                    senses: a
                        .get("senses")
                        .unwrap_or_default()
                        .split_whitespace()
                        .map(str::to_string)
                        .collect(),
                };
                self.entry_mut("SyntacticBehaviour")?
                    .syntactic_behaviours
                    .push(behaviour);
            }
            b"Synset" => {
                let a = attributes(e, position)?;
                let mut synset = Synset::new(
                    a.require("Synset", "id")?,
                    a.require("Synset", "partOfSpeech")?.parse()?,
                    a.get("dc:subject").unwrap_or_default(),
                );
                if let Some(ili) = a.get("ili") {
                    synset.ili = ili.to_string();
                }
                synset.source = a.get("dc:source").map(str::to_string);
                let lexicon = self.lexicon_mut("Synset")?;
                if let Some(comment) = comment {
                    lexicon.comments.insert(synset.id.clone(), comment);
                }
                if empty {
                    lexicon.add_synset(synset);
                } else {
                    self.synset = Some(synset);
                }
            }
            b"Definition" | b"ILIDefinition" | b"Example" => {
                let a = attributes(e, position)?;
                let target = match e.name().as_ref() {
                    b"Definition" => TextTarget::Definition,
                    b"ILIDefinition" => TextTarget::IliDefinition,
                    _ => TextTarget::Example {
                        source: a.get("dc:source").map(str::to_string),
                    },
                };
                self.synset_mut("Definition")?;
                self.text = Some((target, String::new()));
                if empty {
                    self.finish_text();
                }
            }
            b"SynsetRelation" => {
                let a = attributes(e, position)?;
                let rel_type: SynsetRelType = a.require("SynsetRelation", "relType")?.parse()?;
                let target = a.require("SynsetRelation", "target")?;
                self.synset_mut("SynsetRelation")?
                    .relations
                    .push(SynsetRelation::new(target, rel_type));
            }
            _ => {}
        }
        Ok(())
    }

    fn finish_text(&mut self) {
        let (Some((target, text)), Some(synset)) = (self.text.take(), self.synset.as_mut()) else {
            return;
        };
        match target {
            TextTarget::Definition => synset.definitions.push(Definition::new(text)),
            TextTarget::IliDefinition => synset.ili_definition = Some(Definition::new(text)),
            TextTarget::Example { source } => synset.examples.push(Example { text, source }),
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"Sense" => {
                if let (Some(sense), Some(entry)) = (self.sense.take(), self.entry.as_mut()) {
                    entry.senses.push(sense);
                }
            }
            b"LexicalEntry" => {
                if let (Some(entry), Some(lexicon)) = (self.entry.take(), self.lexicon.as_mut()) {
                    lexicon.add_entry(entry);
                }
            }
            b"Synset" => {
                if let (Some(synset), Some(lexicon)) = (self.synset.take(), self.lexicon.as_mut()) {
                    lexicon.add_synset(synset);
                }
            }
            b"Definition" | b"ILIDefinition" | b"Example" => self.finish_text(),
            b"Lexicon" => {
                if self.lexicon.is_some() {
                    self.done = true;
                }
            }
            _ => {}
        }
    }
}
