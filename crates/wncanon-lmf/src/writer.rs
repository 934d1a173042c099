//! WN-LMF 1.0 serialization.
//!
//! Output is written element by element with two-space indentation so that
//! regenerated files diff cleanly against the published ones. Collections are
//! written in model order; the caller is responsible for having put them in
//! canonical order first.

use crate::error::LmfError;
use quick_xml::escape::escape;
use std::fmt::Write;
use wncanon_model::{LexicalEntry, Lexicon, Sense, Synset};

pub const DOCTYPE: &str =
    r#"<!DOCTYPE LexicalResource SYSTEM "http://globalwordnet.github.io/schemas/WN-LMF-1.0.dtd">"#;
pub const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

/// Serialize `lexicon` as a complete WN-LMF document.
pub fn to_lmf_string(lexicon: &Lexicon) -> Result<String, LmfError> {
    let mut out = String::new();
    write_lmf(lexicon, &mut out)?;
    Ok(out)
}

pub fn write_lmf<W: Write>(lexicon: &Lexicon, out: &mut W) -> Result<(), LmfError> {
    let meta = &lexicon.meta;
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(out, "{DOCTYPE}")?;
    writeln!(out, r#"<LexicalResource xmlns:dc="{DC_NAMESPACE}">"#)?;
    writeln!(out, r#"  <Lexicon id="{}""#, escape(&meta.id))?;
    writeln!(out, r#"           label="{}""#, escape(&meta.label))?;
    writeln!(out, r#"           language="{}""#, escape(&meta.language))?;
    writeln!(out, r#"           email="{}""#, escape(&meta.email))?;
    writeln!(out, r#"           license="{}""#, escape(&meta.license))?;
    writeln!(out, r#"           version="{}""#, escape(&meta.version))?;
    writeln!(out, r#"           url="{}">"#, escape(&meta.url))?;

    for entry in &lexicon.entries {
        write_entry(entry, out)?;
    }
    for synset in &lexicon.synsets {
        if let Some(comment) = lexicon.comments.get(&synset.id) {
            writeln!(out, "    <!-- {} -->", comment_text(comment))?;
        }
        write_synset(synset, out)?;
    }

    writeln!(out, "  </Lexicon>")?;
    writeln!(out, "</LexicalResource>")?;
    Ok(())
}

/// `--` may not appear inside an XML comment; runs of dashes are spaced out.
fn comment_text(comment: &str) -> String {
    let mut text = comment.to_string();
    while text.contains("--") {
        text = text.replace("--", "- -");
    }
    text
}

fn write_entry<W: Write>(entry: &LexicalEntry, out: &mut W) -> Result<(), LmfError> {
    writeln!(out, r#"    <LexicalEntry id="{}">"#, escape(&entry.id))?;
    writeln!(
        out,
        r#"      <Lemma writtenForm="{}" partOfSpeech="{}"/>"#,
        escape(&entry.lemma.written_form),
        entry.lemma.part_of_speech
    )?;
    for form in &entry.forms {
        writeln!(out, r#"      <Form writtenForm="{}"/>"#, escape(&form.written_form))?;
    }
    for sense in &entry.senses {
        write_sense(sense, out)?;
    }
    for behaviour in &entry.syntactic_behaviours {
        writeln!(
            out,
            r#"      <SyntacticBehaviour subcategorizationFrame="{}" senses="{}"/>"#,
            escape(&behaviour.frame),
            escape(&behaviour.senses.join(" "))
        )?;
    }
    writeln!(out, "    </LexicalEntry>")?;
    Ok(())
}

fn write_sense<W: Write>(sense: &Sense, out: &mut W) -> Result<(), LmfError> {
    write!(
        out,
        r#"      <Sense id="{}" n="{}" synset="{}""#,
        escape(&sense.id),
        sense.n,
        escape(&sense.synset)
    )?;
    if let Some(key) = &sense.sense_key {
        write!(out, r#" dc:identifier="{}""#, escape(key))?;
    }
    if let Some(adjposition) = sense.adjposition {
        write!(out, r#" adjposition="{adjposition}""#)?;
    }
    if sense.relations.is_empty() {
        writeln!(out, "/>")?;
        return Ok(());
    }
    writeln!(out, ">")?;
    for rel in &sense.relations {
        writeln!(
            out,
            r#"        <SenseRelation relType="{}" target="{}"/>"#,
            rel.rel_type,
            escape(rel.target.as_str())
        )?;
    }
    writeln!(out, "      </Sense>")?;
    Ok(())
}

fn write_synset<W: Write>(synset: &Synset, out: &mut W) -> Result<(), LmfError> {
    write!(
        out,
        r#"    <Synset id="{}" ili="{}" partOfSpeech="{}" dc:subject="{}""#,
        escape(&synset.id),
        escape(&synset.ili),
        synset.part_of_speech,
        escape(&synset.lex_name)
    )?;
    if let Some(source) = &synset.source {
        write!(out, r#" dc:source="{}""#, escape(source))?;
    }
    writeln!(out, ">")?;
    for definition in &synset.definitions {
        writeln!(out, "      <Definition>{}</Definition>", escape(&definition.text))?;
    }
    if let Some(ili_definition) = &synset.ili_definition {
        writeln!(
            out,
            "      <ILIDefinition>{}</ILIDefinition>",
            escape(&ili_definition.text)
        )?;
    }
    for example in &synset.examples {
        match &example.source {
            Some(source) => writeln!(
                out,
                r#"      <Example dc:source="{}">{}</Example>"#,
                escape(source),
                escape(&example.text)
            )?,
            None => writeln!(out, "      <Example>{}</Example>", escape(&example.text))?,
        }
    }
    for rel in &synset.relations {
        writeln!(
            out,
            r#"      <SynsetRelation relType="{}" target="{}"/>"#,
            rel.rel_type,
            escape(&rel.target)
        )?;
    }
    writeln!(out, "    </Synset>")?;
    Ok(())
}
