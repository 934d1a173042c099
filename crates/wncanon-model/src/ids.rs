//! Id templates and lemma escaping.
//!
//! Ids have to be valid XML ids, so lemmas are escaped before they become part
//! of an entry or sense id:
//!
//! ```text
//! entry:             <prefix>-<lemma>-<pos>
//! provisional sense: <prefix>-<lemma>-<adjposition->pos>-<synset minus 2 chars>
//! final sense:       <provisional sense>-<NN>
//! synset:            <prefix>-<raw synset id>
//! ```

use crate::{AdjPosition, PartOfSpeech};
use std::fmt::Write;

/// Escape a lemma so it can be embedded in an XML id.
pub fn escape_lemma(lemma: &str) -> String {
    let mut out = String::with_capacity(lemma.len());
    for c in lemma.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '.' | '-' | '_' => out.push(c),
            ' ' => out.push('_'),
            '(' => out.push_str("-lb-"),
            ')' => out.push_str("-rb-"),
            '\'' => out.push_str("-ap-"),
            '/' => out.push_str("-sl-"),
            ':' => out.push_str("-cl-"),
            ',' => out.push_str("-cm-"),
            '!' => out.push_str("-ex-"),
            '+' => out.push_str("-pl-"),
            other => {
                let _ = write!(out, "-{:04x}-", other as u32);
            }
        }
    }
    out
}

pub fn synset_id(prefix: &str, raw: &str) -> String {
    format!("{prefix}-{raw}")
}

pub fn entry_id(prefix: &str, lemma: &str, pos: PartOfSpeech) -> String {
    format!("{prefix}-{}-{pos}", escape_lemma(lemma))
}

/// Sense id before the member ordinal is known.
///
/// `raw_synset` is the unprefixed synset id (e.g. `02121620-n`); its trailing
/// part-of-speech suffix is dropped.
pub fn provisional_sense_id(
    prefix: &str,
    lemma: &str,
    pos: PartOfSpeech,
    adjposition: Option<AdjPosition>,
    raw_synset: &str,
) -> String {
    let cut = raw_synset.len().saturating_sub(2);
    let synset_part = raw_synset.get(..cut).unwrap_or(raw_synset);
    match adjposition {
        Some(adj) => format!("{prefix}-{}-{adj}-{pos}-{synset_part}", escape_lemma(lemma)),
        None => format!("{prefix}-{}-{pos}-{synset_part}", escape_lemma(lemma)),
    }
}

pub fn final_sense_id(provisional: &str, ordinal: usize) -> String {
    format!("{provisional}-{ordinal:02}")
}

/// Sense id without its two-digit ordinal, used to match senses across
/// numbering schemes.
pub fn sense_id_stem(id: &str) -> &str {
    let cut = id.len().saturating_sub(2);
    id.get(..cut).unwrap_or(id)
}
