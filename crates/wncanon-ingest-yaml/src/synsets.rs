//! Lexicographer files: synsets of one lex name.
//!
//! ```yaml
//! 02121620-n:
//!   definition:
//!   - feline mammal usually having thick soft fur
//!   example:
//!   - text: the cat sat on the mat
//!     source: nursery rhyme
//!   hypernym: [02120997-n]
//!   ili: i46593
//!   members: [cat, true cat]
//!   partOfSpeech: n
//! ```

use crate::{as_mapping, scalar, scalar_list};
use anyhow::{anyhow, bail, Context, Result};
use serde_yaml::{Mapping, Value};
use wncanon_model::ids::synset_id;
use wncanon_model::{Definition, Example, PartOfSpeech, Synset, SynsetRelType, SynsetRelation};

const SYNSET_FIELDS: &[&str] = &[
    "members",
    "partOfSpeech",
    "definition",
    "example",
    "ili",
    "source",
];

/// A synset together with its ordered member lemmas.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSynset {
    pub synset: Synset,
    pub members: Vec<String>,
}

pub fn parse_synsets(value: &Value, lex_name: &str, prefix: &str) -> Result<Vec<ParsedSynset>> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    for (raw_id, props) in as_mapping(value, lex_name)? {
        let raw_id = scalar(raw_id)?;
        let props = as_mapping(props, &raw_id)?;
        let parsed = parse_synset(&raw_id, props, lex_name, prefix)
            .with_context(|| format!("synset `{raw_id}`"))?;
        out.push(parsed);
    }
    Ok(out)
}

fn required<'p>(props: &'p Mapping, field: &str) -> Result<&'p Value> {
    props
        .get(field)
        .ok_or_else(|| anyhow!("required field `{field}` is missing"))
}

fn parse_synset(raw_id: &str, props: &Mapping, lex_name: &str, prefix: &str) -> Result<ParsedSynset> {
    let members = scalar_list(required(props, "members")?, "members")?;
    let part_of_speech: PartOfSpeech = scalar(required(props, "partOfSpeech")?)?.parse()?;
    let definitions = scalar_list(required(props, "definition")?, "definition")?;
    if definitions.is_empty() {
        bail!("`definition` is empty");
    }

    let mut synset = Synset::new(synset_id(prefix, raw_id), part_of_speech, lex_name);
    synset.source = props.get("source").map(scalar).transpose()?;
    synset.definitions = definitions.into_iter().map(Definition::new).collect();
    // An explicit `ili: in` is taken as written; only an absent key proposes
    // the first definition.
    match props.get("ili") {
        Some(ili) => synset.ili = scalar(ili)?,
        None => synset.promote_ili_definition(),
    }

    if let Some(examples) = props.get("example") {
        let examples = examples
            .as_sequence()
            .ok_or_else(|| anyhow!("`example` must be a list"))?;
        for example in examples {
            synset.examples.push(parse_example(example)?);
        }
    }

    for (key, targets) in props {
        let key = scalar(key)?;
        if SYNSET_FIELDS.contains(&key.as_str()) {
            continue;
        }
        let Ok(rel_type) = key.parse::<SynsetRelType>() else {
            tracing::debug!(synset = %synset.id, property = %key, "ignoring unknown synset property");
            continue;
        };
        for target in scalar_list(targets, &key)? {
            synset
                .relations
                .push(SynsetRelation::new(synset_id(prefix, &target), rel_type));
        }
    }

    Ok(ParsedSynset { synset, members })
}

fn parse_example(value: &Value) -> Result<Example> {
    match value {
        Value::Mapping(m) => Ok(Example {
            text: scalar(required(m, "text")?)?,
            source: m.get("source").map(scalar).transpose()?,
        }),
        other => Ok(Example {
            text: scalar(other)?,
            source: None,
        }),
    }
}
