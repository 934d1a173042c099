//! `entries-*.yaml`: lexical entries.
//!
//! ```yaml
//! cat:
//!   n:
//!     sense:
//!     - id: 'cat%1:05:00::'
//!       synset: 02121620-n
//!       antonym: ['dog%1:05:00::']
//!       subcat: [via]
//! ```

use crate::{as_mapping, scalar, scalar_list, Frames};
use anyhow::{anyhow, Context, Result};
use serde_yaml::{Mapping, Value};
use wncanon_model::ids::{entry_id, provisional_sense_id};
use wncanon_model::{
    AdjPosition, Form, Lemma, PartOfSpeech, ProvisionalEntry, ProvisionalSense, SenseRef,
    SenseRelType, SenseRelation, SyntacticBehaviour,
};

const SENSE_FIELDS: &[&str] = &["id", "synset", "adjposition", "subcat"];

pub fn parse_entries(value: &Value, frames: &Frames, prefix: &str) -> Result<Vec<ProvisionalEntry>> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    let mut entries = Vec::new();
    for (lemma, by_pos) in as_mapping(value, "entries")? {
        let lemma = scalar(lemma)?;
        for (pos, props) in as_mapping(by_pos, &lemma)? {
            let pos = scalar(pos)?;
            let entry = parse_entry(&lemma, &pos, props, frames, prefix)
                .with_context(|| format!("entry `{lemma}` ({pos})"))?;
            entries.push(entry);
        }
    }
    Ok(entries)
}

fn parse_entry(
    lemma: &str,
    pos: &str,
    props: &Value,
    frames: &Frames,
    prefix: &str,
) -> Result<ProvisionalEntry> {
    let part_of_speech: PartOfSpeech = pos.parse()?;
    let props = as_mapping(props, "entry")?;

    let forms = match props.get("form") {
        Some(forms) => scalar_list(forms, "form")?
            .into_iter()
            .map(|written_form| Form { written_form })
            .collect(),
        None => Vec::new(),
    };

    let senses_yaml = props
        .get("sense")
        .and_then(Value::as_sequence)
        .ok_or_else(|| anyhow!("missing `sense` list"))?;

    let mut senses = Vec::with_capacity(senses_yaml.len());
    // (frame key, provisional ids), in order of first use
    let mut subcats: Vec<(String, Vec<String>)> = Vec::new();
    for (n, sense_yaml) in senses_yaml.iter().enumerate() {
        let sense_yaml = as_mapping(sense_yaml, "sense")?;
        let sense = parse_sense(sense_yaml, lemma, part_of_speech, n, prefix)?;

        if let Some(keys) = sense_yaml.get("subcat") {
            for key in scalar_list(keys, "subcat")? {
                match subcats.iter_mut().find(|(k, _)| *k == key) {
                    Some((_, ids)) if ids.contains(&sense.provisional_id) => {}
                    Some((_, ids)) => ids.push(sense.provisional_id.clone()),
                    None => subcats.push((key, vec![sense.provisional_id.clone()])),
                }
            }
        }
        senses.push(sense);
    }

    let syntactic_behaviours = subcats
        .into_iter()
        .map(|(key, senses)| {
            let frame = frames
                .get(&key)
                .ok_or_else(|| anyhow!("unknown subcategorization frame `{key}`"))?;
            Ok(SyntacticBehaviour {
                frame: frame.clone(),
                senses,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ProvisionalEntry {
        id: entry_id(prefix, lemma, part_of_speech),
        lemma: Lemma {
            written_form: lemma.to_string(),
            part_of_speech,
        },
        forms,
        senses,
        syntactic_behaviours,
    })
}

fn parse_sense(
    sense: &Mapping,
    lemma: &str,
    pos: PartOfSpeech,
    n: usize,
    prefix: &str,
) -> Result<ProvisionalSense> {
    let sense_key = sense
        .get("id")
        .map(scalar)
        .transpose()?
        .ok_or_else(|| anyhow!("sense {n} has no `id`"))?;
    let raw_synset = sense
        .get("synset")
        .map(scalar)
        .transpose()?
        .ok_or_else(|| anyhow!("sense `{sense_key}` has no `synset`"))?;
    let adjposition = sense
        .get("adjposition")
        .map(|v| scalar(v)?.parse::<AdjPosition>().map_err(anyhow::Error::from))
        .transpose()
        .with_context(|| format!("sense `{sense_key}`"))?;

    let id_prefix = format!("{prefix}-");
    let mut relations = Vec::new();
    for (key, targets) in sense {
        let key = scalar(key)?;
        if SENSE_FIELDS.contains(&key.as_str()) {
            continue;
        }
        let Ok(rel_type) = key.parse::<SenseRelType>() else {
            tracing::debug!(sense = %sense_key, property = %key, "ignoring unknown sense property");
            continue;
        };
        for target in scalar_list(targets, &key)? {
            // Targets are sense keys; already-resolved ids pass through.
            let target = if target.starts_with(&id_prefix) {
                SenseRef::Id(target)
            } else {
                SenseRef::Key(target)
            };
            relations.push(SenseRelation { target, rel_type });
        }
    }

    Ok(ProvisionalSense {
        provisional_id: provisional_sense_id(prefix, lemma, pos, adjposition, &raw_synset),
        sense_key,
        synset: format!("{prefix}-{raw_synset}"),
        n,
        adjposition,
        relations,
    })
}
