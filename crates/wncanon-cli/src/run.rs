//! One batch conversion: YAML source → reconciled WN-LMF files.

use crate::config::CanonConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use wncanon_engine::{run_pipeline, PipelineOutput, PipelineReport};
use wncanon_ingest_yaml::load_source;
use wncanon_lmf::{to_lmf_string, LmfDirectory};

/// Load the source and the published release, then run the pipeline.
///
/// Nothing is written.
pub fn run_batch(config: &CanonConfig) -> Result<PipelineOutput> {
    let source = load_source(&config.source_dir, &config.load_options())
        .with_context(|| format!("loading YAML source from {}", config.source_dir.display()))?;
    let published = LmfDirectory::open(&config.xml_dir)?;
    tracing::info!(
        partitions = published.len(),
        dir = %published.dir().display(),
        "loaded published release"
    );

    let mut output = run_pipeline(source, &published, &published)?;
    if let Some(meta) = &config.partition_meta {
        for partition in output.partitions.values_mut() {
            partition.meta = meta.clone();
        }
    }
    Ok(output)
}

/// Write the unified file and one file per lex name. Every document is
/// rendered before the first file is touched.
pub fn write_outputs(output: &PipelineOutput, xml_dir: &Path, unified: &Path) -> Result<Vec<PathBuf>> {
    let unified_xml = to_lmf_string(&output.unified)?;
    if let Some(parent) = unified.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let mut written = LmfDirectory::write_partitions(xml_dir, &output.partitions)?;
    std::fs::write(unified, unified_xml).with_context(|| format!("writing {}", unified.display()))?;
    written.push(unified.to_path_buf());
    Ok(written)
}

pub fn print_summary(output: &PipelineOutput) {
    let PipelineReport {
        zero_based_synsets,
        closure,
        renamed_senses,
        partitions_without_snapshot,
        reconcile,
    } = &output.report;

    println!(
        "{} {} entries, {} synsets, {} lex names",
        "ok".green().bold(),
        output.unified.entries.len(),
        output.unified.synsets.len(),
        output.partitions.len()
    );
    println!(
        "  {} {} relation targets resolved, {} inverse relations added",
        "→".yellow(),
        closure.rewritten_targets,
        closure.added()
    );
    if *zero_based_synsets > 0 {
        println!(
            "  {} {} synsets keep zero-based member numbering",
            "→".yellow(),
            zero_based_synsets
        );
    }
    if *renamed_senses > 0 {
        println!(
            "  {} {} sense ids taken from the published release",
            "→".yellow(),
            renamed_senses
        );
    }
    for lex_name in partitions_without_snapshot {
        println!("  {} {} is new (no published file)", "info:".yellow().bold(), lex_name);
    }
    for (lex_name, report) in reconcile {
        if report.is_clean() {
            continue;
        }
        println!(
            "  {} {}: {} new entries, {} new senses, {} new synsets",
            "warn:".yellow().bold(),
            lex_name,
            report.missing_entries.len(),
            report.missing_senses.len(),
            report.missing_synsets.len()
        );
    }
}

pub fn write_report_json(output: &PipelineOutput, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&output.report)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
