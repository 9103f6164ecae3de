use std::path::Path;

use thiserror::Error;
use vocatch_core::{CorpusError, Entry, RecordFile, Result};
use vocatch_domain::{SwapFileStat, SwapSummary, SCHEMA_VERSION};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("entry has no `{0}` field")]
pub struct MissingField(pub &'static str);

/// Target-side entry built from a source-side one: the Korean meaning becomes
/// the headword and the English headword moves to `meaning_en`.
pub fn swap_record(source: &Entry) -> std::result::Result<Entry, MissingField> {
    let take = |name: &'static str| source.get(name).cloned().ok_or(MissingField(name));

    let mut out = Entry::new();
    out.insert("word".into(), take("meaning_ko")?);
    out.insert("meaning_en".into(), take("word")?);
    for name in ["pos", "example", "level", "category"] {
        out.insert(name.into(), take(name)?);
    }
    Ok(out)
}

/// Rebuild every target file from its source counterpart.
///
/// Targets are overwritten inside a backup scope; a file that fails is
/// recorded in the summary and the remaining pairs are still processed.
pub fn swap_files(
    dir: &Path,
    source_prefix: &str,
    target_prefix: &str,
    backup_suffix: &str,
) -> Result<SwapSummary> {
    let sources = vocatch_store::list_files(dir, source_prefix)?;
    tracing::info!(event = "swap_start", dir = %dir.display(), sources = sources.len());

    let mut summary = SwapSummary {
        schema_version: SCHEMA_VERSION,
        converted: 0,
        failed: 0,
        skipped: 0,
        files: Vec::new(),
    };

    for source in sources {
        let target_name = format!("{target_prefix}{}", &source.name[source_prefix.len()..]);
        let target = RecordFile::in_dir(dir, &target_name);
        let mut stat = SwapFileStat {
            source: source.name.clone(),
            target: target_name.clone(),
            entries: 0,
            status: String::new(),
            backup: None,
            error: None,
        };

        if !target.path.is_file() {
            tracing::warn!(event = "swap_target_missing", source = %source.name, target = %target_name);
            stat.status = "missing-target".into();
            summary.skipped += 1;
            summary.files.push(stat);
            continue;
        }

        match swap_pair(&source, &target, backup_suffix) {
            Ok((entries, backup)) => {
                tracing::info!(event = "swap_converted", target = %target_name, entries = entries);
                stat.entries = entries;
                stat.backup = backup.map(|p| p.display().to_string());
                stat.status = "converted".into();
                summary.converted += 1;
            }
            Err(err) => {
                tracing::error!(event = "swap_failed", target = %target_name, error = %err);
                stat.status = "failed".into();
                stat.error = Some(err.to_string());
                summary.failed += 1;
            }
        }
        summary.files.push(stat);
    }
    Ok(summary)
}

fn swap_pair(
    source: &RecordFile,
    target: &RecordFile,
    backup_suffix: &str,
) -> Result<(usize, Option<std::path::PathBuf>)> {
    // The current target must at least parse before it is replaced.
    vocatch_store::load(target)?;
    let converted = vocatch_store::load(source)?
        .iter()
        .enumerate()
        .map(|(idx, e)| {
            swap_record(e).map_err(|m| CorpusError::malformed(&source.path, format!("entry {idx}: {m}")))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let backup = vocatch_store::with_backup(&target.path, backup_suffix, || {
        vocatch_store::save(target, &converted)
    })?;
    Ok((converted.len(), backup))
}
