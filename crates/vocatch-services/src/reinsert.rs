//! Write an edited flat corpus back into the record files it came from.
//!
//! The manifest (file name + contributing count, in extraction order) is the
//! only join between the flat text and the records. Before anything is
//! assigned the manifest is checked against the files currently on disk and
//! against the entries that currently carry an example; any mismatch is
//! alignment drift and nothing gets written.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use vocatch_core::{
    contributing_text, CorpusError, Entry, EntryKey, FlatItem, ManifestEntry, RecordFile, Result,
};
use vocatch_domain::{FileReinsertStat, ReinsertSummary, Shortfall, SCHEMA_VERSION};

#[derive(Debug, Clone)]
pub struct ReinsertOptions {
    /// Dataset prefix used for discovery, e.g. `KO_`.
    pub prefix: String,
    pub field: String,
    /// Plan only; no file is saved.
    pub dry_run: bool,
}

struct LoadedFile {
    file: RecordFile,
    entries: Vec<Entry>,
    /// Indices of entries that contribute an example, in stored order.
    slots: Vec<usize>,
    assigned: usize,
}

/// Read the manifest from the rendered extraction artifact and the
/// replacement texts from the (edited) translation artifact, then reinsert.
pub fn reinsert_from_artifacts(
    dir: &Path,
    manifest_path: &Path,
    translations_path: &Path,
    opts: &ReinsertOptions,
) -> Result<ReinsertSummary> {
    let manifest_text = crate::read_input(manifest_path)?;
    let translations_text = crate::read_input(translations_path)?;
    let manifest = vocatch_flat::parse_manifest(&manifest_text)?;
    let replacements = vocatch_flat::parse_lines(&translations_text);
    tracing::info!(
        event = "reinsert_inputs",
        manifest = %manifest_path.display(),
        files = manifest.len(),
        translations = %translations_path.display(),
        supplied = replacements.len()
    );
    reinsert(dir, &manifest, &replacements, opts)
}

/// Assign `replacements` to the manifest's entries and save every manifest file.
///
/// Matching is by key when every replacement carries one, otherwise by
/// position with a single cursor shared across files. When the supply runs
/// out the remaining entries keep their text and a [`Shortfall`] is reported;
/// later files are still saved, unchanged.
pub fn reinsert(
    dir: &Path,
    manifest: &[ManifestEntry],
    replacements: &[FlatItem],
    opts: &ReinsertOptions,
) -> Result<ReinsertSummary> {
    let files = check_discovery(dir, &opts.prefix, manifest)?;
    let mut loaded = load_aligned(files, manifest, &opts.field)?;

    let keyed = !replacements.is_empty() && replacements.iter().all(|r| r.key.is_some());
    if !keyed && replacements.iter().any(|r| r.key.is_some()) {
        tracing::warn!(
            event = "reinsert_keys_incomplete",
            "some lines lost their entry keys; matching by position"
        );
    }

    let required: usize = loaded.iter().map(|f| f.slots.len()).sum();
    let used = if keyed {
        assign_keyed(&mut loaded, replacements, &opts.field)?
    } else {
        assign_positional(&mut loaded, replacements, &opts.field)
    };
    let assigned: usize = loaded.iter().map(|f| f.assigned).sum();

    let shortfall = loaded
        .iter()
        .find(|f| f.assigned < f.slots.len())
        .map(|f| Shortfall {
            file: f.file.name.clone(),
            required,
            supplied: replacements.len(),
        });
    if let Some(s) = &shortfall {
        tracing::warn!(
            event = "replacement_shortfall",
            file = %s.file,
            required = s.required,
            supplied = s.supplied,
            "not enough replacement texts; remaining entries keep their previous example"
        );
    }
    let surplus = replacements.len().saturating_sub(used);
    if surplus > 0 {
        tracing::warn!(event = "replacement_surplus", surplus = surplus, "unused replacement texts");
    }

    if !opts.dry_run {
        // Saved unconditionally, also when nothing changed.
        for f in &loaded {
            vocatch_store::save(&f.file, &f.entries)?;
            tracing::info!(event = "reinsert_saved", file = %f.file.name, assigned = f.assigned, required = f.slots.len());
        }
    }

    Ok(ReinsertSummary {
        schema_version: SCHEMA_VERSION,
        mode: if keyed { "keyed" } else { "positional" }.to_string(),
        dry_run: opts.dry_run,
        supplied: replacements.len(),
        required,
        assigned,
        surplus,
        shortfall,
        files: loaded.iter().map(file_stat).collect(),
    })
}

/// The manifest must name exactly the files discovery finds now, in the same order.
fn check_discovery(dir: &Path, prefix: &str, manifest: &[ManifestEntry]) -> Result<Vec<RecordFile>> {
    let on_disk = vocatch_store::list_files(dir, prefix)?;
    for (pos, m) in manifest.iter().enumerate() {
        match on_disk.get(pos) {
            Some(f) if f.name == m.file_name => {}
            Some(f) if on_disk.iter().any(|d| d.name == m.file_name) => {
                return Err(CorpusError::drift(
                    &m.file_name,
                    format!("manifest position {} holds {} on disk", pos + 1, f.name),
                )
                .into());
            }
            _ => {
                return Err(CorpusError::drift(
                    &m.file_name,
                    format!("listed in the manifest but not found in {}", dir.display()),
                )
                .into());
            }
        }
    }
    if let Some(extra) = on_disk.get(manifest.len()) {
        return Err(CorpusError::drift(&extra.name, "present on disk but not in the manifest").into());
    }
    Ok(on_disk)
}

fn load_aligned(files: Vec<RecordFile>, manifest: &[ManifestEntry], field: &str) -> Result<Vec<LoadedFile>> {
    let mut out = Vec::with_capacity(files.len());
    for (file, m) in files.into_iter().zip(manifest) {
        let entries = vocatch_store::load(&file)?;
        let slots: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| contributing_text(e, field).is_some())
            .map(|(i, _)| i)
            .collect();
        if slots.len() != m.count {
            return Err(CorpusError::drift(
                &file.name,
                format!(
                    "manifest declares {} examples but the file now has {}",
                    m.count,
                    slots.len()
                ),
            )
            .into());
        }
        out.push(LoadedFile {
            file,
            entries,
            slots,
            assigned: 0,
        });
    }
    Ok(out)
}

/// Returns how many replacements were consumed.
fn assign_positional(loaded: &mut [LoadedFile], replacements: &[FlatItem], field: &str) -> usize {
    let mut cursor = 0usize;
    for f in loaded.iter_mut() {
        for &idx in &f.slots {
            let Some(item) = replacements.get(cursor) else {
                break;
            };
            set_field(&mut f.entries[idx], field, &item.text);
            cursor += 1;
            f.assigned += 1;
        }
    }
    cursor
}

fn assign_keyed(loaded: &mut [LoadedFile], replacements: &[FlatItem], field: &str) -> Result<usize> {
    let positions: HashMap<&str, usize> = loaded
        .iter()
        .enumerate()
        .map(|(i, f)| (f.file.name.as_str(), i))
        .collect();

    let mut by_key: HashMap<EntryKey, &str> = HashMap::new();
    for item in replacements {
        let Some(key) = item.key.as_ref() else {
            continue;
        };
        let Some(&pos) = positions.get(key.file_name.as_str()) else {
            return Err(CorpusError::drift(&key.file_name, format!("key {key} names a file outside the manifest")).into());
        };
        if !loaded[pos].slots.contains(&key.index) {
            return Err(CorpusError::drift(&key.file_name, format!("key {key} does not name an entry with an example")).into());
        }
        if by_key.insert(key.clone(), item.text.as_str()).is_some() {
            return Err(CorpusError::drift(&key.file_name, format!("key {key} appears more than once")).into());
        }
    }

    for f in loaded.iter_mut() {
        for &idx in &f.slots {
            let key = EntryKey::new(&f.file.name, idx);
            if let Some(text) = by_key.get(&key) {
                set_field(&mut f.entries[idx], field, text);
                f.assigned += 1;
            }
        }
    }
    Ok(by_key.len())
}

/// An unchanged text leaves the stored value alone, surrounding whitespace included.
fn set_field(entry: &mut Entry, field: &str, text: &str) {
    if contributing_text(entry, field) == Some(text) {
        return;
    }
    entry.insert(field.to_string(), Value::String(text.to_string()));
}

fn file_stat(f: &LoadedFile) -> FileReinsertStat {
    let required = f.slots.len();
    let status = if f.assigned >= required {
        "updated"
    } else if f.assigned == 0 {
        "untouched"
    } else {
        "shortfall"
    };
    FileReinsertStat {
        file: f.file.name.clone(),
        required,
        assigned: f.assigned,
        status: status.to_string(),
    }
}
