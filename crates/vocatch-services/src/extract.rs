use std::path::Path;

use vocatch_core::{contributing_text, Entry, EntryKey, Extraction, FlatItem, ManifestEntry, RecordFile, Result};
use vocatch_domain::{ExtractSummary, ManifestRecord, SCHEMA_VERSION};
use vocatch_flat::RenderOptions;

/// Walk the record files matching `prefix` in name order and pull the
/// trimmed `field` text of every entry. Blank or missing examples are left
/// out of the corpus and the per-file count.
pub fn extract(dir: &Path, prefix: &str, field: &str) -> Result<Extraction> {
    Ok(collect(dir, prefix, field)?.0)
}

/// Extract and write the rendered artifact to `out`.
pub fn extract_to_file(
    dir: &Path,
    prefix: &str,
    field: &str,
    out: &Path,
    opts: &RenderOptions,
) -> Result<ExtractSummary> {
    let (extraction, skipped_empty) = collect(dir, prefix, field)?;
    let text = vocatch_flat::render_with(&extraction, opts);
    vocatch_store::write_atomic(out, text.as_bytes())?;
    tracing::info!(
        event = "extract_written",
        out = %out.display(),
        files = extraction.manifest.len(),
        examples = extraction.total()
    );

    Ok(ExtractSummary {
        schema_version: SCHEMA_VERSION,
        output: out.display().to_string(),
        files: extraction.manifest.len(),
        examples: extraction.total(),
        skipped_empty,
        keyed: opts.keyed,
        manifest: extraction
            .manifest
            .iter()
            .map(|m| ManifestRecord {
                file: m.file_name.clone(),
                label: m.label.clone(),
                count: m.count,
            })
            .collect(),
    })
}

fn collect(dir: &Path, prefix: &str, field: &str) -> Result<(Extraction, usize)> {
    let files = vocatch_store::list_files(dir, prefix)?;
    // Load everything first: a malformed file aborts before any output exists.
    let loaded: Vec<(RecordFile, Vec<Entry>)> = files
        .into_iter()
        .map(|f| vocatch_store::load(&f).map(|entries| (f, entries)))
        .collect::<Result<_>>()?;

    let mut extraction = Extraction::default();
    let mut skipped_empty = 0usize;
    for (file, entries) in &loaded {
        let before = extraction.items.len();
        for (index, entry) in entries.iter().enumerate() {
            match contributing_text(entry, field) {
                Some(text) => extraction
                    .items
                    .push(FlatItem::keyed(EntryKey::new(&file.name, index), text)),
                None => {
                    skipped_empty += 1;
                    if entry.get(field).is_some_and(|v| !v.is_string()) {
                        tracing::warn!(event = "example_not_text", file = %file.name, index = index);
                    }
                }
            }
        }
        let count = extraction.items.len() - before;
        tracing::debug!(event = "extract_file", file = %file.name, entries = entries.len(), examples = count);
        extraction.manifest.push(ManifestEntry {
            file_name: file.name.clone(),
            label: file.label(prefix),
            count,
        });
    }
    Ok((extraction, skipped_empty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{write_examples, write_raw};

    fn texts(ex: &Extraction) -> Vec<&str> {
        ex.items.iter().map(|i| i.text.as_str()).collect()
    }

    #[test]
    fn two_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_examples(dir.path(), "KO_B.json", &["b1", "b2"]);
        write_examples(dir.path(), "KO_A.json", &["a1", "a2", "a3"]);
        write_examples(dir.path(), "EN_A.json", &["ignored"]);

        let ex = extract(dir.path(), "KO_", "example").unwrap();
        let manifest: Vec<_> = ex.manifest.iter().map(|m| (m.file_name.as_str(), m.count)).collect();
        assert_eq!(manifest, [("KO_A.json", 3), ("KO_B.json", 2)]);
        assert_eq!(texts(&ex), ["a1", "a2", "a3", "b1", "b2"]);
        assert_eq!(ex.manifest[0].label, "A");
        assert_eq!(ex.items[3].key, Some(EntryKey::new("KO_B.json", 0)));
    }

    #[test]
    fn blank_examples_are_skipped_but_keep_indices() {
        let dir = tempfile::tempdir().unwrap();
        write_raw(
            dir.path(),
            "KO_A.json",
            r#"[{"word": "a", "example": "  first  "},
                {"word": "b", "example": "   "},
                {"word": "c"},
                {"word": "d", "example": "fourth"}]"#,
        );
        write_raw(dir.path(), "KO_Z.json", "[]");

        let ex = extract(dir.path(), "KO_", "example").unwrap();
        assert_eq!(texts(&ex), ["first", "fourth"]);
        assert_eq!(ex.items[1].key, Some(EntryKey::new("KO_A.json", 3)));
        assert_eq!(ex.manifest[1].count, 0);
    }

    #[test]
    fn malformed_file_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        write_examples(dir.path(), "KO_A.json", &["a1"]);
        write_raw(dir.path(), "KO_B.json", r#"{"not": "a list"}"#);
        let out = dir.path().join("flat.txt");

        let err = extract_to_file(dir.path(), "KO_", "example", &out, &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<vocatch_core::CorpusError>(),
            Some(vocatch_core::CorpusError::MalformedRecord { .. })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn writes_rendered_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write_examples(dir.path(), "KO_A.json", &["a1", ""]);
        let out = dir.path().join("flat.txt");

        let summary =
            extract_to_file(dir.path(), "KO_", "example", &out, &RenderOptions::default()).unwrap();
        assert_eq!(summary.examples, 1);
        assert_eq!(summary.skipped_empty, 1);
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.contains("File: KO_A.json\nCategory: A\nExamples: 1\n"));
        assert!(text.contains("  1. a1\n"));
    }
}
