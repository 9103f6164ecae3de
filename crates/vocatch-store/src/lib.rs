//! Record store: discovery, loading and atomic saving of JSON record files.
//!
//! A record file is a JSON array of objects. Entries keep their field order
//! through a load/save cycle so untouched fields are written back as they were.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use serde_json::Value;
use vocatch_core::{CorpusError, Entry, RecordFile, Result};
use walkdir::WalkDir;

/// Record files directly inside `dir` whose name starts with `prefix` and ends
/// in `.json`, sorted by name. The sort order anchors the whole pipeline.
pub fn list_files(dir: &Path, prefix: &str) -> Result<Vec<RecordFile>> {
    if !dir.is_dir() {
        return Err(CorpusError::MissingInput(dir.to_path_buf()).into());
    }
    let mut out: Vec<RecordFile> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let name = err
                    .path()
                    .and_then(Path::file_name)
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                // A candidate record that cannot be read would shift alignment.
                if name.is_empty() || name.starts_with(prefix) {
                    return Err(err).wrap_err_with(|| format!("listing {}", dir.display()));
                }
                tracing::warn!(event = "store_walk_skipped", name = %name, error = %err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !name.starts_with(prefix) {
            continue;
        }
        let is_json = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            out.push(RecordFile::new(entry.path()));
        }
    }
    out.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(event = "store_listed", dir = %dir.display(), prefix = prefix, files = out.len());
    Ok(out)
}

/// Load the ordered entries of one record file.
pub fn load(file: &RecordFile) -> Result<Vec<Entry>> {
    load_path(&file.path)
}

pub fn load_path(path: &Path) -> Result<Vec<Entry>> {
    let raw = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CorpusError::MissingInput(path.to_path_buf()).into())
        }
        Err(e) => return Err(e.into()),
    };
    parse_entries(path, &raw)
}

/// Parse record file content; `path` is only used for error messages.
pub fn parse_entries(path: &Path, raw: &str) -> Result<Vec<Entry>> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| CorpusError::malformed(path, format!("invalid JSON: {e}")))?;
    let Value::Array(items) = value else {
        return Err(CorpusError::malformed(path, "top-level value is not an array").into());
    };
    let mut out = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(map) => out.push(map),
            other => {
                return Err(CorpusError::malformed(
                    path,
                    format!("entry {idx} is not an object but {}", kind_of(&other)),
                )
                .into())
            }
        }
    }
    Ok(out)
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Serialize entries the way the data files are kept: pretty JSON, two-space
/// indent, non-ASCII text unescaped.
pub fn render_entries(entries: &[Entry]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(entries)?)
}

/// Overwrite a record file atomically.
pub fn save(file: &RecordFile, entries: &[Entry]) -> Result<()> {
    let bytes = render_entries(entries)?;
    write_atomic(&file.path, &bytes)
}

/// Write to a sibling temp file, then rename over `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = temp_sibling(path);
    fs::write(&tmp, bytes)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "record".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

/// `KO_a.json` + `.json.backup` -> `KO_a.json.backup`
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    path.with_extension(suffix.trim_start_matches('.'))
}

/// Backup-then-write scope: copy `path` aside, run `write`, and put the copy
/// back if `write` fails. Returns the backup location when one was made.
pub fn with_backup<F>(path: &Path, suffix: &str, write: F) -> Result<Option<PathBuf>>
where
    F: FnOnce() -> Result<()>,
{
    let backup = if path.exists() {
        let bak = backup_path(path, suffix);
        fs::copy(path, &bak)?;
        tracing::debug!(event = "backup_created", from = %path.display(), to = %bak.display());
        Some(bak)
    } else {
        None
    };

    if let Err(err) = write() {
        if let Some(bak) = backup.as_ref() {
            match fs::copy(bak, path) {
                Ok(_) => {
                    tracing::warn!(event = "backup_restored", path = %path.display(), error = %err)
                }
                Err(e) => {
                    tracing::error!(event = "backup_restore_failed", path = %path.display(), error = %e)
                }
            }
        }
        return Err(err);
    }
    Ok(backup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::eyre;
    use serde_json::json;

    fn entry(word: &str, example: &str) -> Entry {
        json!({"word": word, "meaning_ko": "뜻", "pos": "noun", "example": example})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn list_files_filters_by_prefix_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["KO_b.json", "KO_a.json", "EN_a.json", "KO_notes.txt"] {
            fs::write(dir.path().join(name), "[]").unwrap();
        }
        fs::create_dir(dir.path().join("KO_dir.json")).unwrap();

        let files = list_files(dir.path(), "KO_").unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["KO_a.json", "KO_b.json"]);
    }

    #[cfg(unix)]
    #[test]
    fn list_files_follows_links_and_reports_broken_records() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        fs::write(elsewhere.path().join("a.json"), "[]").unwrap();
        fs::write(dir.path().join("KO_b.json"), "[]").unwrap();
        symlink(elsewhere.path().join("a.json"), dir.path().join("KO_a.json")).unwrap();
        symlink(dir.path().join("gone"), dir.path().join("notes.txt")).unwrap();

        let names: Vec<_> = list_files(dir.path(), "KO_")
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, ["KO_a.json", "KO_b.json"]);

        symlink(dir.path().join("gone"), dir.path().join("KO_c.json")).unwrap();
        let err = list_files(dir.path(), "KO_").unwrap_err();
        assert!(format!("{err:#}").contains("listing"), "{err:#}");
    }

    #[test]
    fn list_files_reports_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_files(&dir.path().join("nope"), "KO_").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CorpusError>(),
            Some(CorpusError::MissingInput(_))
        ));
    }

    #[test]
    fn load_rejects_non_array_and_non_object_entries() {
        let dir = tempfile::tempdir().unwrap();
        let obj = dir.path().join("KO_obj.json");
        fs::write(&obj, r#"{"word": "x"}"#).unwrap();
        let err = load_path(&obj).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CorpusError>(),
            Some(CorpusError::MalformedRecord { .. })
        ));

        let mixed = dir.path().join("KO_mixed.json");
        fs::write(&mixed, r#"[{"word": "x"}, 3]"#).unwrap();
        let err = load_path(&mixed).unwrap_err();
        assert!(err.to_string().contains("entry 1"), "{err}");

        let broken = dir.path().join("KO_broken.json");
        fs::write(&broken, "[{").unwrap();
        assert!(load_path(&broken).is_err());
    }

    #[test]
    fn save_keeps_field_order_and_unescaped_text() {
        let dir = tempfile::tempdir().unwrap();
        let file = RecordFile::in_dir(dir.path(), "KO_a.json");
        let entries = vec![entry("안녕", "안녕하세요, 반가워요.")];
        save(&file, &entries).unwrap();

        let raw = fs::read_to_string(&file.path).unwrap();
        assert!(raw.contains("안녕하세요, 반가워요."));
        let word_at = raw.find("\"word\"").unwrap();
        let example_at = raw.find("\"example\"").unwrap();
        assert!(word_at < example_at);
        assert!(raw.starts_with("[\n  {\n    \"word\": \"안녕\""), "{raw}");

        let back = load(&file).unwrap();
        assert_eq!(back, entries);
        assert!(!dir.path().join(".KO_a.json.tmp").exists());
    }

    #[test]
    fn with_backup_restores_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("KO_a.json");
        fs::write(&path, "[]").unwrap();

        let res = with_backup(&path, ".json.backup", || {
            fs::write(&path, "garbage")?;
            Err(eyre!("boom"))
        });
        assert!(res.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert!(dir.path().join("KO_a.json.backup").exists());

        let bak = with_backup(&path, ".json.backup", || Ok(())).unwrap();
        assert_eq!(bak, Some(dir.path().join("KO_a.json.backup")));
    }
}
