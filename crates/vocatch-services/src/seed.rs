//! Seed the record store from a bundled word list.

use std::collections::HashMap;
use std::path::Path;

use color_eyre::eyre::WrapErr;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use serde_json::Value;
use vocatch_core::{CorpusError, Entry, RecordFile, Result};
use vocatch_domain::{SeedFileStat, SeedSummary, SCHEMA_VERSION};

const BUILTIN_TABLE: &str = include_str!("../data/oxford_seed.toml");

/// Word lists and lookup tables for `seed`. Read-only once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedTable {
    #[serde(default = "default_pos")]
    pub default_pos: String,
    /// `{word}` is replaced by the headword.
    #[serde(default = "default_template")]
    pub example_template: String,
    #[serde(default)]
    pub level: Vec<Label>,
    #[serde(default)]
    pub category: Vec<Label>,
    /// category key -> level key -> words
    #[serde(default)]
    pub words: HashMap<String, HashMap<String, Vec<String>>>,
    #[serde(default)]
    pub translations: HashMap<String, String>,
    #[serde(default)]
    pub pos: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub key: String,
    pub label: String,
}

fn default_pos() -> String {
    "noun".to_string()
}

fn default_template() -> String {
    "This is an example with {word}.".to_string()
}

impl SeedTable {
    /// The table compiled into the binary, parsed on first use.
    pub fn builtin() -> Result<&'static SeedTable> {
        static TABLE: OnceCell<SeedTable> = OnceCell::new();
        TABLE.get_or_try_init(|| Self::from_toml_str(BUILTIN_TABLE).wrap_err("embedded seed table"))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = crate::read_input(path)?;
        Self::from_toml_str(&raw).wrap_err_with(|| format!("seed table {}", path.display()))
    }

    pub fn words_for(&self, category: &str, level: &str) -> &[String] {
        self.words
            .get(category)
            .and_then(|levels| levels.get(level))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn entry(&self, word: &str, level_label: &str, category_label: &str) -> Entry {
        let meaning = self.translations.get(word).map(String::as_str).unwrap_or(word);
        let pos = self.pos.get(word).unwrap_or(&self.default_pos);
        let mut entry = Entry::new();
        for (field, value) in [
            ("word", word.to_string()),
            ("meaning_ko", meaning.to_string()),
            ("pos", pos.clone()),
            ("example", self.example_template.replace("{word}", word)),
            ("level", level_label.to_string()),
            ("category", category_label.to_string()),
        ] {
            entry.insert(field.to_string(), Value::String(value));
        }
        entry
    }
}

/// Write one source and one target record file per category/level pair that
/// has words. Existing files are overwritten.
pub fn seed_files(
    dir: &Path,
    table: &SeedTable,
    source_prefix: &str,
    target_prefix: &str,
) -> Result<SeedSummary> {
    if !dir.is_dir() {
        return Err(CorpusError::MissingInput(dir.to_path_buf()).into());
    }
    let mut summary = SeedSummary {
        schema_version: SCHEMA_VERSION,
        files: Vec::new(),
        skipped: Vec::new(),
    };

    for category in &table.category {
        for level in &table.level {
            let words = table.words_for(&category.key, &level.key);
            if words.is_empty() {
                tracing::warn!(event = "seed_no_words", category = %category.key, level = %level.key);
                summary.skipped.push(format!("{}/{}", category.key, level.key));
                continue;
            }
            let entries: Vec<Entry> = words
                .iter()
                .map(|w| table.entry(w, &level.label, &category.label))
                .collect();
            for prefix in [source_prefix, target_prefix] {
                let name = format!("{prefix}{}_{}.json", level.label, category.label);
                let file = RecordFile::in_dir(dir, &name);
                vocatch_store::save(&file, &entries)?;
                tracing::info!(event = "seed_written", file = %name, words = entries.len());
                summary.files.push(SeedFileStat {
                    path: file.path.display().to_string(),
                    words: entries.len(),
                });
            }
        }
    }
    Ok(summary)
}
