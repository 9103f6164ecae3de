//! Orchestration layer over the store and flat-text crates.
//! Exposes one entrypoint per pipeline stage for the CLI.

pub mod extract;
pub mod reinsert;
pub mod seed;
pub mod swap;
pub mod text;

pub use extract::{extract, extract_to_file};
pub use reinsert::{reinsert, reinsert_from_artifacts, ReinsertOptions};
pub use seed::{seed_files, SeedTable};
pub use swap::{swap_files, swap_record};
pub use text::{clean_citations_file, renumber_file};
pub use vocatch_core::{CorpusError, Extraction, Result};
pub use vocatch_flat::RenderOptions;

use std::io::ErrorKind;
use std::path::Path;

/// Read a UTF-8 input file, mapping "not found" to [`CorpusError::MissingInput`].
pub(crate) fn read_input(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(s),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(CorpusError::MissingInput(path.to_path_buf()).into())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    /// Record file with one entry per example, word fields `w0`, `w1`, ...
    pub fn write_examples(dir: &Path, name: &str, examples: &[&str]) {
        let entries: Vec<serde_json::Value> = examples
            .iter()
            .enumerate()
            .map(|(i, ex)| {
                serde_json::json!({
                    "word": format!("w{i}"),
                    "meaning_en": "meaning",
                    "pos": "noun",
                    "example": ex,
                    "level": "기초다지기",
                    "category": "여행"
                })
            })
            .collect();
        let raw = serde_json::to_string_pretty(&entries).unwrap();
        write_raw(dir, name, &raw);
    }

    pub fn write_raw(dir: &Path, name: &str, raw: &str) {
        std::fs::write(dir.join(name), raw).unwrap();
    }

    pub fn examples_of(dir: &Path, name: &str) -> Vec<String> {
        vocatch_store::load_path(&dir.join(name))
            .unwrap()
            .iter()
            .map(|e| e.get("example").and_then(|v| v.as_str()).unwrap_or("").to_string())
            .collect()
    }
}
