use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Width of the `=` rule lines framing sections of the flat artifact.
pub const RULE_WIDTH: usize = 80;

/// One word entry: an ordered mapping of named fields.
/// Field order is preserved on load/save (serde_json `preserve_order`).
pub type Entry = serde_json::Map<String, serde_json::Value>;

/// A record file inside the data directory, e.g. `KO_기초다지기_일상회화.json`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordFile {
    /// File name including extension; the identity of the file within the store.
    pub name: String,
    pub path: PathBuf,
}

impl RecordFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, path }
    }

    /// Record file called `name` inside `dir`.
    pub fn in_dir(dir: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: dir.join(name),
        }
    }

    pub fn stem(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.name)
    }

    /// Category label: the stem without the dataset prefix (`기초다지기_일상회화`).
    pub fn label(&self, prefix: &str) -> String {
        let stem = self.stem();
        stem.strip_prefix(prefix).unwrap_or(stem).to_string()
    }
}

/// One manifest record: which file contributed how many example texts.
/// Manifest order is the alignment contract between extraction and reinsertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub file_name: String,
    pub label: String,
    pub count: usize,
}

/// Stable identity of an entry: file name plus 0-based index inside the file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryKey {
    pub file_name: String,
    pub index: usize,
}

impl EntryKey {
    pub fn new(file_name: impl Into<String>, index: usize) -> Self {
        Self {
            file_name: file_name.into(),
            index,
        }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.file_name, self.index)
    }
}

/// One line of the flat corpus. `key` is only present for keyed artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatItem {
    pub key: Option<EntryKey>,
    pub text: String,
}

impl FlatItem {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            key: None,
            text: text.into(),
        }
    }

    pub fn keyed(key: EntryKey, text: impl Into<String>) -> Self {
        Self {
            key: Some(key),
            text: text.into(),
        }
    }
}

/// Result of one extraction run: the manifest plus the flat corpus it partitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub manifest: Vec<ManifestEntry>,
    pub items: Vec<FlatItem>,
}

impl Extraction {
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Manifest records paired with their slice of the flat corpus.
    /// Slices are clamped if the manifest declares more items than exist.
    pub fn sections(&self) -> Vec<(&ManifestEntry, &[FlatItem])> {
        let mut out = Vec::with_capacity(self.manifest.len());
        let mut offset = 0usize;
        for m in &self.manifest {
            let start = offset.min(self.items.len());
            let end = (offset + m.count).min(self.items.len());
            out.push((m, &self.items[start..end]));
            offset += m.count;
        }
        out
    }
}

/// Error taxonomy of the corpus pipeline.
///
/// A replacement shortfall is not an error; it is reported alongside the
/// reinsertion summary.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("required input not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("malformed record file {}: {reason}", path.display())]
    MalformedRecord { path: PathBuf, reason: String },

    #[error("malformed manifest at line {line}: {reason}")]
    MalformedManifest { line: usize, reason: String },

    #[error("alignment drift for {file}: {details}")]
    AlignmentDrift { file: String, details: String },
}

impl CorpusError {
    pub fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        CorpusError::MalformedRecord {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn drift(file: impl Into<String>, details: impl Into<String>) -> Self {
        CorpusError::AlignmentDrift {
            file: file.into(),
            details: details.into(),
        }
    }
}

/// Text of the example field if it contributes to extraction:
/// present, a string, and non-empty after trimming.
pub fn contributing_text<'a>(entry: &'a Entry, field: &str) -> Option<&'a str> {
    entry
        .get(field)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
