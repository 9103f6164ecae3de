use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ManifestRecord {
    pub file: String,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractSummary {
    pub schema_version: u32,
    pub output: String,
    pub files: usize,
    pub examples: usize,
    /// Entries whose example was missing or blank.
    pub skipped_empty: usize,
    pub keyed: bool,
    pub manifest: Vec<ManifestRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileReinsertStat {
    pub file: String,
    pub required: usize,
    pub assigned: usize,
    /// `updated` | `shortfall` | `untouched`
    pub status: String,
}

/// Fewer replacement texts than manifest positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Shortfall {
    /// First file that could not be fully assigned.
    pub file: String,
    pub required: usize,
    pub supplied: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReinsertSummary {
    pub schema_version: u32,
    /// `positional` | `keyed`
    pub mode: String,
    pub dry_run: bool,
    pub supplied: usize,
    pub required: usize,
    pub assigned: usize,
    /// Replacement texts left over after every position was filled.
    pub surplus: usize,
    pub shortfall: Option<Shortfall>,
    pub files: Vec<FileReinsertStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwapFileStat {
    pub source: String,
    pub target: String,
    pub entries: usize,
    /// `converted` | `missing-target` | `failed`
    pub status: String,
    pub backup: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwapSummary {
    pub schema_version: u32,
    pub converted: usize,
    pub failed: usize,
    pub skipped: usize,
    pub files: Vec<SwapFileStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SeedFileStat {
    pub path: String,
    pub words: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SeedSummary {
    pub schema_version: u32,
    pub files: Vec<SeedFileStat>,
    /// `category/level` pairs without words.
    pub skipped: Vec<String>,
}

/// Result of a whole-file text rewrite (`renumber`, `clean-cite`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TextRewriteSummary {
    pub schema_version: u32,
    pub input: String,
    pub output: String,
    pub lines: usize,
}
