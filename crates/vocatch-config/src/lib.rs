use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "vocatch.toml";
pub const DEFAULT_DATA_DIR: &str = "assets/data";
pub const DEFAULT_SOURCE_PREFIX: &str = "EN_";
pub const DEFAULT_TARGET_PREFIX: &str = "KO_";
pub const DEFAULT_EXAMPLE_FIELD: &str = "example";
pub const DEFAULT_EXAMPLES_FILE: &str = "all_ko_examples.txt";
pub const DEFAULT_TRANSLATIONS_FILE: &str = "translate_examples.csv";
pub const DEFAULT_BACKUP_SUFFIX: &str = ".json.backup";
pub const DEFAULT_SCHEMA_DIR: &str = "docs/schemas";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VocatchConfig {
    pub data_dir: Option<String>,
    pub source_prefix: Option<String>,
    pub target_prefix: Option<String>,
    pub example_field: Option<String>,
    pub extract: Option<ExtractCfg>,
    pub reinsert: Option<ReinsertCfg>,
    pub renumber: Option<RenumberCfg>,
    pub clean: Option<CleanCfg>,
    pub swap: Option<SwapCfg>,
    pub seed: Option<SeedCfg>,
    pub schema: Option<SchemaCfg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractCfg {
    pub out: Option<String>,
    pub keyed: Option<bool>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReinsertCfg {
    pub manifest: Option<String>,
    pub translations: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenumberCfg {
    pub input: Option<String>,
    pub out: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CleanCfg {
    pub input: Option<String>,
    pub out: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapCfg {
    pub backup_suffix: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedCfg {
    /// Replacement seed table (TOML); the embedded table is used when absent.
    pub table: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaCfg {
    pub out_dir: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Search order: `<root>/vocatch.toml`, then `<config_dir>/vocatch/vocatch.toml`.
/// Values found earlier win.
pub fn load_config(root: &Path) -> Result<VocatchConfig, ConfigError> {
    let mut sources = vec![root.join(CONFIG_FILE)];
    if let Some(base) = dirs::config_dir() {
        sources.push(base.join("vocatch").join(CONFIG_FILE));
    }
    load_config_from(&sources)
}

/// Merge the given files in priority order; missing files are skipped.
pub fn load_config_from(sources: &[PathBuf]) -> Result<VocatchConfig, ConfigError> {
    let mut merged = VocatchConfig::default();
    for path in sources {
        let s = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.clone(),
                    source,
                })
            }
        };
        let cfg = toml::from_str::<VocatchConfig>(&s).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        merged = merge(merged, cfg);
    }
    Ok(merged)
}

impl VocatchConfig {
    pub fn data_dir(&self, root: &Path) -> PathBuf {
        root.join(self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR))
    }

    pub fn source_prefix(&self) -> &str {
        self.source_prefix.as_deref().unwrap_or(DEFAULT_SOURCE_PREFIX)
    }

    pub fn target_prefix(&self) -> &str {
        self.target_prefix.as_deref().unwrap_or(DEFAULT_TARGET_PREFIX)
    }

    pub fn example_field(&self) -> &str {
        self.example_field.as_deref().unwrap_or(DEFAULT_EXAMPLE_FIELD)
    }
}

/// Flag, then config value, then built-in default; relative paths hang off `root`.
pub fn resolve_path(
    root: &Path,
    flag: Option<PathBuf>,
    configured: Option<&str>,
    default: &str,
) -> PathBuf {
    match flag {
        Some(p) => root.join(p),
        None => root.join(configured.unwrap_or(default)),
    }
}

fn merge(mut a: VocatchConfig, b: VocatchConfig) -> VocatchConfig {
    if a.data_dir.is_none() {
        a.data_dir = b.data_dir;
    }
    if a.source_prefix.is_none() {
        a.source_prefix = b.source_prefix;
    }
    if a.target_prefix.is_none() {
        a.target_prefix = b.target_prefix;
    }
    if a.example_field.is_none() {
        a.example_field = b.example_field;
    }
    a.extract = merge_opt(a.extract, b.extract, merge_extract);
    a.reinsert = merge_opt(a.reinsert, b.reinsert, merge_reinsert);
    a.renumber = merge_opt(a.renumber, b.renumber, merge_renumber);
    a.clean = merge_opt(a.clean, b.clean, merge_clean);
    a.swap = merge_opt(a.swap, b.swap, merge_swap);
    a.seed = merge_opt(a.seed, b.seed, merge_seed);
    a.schema = merge_opt(a.schema, b.schema, merge_schema);
    a
}

fn merge_opt<T: Default>(a: Option<T>, b: Option<T>, f: fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (None, Some(b)) => Some(b),
        (Some(a), None) => Some(a),
        (None, None) => None,
    }
}

fn merge_extract(mut a: ExtractCfg, b: ExtractCfg) -> ExtractCfg {
    if a.out.is_none() {
        a.out = b.out;
    }
    if a.keyed.is_none() {
        a.keyed = b.keyed;
    }
    if a.title.is_none() {
        a.title = b.title;
    }
    a
}
fn merge_reinsert(mut a: ReinsertCfg, b: ReinsertCfg) -> ReinsertCfg {
    if a.manifest.is_none() {
        a.manifest = b.manifest;
    }
    if a.translations.is_none() {
        a.translations = b.translations;
    }
    a
}
fn merge_renumber(mut a: RenumberCfg, b: RenumberCfg) -> RenumberCfg {
    if a.input.is_none() {
        a.input = b.input;
    }
    if a.out.is_none() {
        a.out = b.out;
    }
    a
}
fn merge_clean(mut a: CleanCfg, b: CleanCfg) -> CleanCfg {
    if a.input.is_none() {
        a.input = b.input;
    }
    if a.out.is_none() {
        a.out = b.out;
    }
    a
}
fn merge_swap(mut a: SwapCfg, b: SwapCfg) -> SwapCfg {
    if a.backup_suffix.is_none() {
        a.backup_suffix = b.backup_suffix;
    }
    a
}
fn merge_seed(mut a: SeedCfg, b: SeedCfg) -> SeedCfg {
    if a.table.is_none() {
        a.table = b.table;
    }
    a
}
fn merge_schema(mut a: SchemaCfg, b: SchemaCfg) -> SchemaCfg {
    if a.out_dir.is_none() {
        a.out_dir = b.out_dir;
    }
    a
}
