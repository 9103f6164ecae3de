pub mod extract;
pub mod reinsert;
pub mod schema;
pub mod seed;
pub mod swap;
pub mod text;

use std::path::{Path, PathBuf};
use vocatch_config::VocatchConfig;

/// `--data-dir` relative to the root, else the configured/default data dir.
pub(crate) fn data_dir(root: &Path, cfg: &VocatchConfig, flag: Option<PathBuf>) -> PathBuf {
    match flag {
        Some(p) => root.join(p),
        None => cfg.data_dir(root),
    }
}

pub(crate) fn is_json(format: &str) -> bool {
    format == "json"
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> color_eyre::Result<()> {
    use std::io::Write;
    let mut out = std::io::stdout().lock();
    serde_json::to_writer(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
