use std::path::{Path, PathBuf};
use vocatch_config::{resolve_path, VocatchConfig, DEFAULT_EXAMPLES_FILE, DEFAULT_TRANSLATIONS_FILE};
use vocatch_domain::TextRewriteSummary;

pub fn run_renumber(
    root: &Path,
    cfg: &VocatchConfig,
    input: Option<PathBuf>,
    out: Option<PathBuf>,
    format: &str,
) -> color_eyre::Result<()> {
    tracing::debug!(event = "renumber_args", root = ?root, input = ?input, out = ?out);
    let section = cfg.renumber.clone().unwrap_or_default();
    let input = resolve_path(root, input, section.input.as_deref(), DEFAULT_EXAMPLES_FILE);
    let out = match out.or(section.out.map(PathBuf::from)) {
        Some(p) => root.join(p),
        None => input.clone(),
    };
    let summary = vocatch_services::renumber_file(&input, &out)?;
    report(&summary, "lines renumbered", format)
}

pub fn run_clean_cite(
    root: &Path,
    cfg: &VocatchConfig,
    input: Option<PathBuf>,
    out: Option<PathBuf>,
    format: &str,
) -> color_eyre::Result<()> {
    tracing::debug!(event = "clean_cite_args", root = ?root, input = ?input, out = ?out);
    let section = cfg.clean.clone().unwrap_or_default();
    let input = resolve_path(root, input, section.input.as_deref(), DEFAULT_TRANSLATIONS_FILE);
    let out = match out.or(section.out.map(PathBuf::from)) {
        Some(p) => root.join(p),
        None => input.clone(),
    };
    let summary = vocatch_services::clean_citations_file(&input, &out)?;
    report(&summary, "lines kept", format)
}

fn report(summary: &TextRewriteSummary, what: &str, format: &str) -> color_eyre::Result<()> {
    if super::is_json(format) {
        return super::print_json(summary);
    }
    crate::ui_ok!("{} {what}, saved to {}", summary.lines, summary.output);
    Ok(())
}
