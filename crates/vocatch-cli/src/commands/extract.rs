use chrono::SecondsFormat;
use std::path::{Path, PathBuf};
use vocatch_config::{resolve_path, VocatchConfig, DEFAULT_EXAMPLES_FILE};
use vocatch_flat::{RenderOptions, DEFAULT_TITLE};

pub fn run_extract(
    root: &Path,
    cfg: &VocatchConfig,
    data_dir: Option<PathBuf>,
    prefix: Option<String>,
    out: Option<PathBuf>,
    keyed: bool,
    format: &str,
) -> color_eyre::Result<()> {
    tracing::debug!(event = "extract_args", root = ?root, data_dir = ?data_dir, prefix = ?prefix, out = ?out, keyed = keyed);

    let data_dir = super::data_dir(root, cfg, data_dir);
    let prefix = prefix.unwrap_or_else(|| cfg.target_prefix().to_string());
    let section = cfg.extract.clone().unwrap_or_default();
    let out = resolve_path(root, out, section.out.as_deref(), DEFAULT_EXAMPLES_FILE);
    let opts = RenderOptions {
        title: section.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        keyed: keyed || section.keyed.unwrap_or(false),
        generated: Some(chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
    };

    let summary =
        vocatch_services::extract_to_file(&data_dir, &prefix, cfg.example_field(), &out, &opts)?;

    if super::is_json(format) {
        return super::print_json(&summary);
    }
    for m in &summary.manifest {
        crate::ui_out!("{:>5}  {}", m.count, m.file);
    }
    if summary.skipped_empty > 0 {
        crate::ui_info!("{} entries without an example were skipped", summary.skipped_empty);
    }
    crate::ui_ok!(
        "{} examples from {} files written to {}",
        summary.examples,
        summary.files,
        summary.output
    );
    Ok(())
}
