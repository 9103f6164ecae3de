use color_eyre::eyre::eyre;
use std::path::{Path, PathBuf};
use vocatch_config::{VocatchConfig, DEFAULT_BACKUP_SUFFIX};

pub fn run_swap(
    root: &Path,
    cfg: &VocatchConfig,
    data_dir: Option<PathBuf>,
    source_prefix: Option<String>,
    target_prefix: Option<String>,
    format: &str,
) -> color_eyre::Result<()> {
    tracing::debug!(event = "swap_args", root = ?root, data_dir = ?data_dir, source_prefix = ?source_prefix, target_prefix = ?target_prefix);

    let data_dir = super::data_dir(root, cfg, data_dir);
    let source_prefix = source_prefix.unwrap_or_else(|| cfg.source_prefix().to_string());
    let target_prefix = target_prefix.unwrap_or_else(|| cfg.target_prefix().to_string());
    let suffix = cfg
        .swap
        .as_ref()
        .and_then(|s| s.backup_suffix.clone())
        .unwrap_or_else(|| DEFAULT_BACKUP_SUFFIX.to_string());

    let summary = vocatch_services::swap_files(&data_dir, &source_prefix, &target_prefix, &suffix)?;

    if super::is_json(format) {
        super::print_json(&summary)?;
    } else {
        for f in &summary.files {
            match f.status.as_str() {
                "converted" => crate::ui_out!("converted {} -> {} ({} entries)", f.source, f.target, f.entries),
                "missing-target" => crate::ui_warn!("no {} for {}, skipped", f.target, f.source),
                _ => crate::ui_err!(
                    "{} -> {}: {}",
                    f.source,
                    f.target,
                    f.error.as_deref().unwrap_or("failed")
                ),
            }
        }
        crate::ui_ok!(
            "{} converted, {} skipped, {} failed",
            summary.converted,
            summary.skipped,
            summary.failed
        );
    }

    if summary.failed > 0 {
        return Err(eyre!("{} file pair(s) could not be converted", summary.failed));
    }
    Ok(())
}
