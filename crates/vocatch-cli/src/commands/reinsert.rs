use std::path::{Path, PathBuf};
use vocatch_config::{resolve_path, VocatchConfig, DEFAULT_EXAMPLES_FILE, DEFAULT_TRANSLATIONS_FILE};
use vocatch_services::ReinsertOptions;

#[allow(clippy::too_many_arguments)]
pub fn run_reinsert(
    root: &Path,
    cfg: &VocatchConfig,
    data_dir: Option<PathBuf>,
    prefix: Option<String>,
    manifest: Option<PathBuf>,
    translations: Option<PathBuf>,
    dry_run: bool,
    format: &str,
) -> color_eyre::Result<()> {
    tracing::debug!(event = "reinsert_args", root = ?root, data_dir = ?data_dir, manifest = ?manifest, translations = ?translations, dry_run = dry_run);

    let data_dir = super::data_dir(root, cfg, data_dir);
    let section = cfg.reinsert.clone().unwrap_or_default();
    // The manifest is the extraction artifact unless configured otherwise.
    let extracted = cfg.extract.as_ref().and_then(|e| e.out.as_deref());
    let manifest = resolve_path(
        root,
        manifest,
        section.manifest.as_deref().or(extracted),
        DEFAULT_EXAMPLES_FILE,
    );
    let translations = resolve_path(
        root,
        translations,
        section.translations.as_deref(),
        DEFAULT_TRANSLATIONS_FILE,
    );
    let opts = ReinsertOptions {
        prefix: prefix.unwrap_or_else(|| cfg.target_prefix().to_string()),
        field: cfg.example_field().to_string(),
        dry_run,
    };

    let summary =
        vocatch_services::reinsert_from_artifacts(&data_dir, &manifest, &translations, &opts)?;

    if super::is_json(format) {
        return super::print_json(&summary);
    }
    if summary.dry_run {
        crate::ui_info!("dry run: no file was written");
    }
    for f in &summary.files {
        crate::ui_out!("{:<10} {:>5}/{:<5} {}", f.status, f.assigned, f.required, f.file);
    }
    if let Some(s) = &summary.shortfall {
        crate::ui_warn!(
            "only {} replacement texts for {} examples; assignment stopped in {}",
            s.supplied,
            s.required,
            s.file
        );
    }
    if summary.surplus > 0 {
        crate::ui_warn!("{} replacement texts were not used", summary.surplus);
    }
    crate::ui_ok!(
        "{} of {} examples replaced ({} matching)",
        summary.assigned,
        summary.required,
        summary.mode
    );
    Ok(())
}
