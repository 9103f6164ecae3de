use std::path::{Path, PathBuf};
use vocatch_config::VocatchConfig;
use vocatch_services::SeedTable;

pub fn run_seed(
    root: &Path,
    cfg: &VocatchConfig,
    data_dir: Option<PathBuf>,
    table: Option<PathBuf>,
    format: &str,
) -> color_eyre::Result<()> {
    tracing::debug!(event = "seed_args", root = ?root, data_dir = ?data_dir, table = ?table);

    let data_dir = super::data_dir(root, cfg, data_dir);
    let table_path = table.or_else(|| {
        cfg.seed
            .as_ref()
            .and_then(|s| s.table.as_deref())
            .map(PathBuf::from)
    });
    let loaded;
    let table: &SeedTable = match table_path {
        Some(p) => {
            loaded = SeedTable::from_path(&root.join(p))?;
            &loaded
        }
        None => SeedTable::builtin()?,
    };

    let summary = vocatch_services::seed_files(
        &data_dir,
        table,
        cfg.source_prefix(),
        cfg.target_prefix(),
    )?;

    if super::is_json(format) {
        return super::print_json(&summary);
    }
    for f in &summary.files {
        crate::ui_out!("{:>5}  {}", f.words, f.path);
    }
    for s in &summary.skipped {
        crate::ui_warn!("no words for {s}");
    }
    crate::ui_ok!("{} record files written", summary.files.len());
    Ok(())
}
