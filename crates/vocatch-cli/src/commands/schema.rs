use std::fs;
use std::path::{Path, PathBuf};
use vocatch_config::{resolve_path, VocatchConfig, DEFAULT_SCHEMA_DIR};

pub fn run_schema(root: &Path, cfg: &VocatchConfig, out_dir: Option<PathBuf>) -> color_eyre::Result<()> {
    let configured = cfg.schema.as_ref().and_then(|s| s.out_dir.as_deref());
    let out_dir = resolve_path(root, out_dir, configured, DEFAULT_SCHEMA_DIR);
    fs::create_dir_all(&out_dir)?;
    macro_rules! dump {
        ($ty:ty, $name:literal) => {{
            let schema = schemars::schema_for!($ty);
            let path = out_dir.join($name);
            let f = fs::File::create(&path)?;
            serde_json::to_writer_pretty(f, &schema)?;
        }};
    }
    dump!(vocatch_domain::ExtractSummary, "extract_summary.schema.json");
    dump!(vocatch_domain::ReinsertSummary, "reinsert_summary.schema.json");
    dump!(vocatch_domain::SwapSummary, "swap_summary.schema.json");
    dump!(vocatch_domain::SeedSummary, "seed_summary.schema.json");
    dump!(vocatch_domain::TextRewriteSummary, "text_rewrite_summary.schema.json");
    crate::ui_ok!("schemas written to {}", out_dir.display());
    Ok(())
}
