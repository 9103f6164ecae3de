use vocatch_core::{Extraction, FlatItem, RULE_WIDTH};

use crate::numbered_prefix;
use crate::parse::is_section_line;

pub const DEFAULT_TITLE: &str = "VOCATCH - example sentences";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub title: String,
    /// Prefix every line with `{{file#index}}` so reinsertion can match by key.
    pub keyed: bool,
    /// Free-form generation stamp written into the title block.
    pub generated: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            keyed: false,
            generated: None,
        }
    }
}

pub fn render(extraction: &Extraction) -> String {
    render_with(extraction, &RenderOptions::default())
}

/// Title block, then one section per manifest record:
///
/// ```text
/// ================================================================================
/// File: KO_a.json
/// Category: a
/// Examples: 3
/// ================================================================================
///
///   1. first example
/// ```
///
/// Numbering restarts at 1 in every section. Files that contributed no
/// examples still get a header (count 0) so the manifest stays complete.
pub fn render_with(extraction: &Extraction, opts: &RenderOptions) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines: Vec<String> = vec![
        rule.clone(),
        title_line(&opts.title),
        rule.clone(),
        format!("Files: {}", extraction.manifest.len()),
        format!("Total examples: {}", extraction.total()),
    ];
    if let Some(stamp) = opts.generated.as_deref() {
        lines.push(format!("Generated: {stamp}"));
    }
    lines.push(rule.clone());

    for (entry, items) in extraction.sections() {
        lines.push(String::new());
        lines.push(rule.clone());
        lines.push(format!("File: {}", entry.file_name));
        lines.push(format!("Category: {}", entry.label));
        lines.push(format!("Examples: {}", entry.count));
        lines.push(rule.clone());
        lines.push(String::new());
        for (i, item) in items.iter().enumerate() {
            lines.push(format!("{:>3}. {}", i + 1, line_body(item, opts.keyed)));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// The title on one line. A title that would read back as an example or a
/// section header gets a `# ` prefix.
fn title_line(title: &str) -> String {
    let folded = title
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if numbered_prefix().is_match(&folded) || is_section_line(&folded) {
        format!("# {folded}")
    } else {
        folded
    }
}

fn line_body(item: &FlatItem, keyed: bool) -> String {
    let text = single_line(item);
    match (&item.key, keyed) {
        (Some(key), true) => format!("{{{{{key}}}}} {text}"),
        _ => text,
    }
}

fn single_line(item: &FlatItem) -> String {
    if !item.text.contains(['\n', '\r']) {
        return item.text.clone();
    }
    tracing::warn!(
        event = "example_folded",
        key = ?item.key.as_ref().map(|k| k.to_string()),
        "example spans several lines; line breaks folded to spaces"
    );
    item.text
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
