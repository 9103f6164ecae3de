//! Flat corpus artifact: a numbered, human-editable text stream grouped by file.
//!
//! Rendering numbers lines locally per file. Parsing ignores the numbers
//! entirely: only the order of recognised lines matters.

mod cite;
mod parse;
mod render;
mod renumber;

pub use cite::strip_citations;
pub use parse::{parse, parse_lines, parse_manifest};
pub use render::{render, render_with, RenderOptions, DEFAULT_TITLE};
pub use renumber::renumber;

use regex::Regex;
use std::sync::OnceLock;

/// "optional whitespace, digits, a period, whitespace" at line start.
pub(crate) fn numbered_prefix() -> &'static Regex {
    static NUMBERED_PREFIX: OnceLock<Regex> = OnceLock::new();
    NUMBERED_PREFIX.get_or_init(|| Regex::new(r"^\s*\d+\.\s+").unwrap())
}

/// `text` without a leading byte order mark. Editors that save the
/// translation as "UTF-8 with BOM" put U+FEFF in front of the first line.
pub(crate) fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{FEFF}').unwrap_or(text)
}
