use regex::Regex;
use std::sync::OnceLock;

fn citation() -> &'static Regex {
    static CITATION: OnceLock<Regex> = OnceLock::new();
    CITATION.get_or_init(|| Regex::new(r"\[.*?\]").unwrap())
}

fn blanks() -> &'static Regex {
    static BLANKS: OnceLock<Regex> = OnceLock::new();
    BLANKS.get_or_init(|| Regex::new(r"[ \t]+").unwrap())
}

/// Drop `[...]` spans (e.g. `[cite_start]`, `[cite: 12]`) left behind by
/// external translation tools, squeeze spaces and remove blank lines.
/// Line structure is kept so the result still parses line by line.
pub fn strip_citations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let no_cite = citation().replace_all(line, "");
        let squeezed = blanks().replace_all(&no_cite, " ");
        let trimmed = squeezed.trim();
        if trimmed.is_empty() {
            continue;
        }
        out.push_str(trimmed);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn removes_citations_and_blank_lines() {
        let raw = "[cite_start]1. 오늘 뉴스 봤어요? [cite: 12]\n\n   2.  그들은\t정치에 대해 [cite: 3, 4] 보도합니다.\n[cite_end]\n";
        let clean = strip_citations(raw);
        assert_eq!(clean, "1. 오늘 뉴스 봤어요?\n2. 그들은 정치에 대해 보도합니다.\n");
        assert_eq!(parse(&clean), ["오늘 뉴스 봤어요?", "그들은 정치에 대해 보도합니다."]);
    }

    #[test]
    fn keyed_tags_survive() {
        let clean = strip_citations("  1. {{KO_A.json#0}} hi [cite: 1]\n");
        assert_eq!(clean, "1. {{KO_A.json#0}} hi\n");
    }
}
