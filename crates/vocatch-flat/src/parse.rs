use regex::Regex;
use std::sync::OnceLock;
use vocatch_core::{CorpusError, EntryKey, FlatItem, ManifestEntry, Result};

use crate::{numbered_prefix, strip_bom};

fn key_tag() -> &'static Regex {
    static KEY_TAG: OnceLock<Regex> = OnceLock::new();
    KEY_TAG.get_or_init(|| Regex::new(r"^\{\{(.+?)#(\d+)\}\}\s*(.*)$").unwrap())
}

fn file_line() -> &'static Regex {
    static FILE_LINE: OnceLock<Regex> = OnceLock::new();
    FILE_LINE.get_or_init(|| Regex::new(r"^(?:File|파일):\s*(.+?)\s*$").unwrap())
}

fn category_line() -> &'static Regex {
    static CATEGORY_LINE: OnceLock<Regex> = OnceLock::new();
    CATEGORY_LINE.get_or_init(|| Regex::new(r"^(?:Category|카테고리):\s*(.*?)\s*$").unwrap())
}

fn count_line() -> &'static Regex {
    static COUNT_LINE: OnceLock<Regex> = OnceLock::new();
    COUNT_LINE.get_or_init(|| Regex::new(r"^(?:Examples|예문 수):\s*(\d+)\s*$").unwrap())
}

/// True for `File:`, `Category:` and `Examples:` header lines in either label set.
pub(crate) fn is_section_line(line: &str) -> bool {
    let line = line.trim();
    file_line().is_match(line) || category_line().is_match(line) || count_line().is_match(line)
}

/// Example texts in order of appearance; numbers and keys are dropped.
pub fn parse(text: &str) -> Vec<String> {
    parse_lines(text).into_iter().map(|i| i.text).collect()
}

/// Every numbered line of `text`, in order. Headers, rules, blank lines and
/// anything else that isn't `N. text` are skipped. A line whose text is empty
/// after the number is skipped as well.
pub fn parse_lines(text: &str) -> Vec<FlatItem> {
    let mut out = Vec::new();
    for (idx, line) in strip_bom(text).lines().enumerate() {
        let Some(item) = numbered_item(line) else {
            continue;
        };
        if item.text.is_empty() {
            tracing::debug!(event = "flat_empty_line_skipped", line = idx + 1);
            continue;
        }
        out.push(item);
    }
    out
}

/// The item carried by one numbered line, or `None` when the line has no
/// number. The text may be empty.
pub(crate) fn numbered_item(line: &str) -> Option<FlatItem> {
    let m = numbered_prefix().find(line)?;
    let rest = line[m.end()..].trim_end();
    let item = match key_tag().captures(rest) {
        Some(caps) => match caps[2].parse::<usize>() {
            Ok(index) => FlatItem::keyed(EntryKey::new(caps[1].trim(), index), caps[3].trim_end()),
            Err(_) => FlatItem::plain(rest),
        },
        None => FlatItem::plain(rest),
    };
    Some(item)
}

/// Declared `(file, category, count)` of every section header, in order.
/// Accepts both `File:/Category:/Examples:` and the older Korean labels.
pub fn parse_manifest(text: &str) -> Result<Vec<ManifestEntry>> {
    struct Pending {
        line: usize,
        file_name: String,
        label: String,
    }

    let mut out = Vec::new();
    let mut pending: Option<Pending> = None;

    for (idx, raw) in strip_bom(text).lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if let Some(caps) = file_line().captures(line) {
            if let Some(p) = pending.take() {
                return Err(CorpusError::MalformedManifest {
                    line: p.line,
                    reason: format!("section for {} declares no example count", p.file_name),
                }
                .into());
            }
            pending = Some(Pending {
                line: line_no,
                file_name: caps[1].to_string(),
                label: String::new(),
            });
        } else if let Some(caps) = category_line().captures(line) {
            if let Some(p) = pending.as_mut() {
                p.label = caps[1].to_string();
            }
        } else if let Some(caps) = count_line().captures(line) {
            let Some(p) = pending.take() else {
                continue;
            };
            let count = caps[1].parse::<usize>().map_err(|e| CorpusError::MalformedManifest {
                line: line_no,
                reason: format!("bad example count: {e}"),
            })?;
            out.push(ManifestEntry {
                file_name: p.file_name,
                label: p.label,
                count,
            });
        }
    }

    if let Some(p) = pending {
        return Err(CorpusError::MalformedManifest {
            line: p.line,
            reason: format!("section for {} declares no example count", p.file_name),
        }
        .into());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render;
    use vocatch_core::Extraction;

    fn sample() -> Extraction {
        Extraction {
            manifest: vec![
                ManifestEntry { file_name: "KO_A.json".into(), label: "A".into(), count: 3 },
                ManifestEntry { file_name: "KO_B.json".into(), label: "B".into(), count: 2 },
            ],
            items: ["a1", "a2", "a3", "b1", "b2"].into_iter().map(FlatItem::plain).collect(),
        }
    }

    #[test]
    fn parse_recovers_rendered_texts() {
        let text = render(&sample());
        assert_eq!(parse(&text), ["a1", "a2", "a3", "b1", "b2"]);
        assert_eq!(parse_manifest(&text).unwrap(), sample().manifest);
    }

    #[test]
    fn parse_ignores_numbers_and_noise() {
        let edited = "\
Translated by hand
7. 첫 번째 문장입니다.
   7.   두 번째 문장.\r
-----
1.no space, not an example
100. 세 번째: 3.5 퍼센트.

2.
  42. 마지막 문장
";
        assert_eq!(
            parse(edited),
            ["첫 번째 문장입니다.", "두 번째 문장.", "세 번째: 3.5 퍼센트.", "마지막 문장"]
        );
    }

    #[test]
    fn parse_lines_reads_keys() {
        let text = "  1. {{KO_A.json#2}} 안녕\n  2. plain\n  3. {{KO_B.json#x}} odd\n";
        let items = parse_lines(text);
        assert_eq!(items[0], FlatItem::keyed(EntryKey::new("KO_A.json", 2), "안녕"));
        assert_eq!(items[1], FlatItem::plain("plain"));
        assert_eq!(items[2], FlatItem::plain("{{KO_B.json#x}} odd"));
    }

    #[test]
    fn leading_byte_order_mark_keeps_first_line() {
        assert_eq!(parse("\u{FEFF}1. x1\n2. x2\n3. x3\n"), ["x1", "x2", "x3"]);
        let manifest = parse_manifest("\u{FEFF}File: KO_A.json\nExamples: 1\n  1. a\n").unwrap();
        assert_eq!(manifest[0].file_name, "KO_A.json");
    }

    #[test]
    fn manifest_accepts_legacy_labels() {
        let legacy = "\
================================================================================
VOCATCH - 모든 KO 파일의 Example 문장 모음
================================================================================
총 파일 수: 2
총 예문 수: 3
================================================================================

================================================================================
파일: KO_기초다지기_여행.json
카테고리: 기초다지기_여행
예문 수: 2
================================================================================

  1. one
  2. two

================================================================================
파일: KO_기초다지기_일상회화.json
카테고리: 기초다지기_일상회화
예문 수: 1
================================================================================

  1. three";
        let manifest = parse_manifest(legacy).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest[0].file_name, "KO_기초다지기_여행.json");
        assert_eq!(manifest[0].label, "기초다지기_여행");
        assert_eq!(manifest[0].count, 2);
        assert_eq!(manifest[1].count, 1);
        assert_eq!(parse(legacy), ["one", "two", "three"]);
    }

    #[test]
    fn manifest_section_without_count_is_an_error() {
        let text = "File: KO_A.json\nCategory: A\n\nFile: KO_B.json\nExamples: 1\n";
        let err = parse_manifest(text).unwrap_err();
        match err.downcast_ref::<CorpusError>() {
            Some(CorpusError::MalformedManifest { line, .. }) => assert_eq!(*line, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
