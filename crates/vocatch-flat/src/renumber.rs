use crate::parse::numbered_item;
use crate::{numbered_prefix, strip_bom};

/// Rewrite every numbered line with one global counter starting at 1.
/// Other lines, including their line endings, pass through untouched, and so
/// do numbered lines with no text, which the parser skips. A leading byte
/// order mark is kept. Returns the rewritten text and the number of
/// renumbered lines.
pub fn renumber(text: &str) -> (String, usize) {
    let mut out = String::with_capacity(text.len() + 16);
    let body = strip_bom(text);
    if body.len() != text.len() {
        out.push('\u{FEFF}');
    }
    let mut counter = 0usize;
    for chunk in body.split_inclusive('\n') {
        let (content, ending) = split_ending(chunk);
        let counted = numbered_item(content).is_some_and(|item| !item.text.is_empty());
        match numbered_prefix().find(content).filter(|_| counted) {
            Some(m) => {
                counter += 1;
                out.push_str(&format!("{counter:>3}. "));
                out.push_str(&content[m.end()..]);
                out.push_str(ending);
            }
            None => out.push_str(chunk),
        }
    }
    (out, counter)
}

fn split_ending(chunk: &str) -> (&str, &str) {
    if let Some(body) = chunk.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = chunk.strip_suffix('\n') {
        (body, "\n")
    } else {
        (chunk, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn numbers_become_one_global_sequence() {
        let text = "\
File: KO_A.json
Examples: 2

  1. a1
  2. a2

File: KO_B.json
  1. b1
 9.   b2
no number here
";
        let (out, count) = renumber(text);
        assert_eq!(count, 4);
        assert_eq!(
            out,
            "\
File: KO_A.json
Examples: 2

  1. a1
  2. a2

File: KO_B.json
  3. b1
  4. b2
no number here
"
        );
        assert_eq!(parse(&out), parse(text));
    }

    #[test]
    fn keeps_crlf_and_missing_final_newline() {
        let (out, count) = renumber("5. x\r\nheader\r\n8. y");
        assert_eq!(count, 2);
        assert_eq!(out, "  1. x\r\nheader\r\n  2. y");
    }

    #[test]
    fn non_numbered_lines_are_unchanged() {
        let text = "title\n\n----\n2.no-space\n";
        let (out, count) = renumber(text);
        assert_eq!(count, 0);
        assert_eq!(out, text);
    }

    #[test]
    fn numbered_lines_without_text_are_not_counted() {
        let text = "  5. \n  6. x\n  7. {{KO_A.json#0}}\n  8. y\n";
        let (out, count) = renumber(text);
        assert_eq!(count, 2);
        assert_eq!(out, "  5. \n  1. x\n  7. {{KO_A.json#0}}\n  2. y\n");
        assert_eq!(count, parse(&out).len());
    }

    #[test]
    fn byte_order_mark_survives_and_first_line_counts() {
        let (out, count) = renumber("\u{FEFF}4. x1\n9. x2\n");
        assert_eq!(count, 2);
        assert_eq!(out, "\u{FEFF}  1. x1\n  2. x2\n");
        assert_eq!(parse(&out), ["x1", "x2"]);
    }
}
