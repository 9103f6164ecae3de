use std::path::Path;

use vocatch_core::Result;
use vocatch_domain::{TextRewriteSummary, SCHEMA_VERSION};

/// Renumber a flat artifact with one global counter. `output` may equal `input`.
pub fn renumber_file(input: &Path, output: &Path) -> Result<TextRewriteSummary> {
    let text = crate::read_input(input)?;
    let (renumbered, lines) = vocatch_flat::renumber(&text);
    vocatch_store::write_atomic(output, renumbered.as_bytes())?;
    tracing::info!(event = "renumber_written", out = %output.display(), lines = lines);
    Ok(summary(input, output, lines))
}

/// Strip `[...]` citations from a translation file, line by line.
pub fn clean_citations_file(input: &Path, output: &Path) -> Result<TextRewriteSummary> {
    let text = crate::read_input(input)?;
    let cleaned = vocatch_flat::strip_citations(&text);
    vocatch_store::write_atomic(output, cleaned.as_bytes())?;
    let lines = cleaned.lines().count();
    tracing::info!(event = "clean_cite_written", out = %output.display(), lines = lines);
    Ok(summary(input, output, lines))
}

fn summary(input: &Path, output: &Path, lines: usize) -> TextRewriteSummary {
    TextRewriteSummary {
        schema_version: SCHEMA_VERSION,
        input: input.display().to_string(),
        output: output.display().to_string(),
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use vocatch_core::CorpusError;

    #[test]
    fn renumber_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all_ko_examples.txt");
        fs::write(&path, "File: KO_A.json\n  1. a\n  2. b\nFile: KO_B.json\n  1. c\n").unwrap();

        let s = renumber_file(&path, &path).unwrap();
        assert_eq!(s.lines, 3);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "File: KO_A.json\n  1. a\n  2. b\nFile: KO_B.json\n  3. c\n"
        );
    }

    #[test]
    fn clean_citations_to_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("translate_examples.csv");
        let out = dir.path().join("clean.csv");
        fs::write(&input, "1. 안녕하세요 [1]. 반가워요 [cite: 2]\n2. 둘째 줄\n").unwrap();

        let s = clean_citations_file(&input, &out).unwrap();
        assert_eq!(s.lines, 2);
        let cleaned = fs::read_to_string(&out).unwrap();
        assert!(!cleaned.contains('['));
        assert_eq!(vocatch_flat::parse(&cleaned).len(), 2);
        assert!(fs::read_to_string(&input).unwrap().contains("[1]"));
    }

    #[test]
    fn missing_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("nope.txt");
        let err = renumber_file(&p, &p).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CorpusError>(),
            Some(CorpusError::MissingInput(_))
        ));
    }
}
