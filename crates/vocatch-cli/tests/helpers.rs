#![allow(dead_code)]

use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The `vocatch` binary with logs kept out of the source tree.
pub fn bin_cmd(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vocatch").expect("vocatch binary built");
    cmd.env("VOCATCH_LOG_DIR", root.join("logs"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--root")
        .arg(root);
    cmd
}

/// `<root>/assets/data`, created on demand.
pub fn data_dir(root: &Path) -> PathBuf {
    let dir = root.join("assets").join("data");
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Record file with one entry per example, in the layout the data files use.
pub fn write_records(dir: &Path, name: &str, examples: &[&str]) {
    let entries: Vec<serde_json::Value> = examples
        .iter()
        .enumerate()
        .map(|(i, ex)| {
            serde_json::json!({
                "word": format!("word{i}"),
                "meaning_en": format!("meaning{i}"),
                "pos": "noun",
                "example": ex,
                "level": "기초다지기",
                "category": "여행"
            })
        })
        .collect();
    fs::write(dir.join(name), serde_json::to_string_pretty(&entries).unwrap()).unwrap();
}

pub fn examples(dir: &Path, name: &str) -> Vec<String> {
    let raw = fs::read_to_string(dir.join(name)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["example"].as_str().unwrap_or("").to_string())
        .collect()
}

pub fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn assert_contains_with_context(haystack: &str, needle: &str, context_msg: &str) {
    if haystack.contains(needle) {
        return;
    }
    let head = haystack.lines().take(10).collect::<Vec<_>>().join("\n");
    panic!(
        "{}\n--- needle ---\n{}\n--- head(10) ---\n{}",
        context_msg, needle, head
    );
}

pub fn assert_no_ansi(s: &str, context_msg: &str) {
    assert!(
        !s.bytes().any(|b| b == 0x1B),
        "{}\nANSI escapes in output:\n{}",
        context_msg,
        s.lines().take(8).collect::<Vec<_>>().join("\n")
    );
}
