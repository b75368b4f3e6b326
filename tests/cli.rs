//! Command-line tests for the pattern-dict binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn wordlist(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

fn pattern_dict() -> Command {
    Command::cargo_bin("pattern-dict").unwrap()
}

#[test]
fn test_keyspace_flag() {
    let words = wordlist(b"password\n");

    pattern_dict()
        .args(["--keyspace", "?d?d?W?s"])
        .arg(words.path())
        .assert()
        .success()
        .stdout("3300\n");
}

#[test]
fn test_candidates_to_stdout() {
    let words = wordlist(b"a\nbb\nccc");

    pattern_dict()
        .args(["-q", "?W"])
        .arg(words.path())
        .assert()
        .success()
        .stdout("a\nbb\nccc\n");
}

#[test]
fn test_custom_charset_skip_and_limit() {
    let words = wordlist(b"x\n");

    pattern_dict()
        .args(["-q", "-1", "?l?d", "-s", "25", "-l", "3", "?1?W"])
        .arg(words.path())
        .assert()
        .success()
        .stdout("zx\n0x\n1x\n");
}

#[test]
fn test_output_file_with_threads() {
    let words = wordlist(b"one\ntwo\n");
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("candidates.txt");

    pattern_dict()
        .args(["-q", "-t", "4", "--chunk-size", "5", "-o"])
        .arg(&out)
        .args(["?W?d?d"])
        .arg(words.path())
        .assert()
        .success()
        .stdout("");

    let contents = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 200);
    assert_eq!(lines[0], "one00");
    assert_eq!(lines[99], "one99");
    assert_eq!(lines[100], "two00");
    assert_eq!(lines[199], "two99");
}

#[test]
fn test_missing_word_placeholder() {
    let words = wordlist(b"x\n");

    pattern_dict()
        .args(["??W"])
        .arg(words.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("?W (word placeholder) is required"));
}

#[test]
fn test_skip_past_keyspace() {
    let words = wordlist(b"x\n");

    pattern_dict()
        .args(["-q", "-s", "10", "?d?W"])
        .arg(words.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Seek offset 10 past keyspace 10"));
}

#[test]
fn test_missing_wordlist_file() {
    pattern_dict()
        .args(["?W", "/nonexistent/wordlist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read wordlist"));
}

#[test]
fn test_empty_wordlist_file() {
    let words = wordlist(b"");

    pattern_dict()
        .args(["?W"])
        .arg(words.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wordlist is empty"));
}
