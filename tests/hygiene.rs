//! Hygiene — enforces coding standards at test time
//!
//! These tests scan the crate's production sources for antipatterns that
//! violate project standards. Each pattern has a budget (zero); if you must
//! add an occurrence, you have to fix an existing one first — a budget never
//! grows.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files from `src/`, excluding sibling test files.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no production sources found under src/");
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn assert_budget(pattern: &str, label: &str) {
    let files = source_files();
    let mut hits = Vec::new();
    for file in &files {
        let count = file
            .content
            .lines()
            .filter(|line| line.contains(pattern))
            .count();
        if count > 0 {
            hits.push(format!("  {}: {count}", file.path));
        }
    }
    assert!(
        hits.is_empty(),
        "{label} budget exceeded (max 0):\n{}",
        hits.join("\n")
    );
}

// Panics — these crash the process.

#[test]
fn unwrap_budget() {
    assert_budget(".unwrap()", ".unwrap()");
}

#[test]
fn expect_budget() {
    assert_budget(".expect(", ".expect()");
}

#[test]
fn panic_budget() {
    assert_budget("panic!(", "panic!()");
}

#[test]
fn unreachable_budget() {
    assert_budget("unreachable!(", "unreachable!()");
}

#[test]
fn todo_budget() {
    assert_budget("todo!(", "todo!()");
}

#[test]
fn unimplemented_budget() {
    assert_budget("unimplemented!(", "unimplemented!()");
}

// Silent loss — discards errors without inspecting.

#[test]
fn silent_discard_budget() {
    assert_budget("let _ =", "let _ =");
}

#[test]
fn dot_ok_budget() {
    assert_budget(".ok()", ".ok()");
}

// Style / structure.

#[test]
fn allow_dead_code_budget() {
    assert_budget("#[allow(dead_code)]", "#[allow(dead_code)]");
}
