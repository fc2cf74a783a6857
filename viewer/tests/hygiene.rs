//! Results from browser calls must be inspected, not dropped.
//!
//! A dropped `removeEventListener` error leaves a live move handler on
//! `window`, so every `Result` is matched and logged. `let _ = name;` is still
//! allowed: it only marks bindings unused by the non-browser build.

use std::fs;
use std::path::{Path, PathBuf};

fn sources(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            sources(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") && !path.to_string_lossy().ends_with("_test.rs") {
            out.push(path);
        }
    }
}

/// `let _ = <call>;` where the right-hand side calls a function or method.
fn discards_call_result(line: &str) -> bool {
    let Some(rest) = line.trim().strip_prefix("let _ =") else {
        return false;
    };
    rest.contains('(') && (rest.contains('.') || rest.contains("::"))
}

#[test]
fn matcher_separates_calls_from_unused_markers() {
    assert!(discards_call_result("let _ = window.remove_event_listener_with_callback(\"pointerup\", f);"));
    assert!(discards_call_result("let _ = console_log::init_with_level(log::Level::Debug);"));
    assert!(!discards_call_result("let _ = ev;"));
    assert!(!discards_call_result("let _ = (pair, core, view);"));
}

#[test]
fn no_discarded_call_results() {
    let mut files = Vec::new();
    sources(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no sources found under src/");

    let mut offenders = Vec::new();
    for path in &files {
        let text = fs::read_to_string(path).unwrap();
        for (i, line) in text.lines().enumerate() {
            if discards_call_result(line) {
                offenders.push(format!("  {}:{}: {}", path.display(), i + 1, line.trim()));
            }
        }
    }
    assert!(offenders.is_empty(), "discarded call results:\n{}", offenders.join("\n"));
}
