//! Layering guardrails between the workspace crates.
//!
//! `zelang_core` is pure vocabulary and must stay dependency-free. `zelang_syntax` may only depend on
//! `zelang_core` plus its error/logging stack; it must never reach for the CLI or the backend.
//! These tests scan the `[dependencies]` tables of the member manifests.

/// Dependency names declared in the `[dependencies]` table of a manifest.
fn dependencies(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }

    names
}

#[test]
fn core_has_no_dependencies() {
    let deps = dependencies(include_str!("../crates/zelang_core/Cargo.toml"));
    assert!(deps.is_empty(), "zelang_core must not depend on anything, found {deps:?}");
}

#[test]
fn syntax_depends_only_on_core_and_ambient_crates() {
    let deps = dependencies(include_str!("../crates/zelang_syntax/Cargo.toml"));
    let allowed = ["zelang_core", "thiserror", "miette", "tracing"];
    for dep in &deps {
        assert!(allowed.contains(&dep.as_str()), "zelang_syntax must not depend on `{dep}`");
    }
    assert!(deps.iter().any(|d| d == "zelang_core"));
}

#[test]
fn cli_stack_stays_in_the_root_crate() {
    let root = dependencies(include_str!("../Cargo.toml"));
    for dep in ["clap", "tracing-subscriber"] {
        assert!(root.iter().any(|d| d == dep), "root crate should declare `{dep}`");
    }
    assert!(!root.iter().any(|d| d == "proptest" || d == "insta"), "test tools belong in [dev-dependencies]");
}

#[test]
fn dependency_scan_stops_at_next_table() {
    let manifest = "[package]\nname = \"x\"\n\n[dependencies]\nfoo = \"1\" # note\n\n[dev-dependencies]\nbar = \"1\"\n";
    assert_eq!(dependencies(manifest), vec!["foo".to_string()]);
}
