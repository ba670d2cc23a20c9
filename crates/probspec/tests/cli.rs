use std::path::Path;
use std::process::Command;

use probspec_contracts::{DIAG_SCHEMA_VERSION, EXPORT_INDEX_SCHEMA_VERSION};
use serde_json::Value;

fn run_probspec(cwd: &Path, args: &[&str]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_probspec");
    Command::new(exe)
        .current_dir(cwd)
        .env_remove("PROBSPEC_LOG")
        .args(args)
        .output()
        .expect("run probspec")
}

fn parse_json_stdout(out: &std::process::Output) -> Value {
    serde_json::from_slice(&out.stdout).expect("parse stdout JSON")
}

fn assert_success(out: &std::process::Output) {
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr:\n{}",
        String::from_utf8_lossy(&out.stderr)
    );
}

#[test]
fn list_filters_by_curve() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = run_probspec(dir.path(), &["list", "--json"]);
    assert_success(&out);
    let v = parse_json_stdout(&out);
    let ids: Vec<&str> = v["problems"]
        .as_array()
        .expect("problems[]")
        .iter()
        .map(|p| p["id"].as_str().expect("id"))
        .collect();
    assert_eq!(
        ids,
        vec![
            "field-arithmetic",
            "quadratic-extension-arithmetic",
            "cubic-extension-arithmetic",
            "curve-operations"
        ]
    );

    let out = run_probspec(dir.path(), &["list", "--json", "--curve", "mnt6"]);
    assert_success(&out);
    let v = parse_json_stdout(&out);
    let ids: Vec<&str> = v["problems"]
        .as_array()
        .expect("problems[]")
        .iter()
        .map(|p| p["id"].as_str().expect("id"))
        .collect();
    assert!(!ids.contains(&"quadratic-extension-arithmetic"), "{ids:?}");
    assert!(ids.contains(&"cubic-extension-arithmetic"), "{ids:?}");
}

#[test]
fn list_accepts_scope_labels_and_stages() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = run_probspec(
        dir.path(),
        &["list", "--json", "--curve", "MNT6753", "--stage", "tutorial"],
    );
    assert_success(&out);
    let v = parse_json_stdout(&out);
    let ids: Vec<&str> = v["problems"]
        .as_array()
        .expect("problems[]")
        .iter()
        .map(|p| p["id"].as_str().expect("id"))
        .collect();
    assert_eq!(ids, vec!["field-arithmetic", "cubic-extension-arithmetic"]);

    let out = run_probspec(dir.path(), &["list", "--json", "--stage", "stage-1"]);
    assert_success(&out);
    let v = parse_json_stdout(&out);
    assert_eq!(v["problems"].as_array().expect("problems[]").len(), 1);
    assert_eq!(v["problems"][0]["id"], "curve-operations");

    let out = run_probspec(dir.path(), &["list", "--stage", "stage-3"]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unknown stage"), "{stderr}");
}

#[test]
fn show_prints_markdown_page() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = run_probspec(dir.path(), &["show", "field-arithmetic"]);
    assert_success(&out);
    let md = String::from_utf8(out.stdout).expect("utf8");
    assert!(md.starts_with("# Field arithmetic\n"), "{md}");
    assert!(md.contains("### Input `x`"), "{md}");
    assert!(md.contains("array of `n` × element of the prime field with modulus `MNT4753.q`"));
}

#[test]
fn show_unknown_id_fails_with_known_list() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = run_probspec(dir.path(), &["show", "nope"]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unknown problem id: nope"), "{stderr}");
    assert!(stderr.contains("field-arithmetic"), "{stderr}");
}

#[test]
fn export_writes_files_and_index_from_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("probspec.json"),
        r#"{
          "schema_version": "probspec.config@0.1.0",
          "out_dir": "public",
          "problems": ["field-arithmetic", "curve-operations"],
          "formats": ["md", "json"],
          "reference_base_url": "https://example.org/ref"
        }"#,
    )
    .expect("write config");

    let out = run_probspec(dir.path(), &["export"]);
    assert_success(&out);
    let index = parse_json_stdout(&out);
    assert_eq!(index["schema_version"], EXPORT_INDEX_SCHEMA_VERSION);
    let problems = index["problems"].as_array().expect("problems[]");
    assert_eq!(problems.len(), 2);
    assert_eq!(problems[0]["files"].as_array().expect("files[]").len(), 2);

    let public = dir.path().join("public");
    for name in [
        "index.json",
        "field-arithmetic.md",
        "field-arithmetic.json",
        "curve-operations.md",
        "curve-operations.json",
    ] {
        assert!(public.join(name).is_file(), "missing {name}");
    }
    let md = std::fs::read_to_string(public.join("field-arithmetic.md")).expect("read md");
    assert!(md.contains("(https://example.org/ref/field-arithmetic)"), "{md}");

    let out = run_probspec(
        dir.path(),
        &["parse", "public/field-arithmetic.json", "--json"],
    );
    assert_success(&out);
    let v = parse_json_stdout(&out);
    assert_eq!(v["id"], "field-arithmetic");
    let names: Vec<&str> = v["bindings"]
        .as_array()
        .expect("bindings[]")
        .iter()
        .map(|b| b["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["n", "x", "y", "out_x", "out_y"]);
}

#[test]
fn export_flags_override_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = run_probspec(
        dir.path(),
        &[
            "export",
            "--out-dir",
            "site",
            "--format",
            "json",
            "--problem",
            "cubic-extension-arithmetic",
        ],
    );
    assert_success(&out);
    let site = dir.path().join("site");
    assert!(site.join("cubic-extension-arithmetic.json").is_file());
    assert!(!site.join("cubic-extension-arithmetic.md").exists());
}

#[test]
fn check_reports_clean_catalog() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = run_probspec(dir.path(), &["check", "--json"]);
    assert_success(&out);
    let v = parse_json_stdout(&out);
    assert_eq!(v["schema_version"], DIAG_SCHEMA_VERSION);
    assert_eq!(v["ok"], true);
    assert_eq!(v["diagnostics"].as_array().expect("diagnostics[]").len(), 0);
}

#[test]
fn bad_config_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("probspec.json"), r#"{"formats": ["pdf"]}"#)
        .expect("write config");
    let out = run_probspec(dir.path(), &["list"]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("parse JSON"), "{stderr}");
}
