//! Integration tests for xmlshape CLI

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::{tempdir, TempDir};

fn run_xmlshape(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_xmlshape"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn sample_corpus() -> TempDir {
    let temp = tempdir().unwrap();
    write(
        temp.path(),
        "rec1.xml",
        r#"<mods xmlns="http://www.loc.gov/mods/v3"><titleInfo><title>Maps</title></titleInfo><name type="personal"><namePart>Ada</namePart></name></mods>"#,
    );
    write(
        temp.path(),
        "rec2.xml",
        r#"<mods xmlns="http://www.loc.gov/mods/v3"><titleInfo><title>Atlas</title><title>Globes</title></titleInfo><genre valueURI="http://vocab.getty.edu/page/aat/300028094">maps</genre></mods>"#,
    );
    temp
}

fn folder(temp: &TempDir) -> &str {
    temp.path().to_str().unwrap()
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_xmlshape(&["--help"]);

    assert!(success);
    assert!(stdout.contains("xmlshape"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--only"));
    assert!(stdout.contains("--attribute-keys"));
    assert!(stdout.contains("--collapse-uri"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_xmlshape(&["--version"]);

    assert!(success);
    assert!(stdout.contains("xmlshape"));
}

#[test]
fn test_tsv_output() {
    let temp = sample_corpus();
    let (stdout, _, success) = run_xmlshape(&[folder(&temp)]);

    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "mods\tN/A\t2\t1\tN/A");
    assert_eq!(lines[1], "mods/titleInfo\tN/A\t2\t1\tN/A");
    assert_eq!(lines[2], "mods/titleInfo/title\tMaps\t3\t2\trec1");
    assert!(lines.contains(&"mods/name/@type/personal\tpersonal\t1\t1\trec1"));
    assert!(lines.contains(&"mods/genre/@valueURI/http://vocab.getty.edu/page/aat/*\thttp://vocab.getty.edu/page/aat/300028094\t1\t1\trec2"));
    for line in lines {
        assert_eq!(line.split('\t').count(), 5);
    }
}

#[test]
fn test_output_is_idempotent() {
    let temp = sample_corpus();
    let (first, _, _) = run_xmlshape(&[folder(&temp)]);
    let (second, _, _) = run_xmlshape(&[folder(&temp)]);

    assert_eq!(first, second);
}

#[test]
fn test_malformed_file_is_skipped() {
    let temp = sample_corpus();
    write(temp.path(), "broken.xml", "<mods><titleInfo></mods>");

    let (stdout, stderr, success) = run_xmlshape(&[folder(&temp)]);

    assert!(success);
    assert!(stderr.contains("skipping document"));
    assert!(stderr.contains("broken.xml"));
    assert!(stdout.contains("mods/titleInfo/title\tMaps\t3\t2\trec1"));
}

#[test]
fn test_quiet_hides_skip_warnings() {
    let temp = sample_corpus();
    write(temp.path(), "broken.xml", "<mods>");

    let (_, stderr, success) = run_xmlshape(&[folder(&temp), "-q"]);

    assert!(success);
    assert!(!stderr.contains("skipping document"));
}

#[test]
fn test_json_output() {
    let temp = sample_corpus();
    let (stdout, _, success) = run_xmlshape(&[folder(&temp), "--output", "json"]);

    assert!(success);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(json["document_count"], 2);
    assert_eq!(json["items"][2]["label"], "mods/titleInfo/title");
    assert_eq!(json["items"][2]["entry"]["stats"]["max_per_file"], 2);
    assert_eq!(json["items"][2]["entry"]["stats"]["max_file"], "rec2");
}

#[test]
fn test_table_output() {
    let temp = sample_corpus();
    let (stdout, _, success) = run_xmlshape(&[folder(&temp), "--output", "table"]);

    assert!(success);
    assert!(stdout.contains("Path"));
    assert!(stdout.contains("Occurrences"));
    assert!(stdout.contains("Max/File"));
    assert!(stdout.contains("Sample File"));
    assert!(stdout.contains("Total (") && stdout.contains("2 documents)"));
}

#[test]
fn test_only_attributes() {
    let temp = sample_corpus();
    let (stdout, _, success) = run_xmlshape(&[folder(&temp), "--only", "attributes"]);

    assert!(success);
    for line in stdout.lines() {
        let path = line.split('\t').next().unwrap();
        assert!(path.contains("/@"), "unexpected element row: {}", line);
    }
    assert_eq!(stdout.lines().count(), 2);
}

#[test]
fn test_named_attribute_keys() {
    let temp = sample_corpus();
    let (stdout, _, success) =
        run_xmlshape(&[folder(&temp), "--attribute-keys", "named", "--only", "attributes"]);

    assert!(success);
    assert!(stdout.contains("mods/name/@type\tpersonal\t1\t1\trec1"));
    assert!(stdout.contains("mods/genre/@valueURI\t"));
}

#[test]
fn test_sort_by_occurrences() {
    let temp = sample_corpus();
    let (stdout, _, success) = run_xmlshape(&[folder(&temp), "--sort", "occurrences"]);

    assert!(success);
    assert!(stdout.starts_with("mods/titleInfo/title\t"));
}

#[test]
fn test_multiple_folders_share_one_corpus() {
    let first = sample_corpus();
    let second = tempdir().unwrap();
    write(second.path(), "rec3.xml", "<mods><titleInfo><title>Charts</title></titleInfo></mods>");

    let (stdout, _, success) = run_xmlshape(&[folder(&first), folder(&second)]);

    assert!(success);
    assert!(stdout.contains("mods\tN/A\t3\t1\tN/A"));
    assert!(stdout.contains("mods/titleInfo/title\tMaps\t4\t2\trec1"));
}

#[test]
fn test_invalid_path() {
    let (_, stderr, success) = run_xmlshape(&["/nonexistent/path/to/records"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_text_output_is_plain() {
    let temp = sample_corpus();
    let (stdout, _, success) = run_xmlshape(&[folder(&temp), "--output", "text"]);

    assert!(success);
    assert!(stdout.contains("Sample File"));
    assert!(!stdout.contains("[category]"));
    assert!(!stdout.contains('\u{1b}'));
}

#[test]
fn test_sample_text_after_comment() {
    let temp = tempdir().unwrap();
    write(
        temp.path(),
        "rec.xml",
        "<mods><note><!-- reviewed -->Scanned from microfilm</note></mods>",
    );

    let (stdout, _, success) = run_xmlshape(&[folder(&temp)]);

    assert!(success);
    assert!(stdout.contains("mods/note\tScanned from microfilm\t1\t1\trec\n"));
}

#[test]
fn test_non_utf8_record_is_skipped() {
    let temp = sample_corpus();
    let mut bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><mods><note>Caf".to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b"</note></mods>");
    fs::write(temp.path().join("latin1.xml"), bytes).unwrap();

    let (stdout, stderr, success) = run_xmlshape(&[folder(&temp)]);

    assert!(success);
    assert!(stderr.contains("unsupported encoding"));
    assert!(!stdout.contains("mods/note"));
}
