use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn pdf_anchor() -> Command {
    Command::cargo_bin("pdf-anchor").expect("binary should be built")
}

#[test]
fn encode_prints_destination_token() {
    pdf_anchor()
        .args([
            "encode",
            "--page",
            "3",
            "--annotation",
            "27R",
            "--left",
            "10.5",
            "--top",
            "-2",
        ])
        .assert()
        .success()
        .stdout("#page=3&annotation=27R&offset=10.5,-2,\n");
}

#[test]
fn encode_writes_rect_in_token_order() {
    pdf_anchor()
        .args(["encode", "--page", "1", "--rect", "1,2,3,4"])
        .assert()
        .success()
        .stdout("#page=1&rect=1,2,3,4\n");
}

#[test]
fn decode_emits_json_record() {
    let output = pdf_anchor()
        .args(["decode", "#page=5&offset=100,200,1.5&annotation=9R"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: Value = serde_json::from_slice(&output).expect("stdout should contain valid json");
    assert_eq!(value["page"], 5);
    assert_eq!(value["annotationId"], "9R");
    assert_eq!(value["offset"]["left"], 100.0);
    assert_eq!(value["offset"]["top"], 200.0);
}

#[test]
fn decode_rejects_invalid_page() {
    pdf_anchor()
        .args(["decode", "#page=0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid page number"));
}

#[test]
fn link_resolves_against_vault() {
    let vault = tempfile::tempdir().expect("temp dir should be created");
    std::fs::write(vault.path().join("Notes.pdf"), b"%PDF-1.7").unwrap();

    let output = pdf_anchor()
        .arg("link")
        .arg("[[Notes.pdf#page=5&offset=100,200,1.5]]")
        .args(["--context", "A.pdf", "--root"])
        .arg(vault.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: Value = serde_json::from_slice(&output).expect("stdout should contain valid json");
    assert_eq!(value["file"]["path"], "Notes.pdf");
    assert_eq!(value["page"], 5);
    assert_eq!(value["offset"]["left"], 100.0);
}

#[test]
fn link_to_missing_file_fails() {
    let vault = tempfile::tempdir().expect("temp dir should be created");

    pdf_anchor()
        .arg("link")
        .arg("[[Missing.pdf#page=2]]")
        .args(["--context", "A.pdf", "--root"])
        .arg(vault.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no file matches"));
}

#[test]
fn nearest_prefers_containing_markup() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("candidates.json");
    std::fs::write(
        &path,
        r#"[
            {"id": "link", "rect": {"left": 0, "top": 0, "right": 10, "bottom": 10}, "kind": {"type": "link"}},
            {"id": "markup", "rect": {"left": 20, "top": 0, "right": 40, "bottom": 10}, "kind": {"type": "textMarkup", "subtype": "highlight"}}
        ]"#,
    )
    .unwrap();

    pdf_anchor()
        .arg("nearest")
        .arg(&path)
        .args(["--left", "25", "--top", "5"])
        .assert()
        .success()
        .stdout("markup\n");
}

#[test]
fn merge_joins_glyphs_per_line() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("glyphs.json");
    std::fs::write(
        &path,
        r#"[
            {"left": 0, "top": 0, "right": 5, "bottom": 10},
            {"left": 5, "top": 0, "right": 10, "bottom": 10},
            {"left": 0, "top": 10, "right": 5, "bottom": 20}
        ]"#,
    )
    .unwrap();

    let output = pdf_anchor()
        .arg("merge")
        .arg(&path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: Value = serde_json::from_slice(&output).expect("stdout should contain valid json");
    let rects = value.as_array().expect("array of rects");
    assert_eq!(rects.len(), 2);
    assert_eq!(rects[0]["right"], 10.0);
    assert_eq!(rects[1]["top"], 10.0);
}
