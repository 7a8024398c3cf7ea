//! CLI-level tests for the convert command.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const MINIMAL_QUIZ: &str = r#"<questestinterop>
    <item>
        <presentation label="QST1">
            <flow>
                <material label="question"><mattext>Read this first.</mattext></material>
            </flow>
        </presentation>
    </item>
</questestinterop>"#;

fn cmd() -> Command {
    Command::cargo_bin("fronter-import").unwrap()
}

#[test]
fn test_convert_writes_yaml_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("quiz.xml");
    fs::write(&input, MINIMAL_QUIZ).unwrap();

    cmd()
        .arg("convert")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Questions: 1"))
        .stdout(predicate::str::contains("Saved to:"));

    let yaml = fs::read_to_string(dir.path().join("quiz.yaml")).unwrap();
    assert!(yaml.starts_with("---\n"));
    assert!(yaml.contains("qtype: description"));
    assert!(yaml.contains("name: Read this first."));
}

#[test]
fn test_convert_with_explicit_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("quiz.xml");
    let output = dir.path().join("questions.yaml");
    fs::write(&input, MINIMAL_QUIZ).unwrap();

    cmd()
        .arg("convert")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert!(output.exists());
}

#[test]
fn test_convert_missing_input_fails() {
    cmd()
        .arg("convert")
        .arg("/nonexistent/quiz.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_convert_wrong_root_succeeds_with_empty_batch() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("other.xml");
    fs::write(&input, "<quiz><item/></quiz>").unwrap();

    cmd()
        .arg("convert")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Questions: 0"))
        .stdout(predicate::str::contains("Unexpected document root"));

    let yaml = fs::read_to_string(dir.path().join("other.yaml")).unwrap();
    assert!(yaml.contains("unexpected_document_root"));
}

#[test]
fn test_convert_malformed_document_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.xml");
    fs::write(&input, "<questestinterop><item>").unwrap();

    cmd()
        .arg("convert")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_convert_requires_input_argument() {
    cmd().arg("convert").assert().failure();
}
