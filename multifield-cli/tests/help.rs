use std::io::Write;

use assert_cmd::cargo::{self};
use predicates::str::contains;

const WIDGET: &str = r#"{
    "name": "phones",
    "orientation": "horizontal",
    "fields": [
        {"name": "kind", "label": "Kind", "width": 80},
        {"name": "number", "label": "Number", "width": 120, "mandatory": true}
    ],
    "rows": [{"id": 9, "kind": "mobile", "number": "555"}]
}"#;

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!("multifield");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("multifield"));
}

#[test]
fn renders_inline_widget_document() {
    let mut cmd = cargo::cargo_bin_cmd!("multifield");
    cmd.args(["render", "--widget", WIDGET])
        .assert()
        .success()
        .stdout(contains("id=\"phonesmfTable\""))
        .stdout(contains("dbId=\"9\""))
        .stdout(contains("var mtfphones = new MultiField("));
}

const TOML_WIDGET: &str = r#"
name = "phones"
orientation = "vertical"

[[fields]]
name = "kind"
label = "Kind"
width = 80

[[fields]]
name = "number"
label = "Number"
width = 120
mandatory = true
"#;

#[test]
fn renders_toml_widget_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(TOML_WIDGET.as_bytes()).unwrap();

    let mut cmd = cargo::cargo_bin_cmd!("multifield");
    cmd.args(["render", "--widget"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(contains("id=\"phonesmfTable\""))
        .stdout(contains("name=\"phones_number\""));
}

#[test]
fn decodes_posted_body() {
    let mut cmd = cargo::cargo_bin_cmd!("multifield");
    cmd.args([
        "decode",
        "--widget",
        WIDGET,
        "--body",
        "phones=%5B%7B%22kind%22%3A%22home%22%2C%22number%22%3A%22123%22%7D%5D",
    ])
    .assert()
    .success()
    .stdout(contains("\"kind\": \"home\""));
}

#[test]
fn reports_non_numeric_values() {
    let mut cmd = cargo::cargo_bin_cmd!("multifield");
    cmd.args(["check-numeric", "--label", "Age", "abc"])
        .assert()
        .failure()
        .stderr(contains("The field Age must be numeric"));
}
