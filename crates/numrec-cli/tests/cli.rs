use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `numrec` with its config directory isolated in `home`.
fn numrec(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("numrec").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path());
    cmd
}

#[test]
fn recognize_prints_resolved_numbers() {
    let home = TempDir::new().unwrap();
    numrec(&home)
        .args([
            "recognize",
            "I bought two thousand and five apples",
            "--kind",
            "number",
            "--format",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"two thousand and five\" => 2005"));
}

#[test]
fn recognize_json_output() {
    let home = TempDir::new().unwrap();
    let output = numrec(&home)
        .args(["recognize", "5 dollars and 20 cents", "--kind", "currency"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let first = &json[0];
    assert_eq!(first["kind"], "currency");
    assert_eq!(first["resolution"], "5.2");
    assert_eq!(first["unit"], "USD");
    assert_eq!(first["start"], 0);
}

#[test]
fn recognize_chinese_from_file() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("input.txt");
    fs::write(&input, "打七五折，共三千五").unwrap();

    numrec(&home)
        .args(["recognize", "--culture", "zh-cn", "--format", "csv", "--file"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("kind,start,length,text,tag,resolution,unit"))
        .stdout(predicate::str::contains("七五折"))
        .stdout(predicate::str::contains("75%"))
        .stdout(predicate::str::contains("3500"));
}

#[test]
fn recognize_extract_only_omits_values() {
    let home = TempDir::new().unwrap();
    let output = numrec(&home)
        .args(["recognize", "more than 20", "--kind", "range", "--extract-only"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["text"], "more than 20");
    assert!(json[0].get("resolution").is_none());
}

#[test]
fn recognize_rejects_unknown_culture() {
    let home = TempDir::new().unwrap();
    numrec(&home)
        .args(["recognize", "five", "--culture", "xx-yy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown culture"));
}

#[test]
fn recognize_rejects_unknown_kind() {
    let home = TempDir::new().unwrap();
    numrec(&home)
        .args(["recognize", "five", "--kind", "length"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown recognizer kind"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let home = TempDir::new().unwrap();
    let input_dir = home.path().join("in");
    let output_dir = home.path().join("out");
    fs::create_dir_all(&input_dir).unwrap();
    fs::write(input_dir.join("a.txt"), "between 5 and 10 apples").unwrap();
    fs::write(input_dir.join("b.txt"), "50% of $30").unwrap();

    let pattern = format!("{}/*.txt", input_dir.display());
    numrec(&home)
        .args(["batch", &pattern, "--summary", "--output-dir"])
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"));

    assert!(output_dir.join("a.json").exists());
    assert!(output_dir.join("b.json").exists());

    let summary = fs::read_to_string(output_dir.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,matches,number,ordinal,percentage,range,currency"));
    assert!(summary.contains("a.txt,success"));
    assert!(summary.contains("b.txt,success"));
}

#[test]
fn batch_continues_past_bad_files() {
    let home = TempDir::new().unwrap();
    let input_dir = home.path().join("in");
    fs::create_dir_all(&input_dir).unwrap();
    fs::write(input_dir.join("good.txt"), "twenty").unwrap();
    fs::write(input_dir.join("bad.txt"), [0xff, 0xfe, 0x00]).unwrap();

    let pattern = format!("{}/*.txt", input_dir.display());
    numrec(&home)
        .args(["batch", &pattern])
        .assert()
        .failure();

    numrec(&home)
        .args(["batch", &pattern, "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"))
        .stdout(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn cultures_lists_builtin_locales() {
    let home = TempDir::new().unwrap();
    numrec(&home)
        .arg("cultures")
        .assert()
        .success()
        .stdout(predicate::str::contains("en-us"))
        .stdout(predicate::str::contains("zh-cn"));
}

#[test]
fn config_init_set_and_get() {
    let home = TempDir::new().unwrap();
    numrec(&home).args(["config", "init"]).assert().success();

    numrec(&home)
        .args(["config", "set", "options.experimental_mode", "true"])
        .assert()
        .success();

    numrec(&home)
        .args(["config", "get", "options.experimental_mode"])
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));

    numrec(&home)
        .args(["config", "set", "options.no_such_key", "1"])
        .assert()
        .failure();
}

#[test]
fn explicit_config_file_sets_culture() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("numrec.json");
    fs::write(&config, r#"{"culture": "zh-cn"}"#).unwrap();

    numrec(&home)
        .arg("--config")
        .arg(&config)
        .args(["recognize", "二百三十五", "--kind", "number", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=> 235"));
}
