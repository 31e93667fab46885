use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const UNSORTED: &str = "import { StyleSheet } from 'react-native';\n\nexport const styles = StyleSheet.create({\n  b: { margin: 0 },\n  a: { padding: 0 },\n});\n";
const SORTED: &str = "import { StyleSheet } from 'react-native';\n\nexport const styles = StyleSheet.create({\n  a: { padding: 0 },\n  b: { margin: 0 },\n});\n";

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_check_reports_violations() {
    let temp_dir = tempdir().unwrap();
    write(temp_dir.path(), "styles.js", UNSORTED);

    cargo_bin_cmd!("rnlint")
        .current_dir(temp_dir.path())
        .args(["check", "--no-config", "--color=never", "styles.js"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "styles.js:5:3: [sort-styles] Expected class names to be in ascending order. 'a' should be before 'b'. [*]",
        ))
        .stdout(predicate::str::contains("Found 1 issue in 1 file"));
}

#[test]
fn test_check_clean_file_exits_zero() {
    let temp_dir = tempdir().unwrap();
    write(temp_dir.path(), "styles.js", SORTED);

    cargo_bin_cmd!("rnlint")
        .current_dir(temp_dir.path())
        .args(["check", "--no-config", "--color=never", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found in 1 file"));
}

#[test]
fn test_check_fix_rewrites_file() {
    let temp_dir = tempdir().unwrap();
    write(temp_dir.path(), "styles.js", UNSORTED);

    cargo_bin_cmd!("rnlint")
        .current_dir(temp_dir.path())
        .args(["check", "--no-config", "--fix", "styles.js"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(temp_dir.path().join("styles.js")).unwrap(), SORTED);
}

#[test]
fn test_fmt_exits_zero_and_sorts() {
    let temp_dir = tempdir().unwrap();
    write(temp_dir.path(), "src/styles.ts", UNSORTED);

    cargo_bin_cmd!("rnlint")
        .current_dir(temp_dir.path())
        .args(["fmt", "--no-config", "src"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(temp_dir.path().join("src/styles.ts")).unwrap(), SORTED);
}

#[test]
fn test_json_output() {
    let temp_dir = tempdir().unwrap();
    write(temp_dir.path(), "styles.js", UNSORTED);

    let output = cargo_bin_cmd!("rnlint")
        .current_dir(temp_dir.path())
        .args(["check", "--no-config", "--output", "json", "styles.js"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["file"], "styles.js");
    assert_eq!(parsed[0]["line"], 5);
    assert_eq!(parsed[0]["column"], 3);
    assert_eq!(parsed[0]["rule"], "sort-styles");
}

#[test]
fn test_stdin_check_and_fix() {
    cargo_bin_cmd!("rnlint")
        .args(["check", "--no-config", "--color=never", "--stdin"])
        .write_stdin(UNSORTED)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("<stdin>:5:3: [sort-styles]"));

    cargo_bin_cmd!("rnlint")
        .args(["check", "--no-config", "--stdin", "--fix"])
        .write_stdin(UNSORTED)
        .assert()
        .success()
        .stdout(SORTED);
}

#[test]
fn test_stdin_filename_selects_dialect() {
    let content = "const s = StyleSheet.create({ b: {} as Style, a: {} });\n";

    cargo_bin_cmd!("rnlint")
        .args(["check", "--no-config", "--stdin", "--stdin-filename", "styles.ts", "--fix"])
        .write_stdin(content)
        .assert()
        .success()
        .stdout("const s = StyleSheet.create({ a: {}, b: {} as Style });\n");
}

#[test]
fn test_parse_error_is_a_tool_error() {
    let temp_dir = tempdir().unwrap();
    write(temp_dir.path(), "broken.js", "StyleSheet.create({ a: {} ;\n");
    write(temp_dir.path(), "styles.js", SORTED);

    cargo_bin_cmd!("rnlint")
        .current_dir(temp_dir.path())
        .args(["check", "--no-config", "--color=never", "."])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("broken.js"))
        .stderr(predicate::str::contains("Parsing error"));
}

#[test]
fn test_config_file_is_discovered() {
    let temp_dir = tempdir().unwrap();
    write(
        temp_dir.path(),
        ".rnlint.toml",
        "[global]\nexclude = [\"generated\"]\n\n[sort-styles]\norder = \"desc\"\n",
    );
    write(temp_dir.path(), "generated/styles.js", UNSORTED);
    write(temp_dir.path(), "styles.js", "StyleSheet.create({ b: {}, a: {} });\n");

    cargo_bin_cmd!("rnlint")
        .current_dir(temp_dir.path())
        .args(["check", "--color=never", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found in 1 file"));
}

#[test]
fn test_exclude_flag() {
    let temp_dir = tempdir().unwrap();
    write(temp_dir.path(), "legacy/styles.js", UNSORTED);

    cargo_bin_cmd!("rnlint")
        .current_dir(temp_dir.path())
        .args(["check", "--no-config", "--exclude", "legacy", "."])
        .assert()
        .success();
}

#[test]
fn test_unknown_config_key_warns() {
    let temp_dir = tempdir().unwrap();
    write(temp_dir.path(), ".rnlint.toml", "[sort-styles]\nordr = \"desc\"\n");
    write(temp_dir.path(), "styles.js", SORTED);

    cargo_bin_cmd!("rnlint")
        .current_dir(temp_dir.path())
        .args(["check", "--color=never", "."])
        .assert()
        .success()
        .stderr(predicate::str::contains("[config warning]"))
        .stderr(predicate::str::contains("ordr"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = tempdir().unwrap();

    cargo_bin_cmd!("rnlint")
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created default configuration file"));

    let content = fs::read_to_string(temp_dir.path().join(".rnlint.toml")).unwrap();
    assert!(content.contains("[global]"));
    assert!(content.contains("[sort-styles]"));

    cargo_bin_cmd!("rnlint")
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_rule_command_lists_sort_styles() {
    cargo_bin_cmd!("rnlint")
        .args(["rule", "--no-config", "--color=never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sort-styles"));

    cargo_bin_cmd!("rnlint")
        .args(["rule", "--no-config", "no-such-rule"])
        .assert()
        .code(2);
}
