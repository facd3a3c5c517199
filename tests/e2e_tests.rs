//! End-to-end CLI tests for ayat.
//!
//! These tests exercise the full CLI binary with isolated test environments.
//! Each test creates its own data directory and config to ensure isolation.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Environment Helper
// =============================================================================

/// Isolated test environment with its own data directory and config.
struct TestEnv {
    _temp_dir: TempDir,
    data_path: PathBuf,
    config_path: PathBuf,
}

impl TestEnv {
    /// Create a new environment with an empty data directory.
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();

        let data_path = root.join("data");
        fs::create_dir_all(&data_path).expect("Failed to create data dir");

        // Create config pointing to the data directory
        let config_path = root.join("config.toml");
        let config_content = format!("[data]\npaths = [\"{}\"]\n", data_path.display());
        fs::write(&config_path, config_content).expect("Failed to write config");

        Self {
            _temp_dir: temp_dir,
            data_path,
            config_path,
        }
    }

    /// Create an environment with two translations and sura names.
    fn with_translations() -> Self {
        let env = Self::new();

        fs::write(
            env.data_path.join("majian.json"),
            r#"[
    {"sura": 1, "aya": 1, "text": "奉至仁至慈的真主之名"},
    {"sura": 1, "aya": 2, "text": "一切赞颂，全归真主，全世界的主"},
    {"sura": 24, "aya": 35, "text": "真主是天地的光明"}
]"#,
        )
        .expect("Failed to write majian corpus");

        fs::write(
            env.data_path.join("mazhonggang.json"),
            r#"[
    {"sura": 1, "aya": 1, "text": "奉普慈特慈的安拉之名"},
    {"sura": 24, "aya": 35, "text": "安拉是天地的光"}
]"#,
        )
        .expect("Failed to write mazhonggang corpus");

        fs::write(
            env.data_path.join("sura-names.json"),
            r#"{"1": "开端", "24": "光明"}"#,
        )
        .expect("Failed to write sura names");

        env
    }

    /// Get a Command configured for this test environment.
    fn command(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("ayat");
        cmd.env("AYAT_CONFIG", &self.config_path);
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Get the data path.
    fn data(&self) -> &PathBuf {
        &self.data_path
    }
}

// =============================================================================
// 1. Help / No Command Tests
// =============================================================================

#[test]
fn tc_1_1_no_subcommand_shows_help() {
    let env = TestEnv::new();

    env.command()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("sura"))
        .stdout(predicate::str::contains("translators"))
        .stdout(predicate::str::contains("worker"));
}

#[test]
fn tc_1_2_help_flag() {
    let env = TestEnv::new();

    env.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Search parallel Quran translations"));
}

#[test]
fn tc_1_3_version_flag() {
    let env = TestEnv::new();

    env.command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ayat"));
}

// =============================================================================
// 2. Search Command Tests
// =============================================================================

#[test]
fn tc_2_1_search_with_matches() {
    let env = TestEnv::with_translations();

    env.command()
        .args(["search", "天地"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## 24:35 光明"))
        .stdout(predicate::str::contains("**马坚:** 真主是**天地**的光明"))
        .stdout(predicate::str::contains("**马仲刚:** 安拉是**天地**的光"))
        .stdout(predicate::str::contains("2 match(es) in 1 verse(s)"));
}

#[test]
fn tc_2_2_search_with_no_matches() {
    let env = TestEnv::with_translations();

    env.command()
        .args(["search", "xyznonexistent123"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No matches found for 'xyznonexistent123'",
        ));
}

#[test]
fn tc_2_3_search_single_translator() {
    let env = TestEnv::with_translations();

    env.command()
        .args(["search", "天地", "-t", "majian"])
        .assert()
        .success()
        .stdout(predicate::str::contains("马坚"))
        .stdout(predicate::str::contains("马仲刚").not())
        .stdout(predicate::str::contains("1 match(es) in 1 verse(s)"));
}

#[test]
fn tc_2_4_search_marks_missing_translations() {
    let env = TestEnv::with_translations();

    env.command()
        .args(["search", "赞颂"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## 1:2 开端"))
        .stdout(predicate::str::contains(
            "**马仲刚:** [此章节在此译本中未找到]",
        ));
}

#[test]
fn tc_2_5_search_all_words_required() {
    let env = TestEnv::with_translations();

    env.command()
        .args(["search", "真主 光明"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## 24:35"))
        .stdout(predicate::str::contains("## 1:1").not());
}

#[test]
fn tc_2_6_search_empty_query() {
    let env = TestEnv::with_translations();

    env.command()
        .args(["search", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Query cannot be empty"));
}

#[test]
fn tc_2_7_search_query_too_long() {
    let env = TestEnv::with_translations();
    let long_query = "a".repeat(1001);

    env.command()
        .args(["search", &long_query])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too long"));
}

#[test]
fn tc_2_8_search_unknown_translator() {
    let env = TestEnv::with_translations();

    env.command()
        .args(["search", "天地", "--translator", "nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown translator: nobody"));
}

#[test]
fn tc_2_9_search_nonexistent_data_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");

    // Config points to non-existent path
    fs::write(&config_path, "[data]\npaths = [\"/nonexistent/path\"]").unwrap();

    cargo_bin_cmd!("ayat")
        .env("AYAT_CONFIG", &config_path)
        .args(["search", "光"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No translation data loaded"));
}

#[test]
fn tc_2_10_search_invalid_corpus_is_skipped() {
    let env = TestEnv::with_translations();

    // Corrupt one translation; the other still answers
    fs::write(env.data().join("mazhonggang.json"), "not valid json").unwrap();

    env.command()
        .args(["search", "天地"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 match(es) in 1 verse(s)"))
        .stderr(predicate::str::contains("mazhonggang"));
}

#[test]
fn tc_2_11_search_regex() {
    let env = TestEnv::with_translations();

    env.command()
        .args(["search", "/真主.*光/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## 24:35"))
        .stdout(predicate::str::contains("**真主是天地的光**明"));
}

#[test]
fn tc_2_12_search_invalid_regex_falls_back_to_words() {
    let env = TestEnv::with_translations();

    // Unbalanced group cannot compile, so the input is searched as words
    env.command()
        .args(["search", "/(天地/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matches found for '/(天地/'"));
}

#[test]
fn tc_2_13_search_json_output() {
    let env = TestEnv::with_translations();

    let output = env
        .command()
        .args(["search", "天地", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["query"], "天地");
    assert_eq!(json["records"].as_array().unwrap().len(), 2);
    // Records stay in scan order, which follows the configured translators
    assert_eq!(json["records"][0]["translator"], "马仲刚");
    assert_eq!(
        json["records"][0]["highlightedText"],
        "安拉是<mark>天地</mark>的光"
    );
    assert_eq!(json["records"][1]["translator"], "马坚");
    assert_eq!(
        json["records"][1]["highlightedText"],
        "真主是<mark>天地</mark>的光明"
    );
    assert_eq!(json["suraNames"]["24"], "光明");
}

// =============================================================================
// 3. Sura Command Tests
// =============================================================================

#[test]
fn tc_3_1_sura_side_by_side() {
    let env = TestEnv::with_translations();

    env.command()
        .args(["sura", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Sura 1 开端"))
        .stdout(predicate::str::contains("**马坚:** 奉至仁至慈的真主之名"))
        .stdout(predicate::str::contains("**马仲刚:** 奉普慈特慈的安拉之名"))
        .stdout(predicate::str::contains("**马仲刚:** [无]"));
}

#[test]
fn tc_3_2_sura_out_of_range() {
    let env = TestEnv::with_translations();

    env.command()
        .args(["sura", "115"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 114"));
}

#[test]
fn tc_3_3_sura_without_verses() {
    let env = TestEnv::with_translations();

    env.command()
        .args(["sura", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No verses found for sura 2"));
}

// =============================================================================
// 4. Translators Command Tests
// =============================================================================

#[test]
fn tc_4_1_translators_list() {
    let env = TestEnv::with_translations();

    env.command()
        .arg("translators")
        .assert()
        .success()
        .stdout(predicate::str::contains("- **majian** 马坚: 3 verses"))
        .stdout(predicate::str::contains("- **mazhonggang** 马仲刚: 2 verses"))
        .stdout(predicate::str::contains("- **wangjingzhai** 王静斋: no data"));
}

#[test]
fn tc_4_2_translators_from_config() {
    let env = TestEnv::with_translations();
    let config = format!(
        "[data]\npaths = [\"{}\"]\n\n[[translators]]\nkey = \"majian\"\nname = \"马坚\"\n",
        env.data().display()
    );
    fs::write(&env.config_path, config).unwrap();

    env.command()
        .arg("translators")
        .assert()
        .success()
        .stdout(predicate::str::contains("majian"))
        .stdout(predicate::str::contains("mazhonggang").not());
}

#[test]
fn tc_4_3_invalid_config() {
    let env = TestEnv::new();
    fs::write(&env.config_path, "[worker]\nqueue_depth = 0\n").unwrap();

    env.command()
        .arg("translators")
        .assert()
        .failure()
        .stderr(predicate::str::contains("queue_depth"));
}

// =============================================================================
// 5. Worker Mode Tests
// =============================================================================

#[test]
fn tc_5_1_worker_answers_search() {
    let env = TestEnv::new();
    let request = r#"{"type":"search","payload":{"query":"光","datasets":[{"key":"majian","name":"马坚","data":[{"sura":24,"aya":35,"text":"真主是天地的光明"}]}],"suraNames":{"24":"光明"}}}"#;

    env.command()
        .arg("worker")
        .write_stdin(format!("{request}\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type":"done""#))
        .stdout(predicate::str::contains(
            r#""highlightedText":"真主是天地的<mark>光</mark>明""#,
        ));
}

#[test]
fn tc_5_2_worker_missing_data_is_an_error() {
    let env = TestEnv::new();
    let request = r#"{"type":"search","payload":{"query":"光","datasets":[{"key":"majian"}]}}"#;

    env.command()
        .arg("worker")
        .write_stdin(format!("{request}\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type":"error""#))
        .stdout(predicate::str::contains(r#""type":"done""#).not());
}

#[test]
fn tc_5_3_worker_rejects_malformed_line() {
    let env = TestEnv::new();

    env.command()
        .arg("worker")
        .write_stdin("not json\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type":"error""#))
        .stdout(predicate::str::contains("Invalid request"));
}

#[test]
fn tc_5_4_worker_reports_progress_for_large_datasets() {
    let env = TestEnv::new();
    let records: Vec<String> = (1..=1_200)
        .map(|aya| format!(r#"{{"sura":2,"aya":{aya},"text":"verse {aya}"}}"#))
        .collect();
    let request = format!(
        r#"{{"type":"search","payload":{{"query":"verse 7","datasets":[{{"key":"k","name":"K","data":[{}]}}]}}}}"#,
        records.join(",")
    );

    let output = env
        .command()
        .arg("worker")
        .write_stdin(format!("{request}\n"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let lines: Vec<serde_json::Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let kinds: Vec<&str> = lines.iter().map(|l| l["type"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["progress", "progress", "done"]);
    assert_eq!(lines[0]["payload"]["loaded"], 500);
    assert_eq!(lines[1]["payload"]["loaded"], 1000);
    assert_eq!(lines[0]["payload"]["total"], 1200);
}
