use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

const RAW: &str = concat!(
    "\"Fach\",\"Autor/in\",\"Titel\",\"Typ\",\"Meldetag\",\"Punktzahl\",\" ZahlOldenburgerAutoren\",\"Jahr\"\n",
    "\"%fach%\",\"%autor%\",\"%titel%\",\"%typ%\",\"%tag%\",\"%punkte%\",\"%zahl%\",\"%jahr%\"\n",
    "\"Informatik\",\"Doe, J.\",\"Efficient Parsing of Bibliographic Records (12 S.)\",\"Aufsatz\",\"2016-01-01\",\"5\",\"1\",\"2016\"\n",
    "\"Physik\",\"Roe, R.\",\"Quantum Measurements\",\"Monographie\",\"2015-03-02\",\"3\",\"2\",\"2015\"\n",
);

const CLEANED: &str = concat!(
    "\"Fach\",\"Autor/in\",\"Titel\",\"Jahr\"\n",
    "\"Informatik\",\"Doe, J.\",\"Known Title\",\"2016\"\n",
    "\"Physik\",\"Roe, R.\",\"Unknown Title\",\"2015\"\n",
);

fn uolbib(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_uolbib"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("Failed to run uolbib")
}

#[test]
fn test_help() {
    let dir = tempdir().unwrap();
    for command in ["crawl", "clean", "cite", "summarize"] {
        let output = uolbib(&[command, "--help"], dir.path());
        assert!(output.status.success(), "{} --help should succeed", command);
    }
}

#[test]
fn test_cite_rejects_unknown_action() {
    let dir = tempdir().unwrap();

    let output = uolbib(&["cite", "--action", "FETCH", "--log-level", "OFF"], dir.path());

    assert!(output.status.success(), "Unknown action should still exit with 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FETCH"));
    assert!(stdout.contains("CRAWL, MERGE"));
    assert!(!dir.path().join("citations").exists(), "Nothing should be created");
    assert!(!dir.path().join("logs").exists(), "Nothing should be logged");
}

#[test]
fn test_clean_end_to_end() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("raw.csv"), RAW).unwrap();

    let output = uolbib(
        &["clean", "--input", "raw.csv", "--output", "clean.csv", "--log-level", "OFF"],
        dir.path(),
    );
    assert!(output.status.success(), "clean should succeed");

    let csv = fs::read_to_string(dir.path().join("clean.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3, "Header plus two data rows");
    assert!(lines[0].starts_with("\"Fach\",\"Autor/in\",\"Titel\",\"Seiten\",\"Sprache\""));

    let first: Vec<&str> = lines[1].trim_matches('"').split("\",\"").collect();
    assert_eq!(first.len(), 11);
    assert_eq!(first[2], "Efficient Parsing of Bibliographic Records");
    assert_eq!(first[3], "12");
    assert_eq!(first[5], "5");
    assert_eq!(first[6], "Aufsatz");

    let second: Vec<&str> = lines[2].trim_matches('"').split("\",\"").collect();
    assert_eq!(second[2], "Quantum Measurement");
    assert_eq!(second[3], "Quantum Measureme");
    assert_eq!(second[5], "2");
}

#[test]
fn test_commands_write_host_log_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("raw.csv"), RAW).unwrap();

    let output = uolbib(
        &["clean", "--input", "raw.csv", "--output", "clean.csv", "--logs-dir", "run-logs"],
        dir.path(),
    );
    assert!(output.status.success(), "clean should succeed");

    let logs: Vec<String> = fs::read_dir(dir.path().join("run-logs"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].ends_with("-root.log"));

    let log = fs::read_to_string(dir.path().join("run-logs").join(&logs[0])).unwrap();
    assert!(log.contains("Start with cleaning"));
}

#[test]
fn test_clean_inconsistent_input_writes_nothing() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("raw.csv"),
        format!("{}\"Informatik\",\"Doe, J.\",\"Short row\"\n", RAW),
    )
    .unwrap();

    let output = uolbib(
        &["clean", "--input", "raw.csv", "--output", "clean.csv", "--log-level", "OFF"],
        dir.path(),
    );
    assert!(output.status.success());
    assert!(!dir.path().join("clean.csv").exists());
}

#[test]
fn test_cite_merge_marks_missing_citations() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("cleaned.csv"), CLEANED).unwrap();
    fs::create_dir(dir.path().join("citations")).unwrap();
    fs::write(
        dir.path().join("citations").join("citations-db.json"),
        r#"{"Known Title": {"CR": {"source": "CR", "value": 3}, "GS": {"source": "GS", "value": 7}}}"#,
    )
    .unwrap();

    let output = uolbib(
        &[
            "cite", "--input", "cleaned.csv", "--action", "MERGE", "--output", "merged.csv",
            "--log-level", "OFF",
        ],
        dir.path(),
    );
    assert!(output.status.success(), "MERGE should succeed");

    let csv = fs::read_to_string(dir.path().join("merged.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "\"Fach\",\"Autor/in\",\"Titel\",\"Jahr\",\"ZitationenGS\",\"ZitationenCR\"",
            "\"Informatik\",\"Doe, J.\",\"Known Title\",\"2016\",\"7\",\"3\"",
            "\"Physik\",\"Roe, R.\",\"Unknown Title\",\"2015\",\"-1\",\"-1\"",
        ]
    );
}

#[test]
fn test_cite_crawl_with_complete_store_sends_no_queries() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("cleaned.csv"), CLEANED).unwrap();

    let store_dir = dir.path().join("store");
    fs::create_dir(&store_dir).unwrap();
    let store = concat!(
        "{\n",
        "  \"Known Title\": {\n",
        "    \"CR\": {\n      \"source\": \"CR\",\n      \"value\": 3\n    },\n",
        "    \"GS\": {\n      \"source\": \"GS\",\n      \"value\": 7\n    }\n",
        "  },\n",
        "  \"Unknown Title\": {\n",
        "    \"CR\": {\n      \"source\": \"CR\",\n      \"value\": 0\n    },\n",
        "    \"GS\": {\n      \"source\": \"GS\",\n      \"value\": 0\n    }\n",
        "  }\n",
        "}",
    );
    let store_path = store_dir.join("citations-db.json");
    fs::write(&store_path, store).unwrap();

    let output = uolbib(
        &[
            "cite", "--input", "cleaned.csv", "--citations-dir", "store", "--timeout", "1",
            "--log-level", "OFF",
        ],
        dir.path(),
    );
    assert!(output.status.success(), "CRAWL should succeed");

    let reloaded: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&store_path).unwrap()).unwrap();
    let original: serde_json::Value = serde_json::from_str(store).unwrap();
    assert_eq!(reloaded, original);
}

#[test]
fn test_crawl_without_urls_writes_empty_merged_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("urls.txt"),
        "# Informatik\n\n# https://example.org/commented-out\nnot a url\n",
    )
    .unwrap();

    let output = uolbib(
        &[
            "crawl", "--urlfile", "urls.txt", "--mergedata", "--work-dir", "work", "--log-level",
            "OFF",
        ],
        dir.path(),
    );
    assert!(output.status.success(), "crawl should succeed");

    let merged = fs::read_to_string(dir.path().join("work").join("uolbibliography-merged.csv")).unwrap();
    assert_eq!(
        merged,
        "\"Fach\",\"Autor/in\",\"Titel\",\"Typ\",\"Meldetag\",\"Punktzahl\",\" ZahlOldenburgerAutoren\",\"Jahr\"\n"
    );
}

#[test]
fn test_crawl_missing_url_file_fails() {
    let dir = tempdir().unwrap();

    let output = uolbib(
        &["crawl", "--urlfile", "missing.txt", "--work-dir", "work", "--log-level", "OFF"],
        dir.path(),
    );
    assert!(!output.status.success());
}

#[test]
fn test_summarize_end_to_end() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("cleaned.csv"),
        format!("{}\"Informatik\",\"Doe, J.\",\"Another Title\",\"2016\"\n", CLEANED),
    )
    .unwrap();

    let output = uolbib(
        &[
            "summarize", "--input", "cleaned.csv", "--plots-dir", "tables", "--top-authors", "1",
            "--log-level", "OFF",
        ],
        dir.path(),
    );
    assert!(output.status.success(), "summarize should succeed");

    let tables = dir.path().join("tables");
    assert_eq!(
        fs::read_to_string(tables.join("by-field-and-year.csv")).unwrap(),
        "Fach,Jahr,Publikationen\nInformatik,2016,2\nPhysik,2015,1\n"
    );
    assert_eq!(
        fs::read_to_string(tables.join("top-k-authors.csv")).unwrap(),
        "Autor/in,Publikationen\n\"Doe, J.\",2\n"
    );
    assert_eq!(
        fs::read_to_string(tables.join("articles-per-author.csv")).unwrap(),
        "Publikationen,Autoren\n1,1\n2,1\n"
    );
}
