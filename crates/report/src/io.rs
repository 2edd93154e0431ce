// Copyright 2025 gwbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! I/O operations for reports and result records.
//!
//! This module reads raw wrk reports, writes result records next to them,
//! and loads a results directory into a [`ResultSet`].

use crate::aggregate::ResultSet;
use crate::error::{ReportError, Result};
use crate::extract::parse_report;
use crate::record::ResultRecord;
use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Extension of raw wrk reports.
pub const REPORT_EXTENSION: &str = ".txt";

/// Extension of result record files.
pub const RECORD_EXTENSION: &str = "json";

/// Path of the JSON record written for a report.
///
/// A trailing `.txt` is replaced by `.json`; any other file name gets `.json`
/// appended so the report itself is never overwritten.
pub fn json_path_for(report: impl AsRef<Path>) -> PathBuf {
    let report = report.as_ref();
    let Some(name) = report.file_name().and_then(|n| n.to_str()) else {
        let mut name = report.as_os_str().to_owned();
        name.push(".json");
        return PathBuf::from(name);
    };

    let stem = name.strip_suffix(REPORT_EXTENSION).unwrap_or(name);
    report.with_file_name(format!("{}.{}", stem, RECORD_EXTENSION))
}

/// Read a wrk report and extract its result record.
pub fn extract_file(report: impl AsRef<Path>, gateway: &str, case: &str) -> Result<ResultRecord> {
    let report = report.as_ref();
    let content = fs::read_to_string(report).map_err(|source| ReportError::ReadReport {
        path: report.to_path_buf(),
        source,
    })?;
    Ok(parse_report(&content, gateway, case))
}

/// Serialize a record as 2-space indented JSON.
pub fn record_to_json(record: &ResultRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Write a record as pretty JSON to `path`.
pub fn write_record(record: &ResultRecord, path: impl AsRef<Path>) -> Result<()> {
    let json = record_to_json(record)?;
    write_output(path, json)
}

/// Write rendered output (JSON or Markdown) to `path`.
pub fn write_output(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, contents).map_err(|source| ReportError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a single result record file.
pub fn read_record(path: impl AsRef<Path>) -> Result<ResultRecord> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ReportError::ReadRecord {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_error = |source: serde_json::Error| {
        if source.is_io() {
            ReportError::ReadRecord {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            ReportError::ParseRecord {
                path: path.to_path_buf(),
                source,
            }
        }
    };

    // Going through `Value` keeps the last value of a repeated key.
    let value: serde_json::Value =
        serde_json::from_reader(BufReader::new(file)).map_err(parse_error)?;
    serde_json::from_value(value).map_err(parse_error)
}

/// List `*.json` files directly inside `dir`, sorted by file name.
///
/// Hidden files are skipped. A missing directory yields an empty list.
pub fn list_result_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let read_dir_error = |source: io::Error| ReportError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(dir = %dir.display(), "results directory does not exist");
            return Ok(Vec::new());
        }
        Err(e) => return Err(read_dir_error(e)),
    };

    let mut files: Vec<(OsString, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(read_dir_error)?;
        let name = entry.file_name();
        if is_hidden(&name) {
            continue;
        }
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == RECORD_EXTENSION) {
            files.push((name, path));
        }
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_str().map_or(false, |n| n.starts_with('.'))
}

/// Load every result record in `dir` into a [`ResultSet`].
///
/// Files that cannot be read or parsed are logged and skipped. Records
/// missing a gateway or case are dropped without a log entry.
pub fn load_results(dir: impl AsRef<Path>) -> Result<ResultSet> {
    let mut results = ResultSet::new();

    for path in list_result_files(dir)? {
        match read_record(&path) {
            Ok(record) => {
                if record.is_identified() {
                    debug!(
                        path = %path.display(),
                        gateway = %record.gateway,
                        case = %record.case,
                        "loaded result record"
                    );
                }
                results.insert(record);
            }
            Err(e) => {
                let cause = std::error::Error::source(&e)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                error!(path = %path.display(), error = %e, cause = %cause, "skipping result file");
            }
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Latency;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_json_path_replaces_txt_suffix() {
        assert_eq!(
            json_path_for("results/homebrew_small.txt"),
            PathBuf::from("results/homebrew_small.json")
        );
        assert_eq!(json_path_for("run.txt"), PathBuf::from("run.json"));
    }

    #[test]
    fn test_json_path_appends_for_other_names() {
        assert_eq!(json_path_for("results/run.log"), PathBuf::from("results/run.log.json"));
        assert_eq!(json_path_for("results/run"), PathBuf::from("results/run.json"));
    }

    #[test]
    fn test_json_path_only_touches_file_name() {
        assert_eq!(
            json_path_for("out.txt.d/run.txt"),
            PathBuf::from("out.txt.d/run.json")
        );
    }

    #[test]
    fn test_extract_file_reads_report() {
        let tmp = TempDir::new().unwrap();
        let report = write(
            tmp.path(),
            "envoy_small.txt",
            "  Latency Distribution\n     50%    1.10ms\nRequests/sec:   1234.50\n",
        );

        let record = extract_file(&report, "envoy", "small").unwrap();
        assert_eq!(record.gateway, "envoy");
        assert_eq!(record.case, "small");
        assert_eq!(record.rps, 1234.50);
        assert_eq!(record.latency.p50, Some(1.10));
    }

    #[test]
    fn test_extract_missing_report_fails() {
        let tmp = TempDir::new().unwrap();
        let err = extract_file(tmp.path().join("missing.txt"), "g", "c").unwrap_err();
        assert!(matches!(err, ReportError::ReadReport { .. }));
    }

    #[test]
    fn test_write_then_read_record() {
        let tmp = TempDir::new().unwrap();
        let record = ResultRecord {
            gateway: "nginx".to_string(),
            case: "large-body".to_string(),
            rps: 812.5,
            latency: Latency {
                p50: Some(3.25),
                p90: None,
                p99: Some(40.0),
            },
        };
        let path = tmp.path().join("nginx_large-body.json");

        write_record(&record, &path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("{\n  \"gateway\": \"nginx\""));
        assert_eq!(read_record(&path).unwrap(), record);
    }

    #[test]
    fn test_read_record_reports_invalid_json() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "broken.json", "{ not json");
        let err = read_record(&path).unwrap_err();
        assert!(matches!(err, ReportError::ParseRecord { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_list_result_files_filters_and_sorts() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b.json", "{}");
        write(tmp.path(), "a.json", "{}");
        write(tmp.path(), "a.txt", "");
        write(tmp.path(), ".hidden.json", "{}");
        write(tmp.path(), "c.json.bak", "{}");
        fs::create_dir(tmp.path().join("nested")).unwrap();
        write(&tmp.path().join("nested"), "d.json", "{}");

        let names: Vec<String> = list_result_files(tmp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let results = load_results(tmp.path().join("absent")).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_empty_directory_loads_nothing() {
        let tmp = TempDir::new().unwrap();
        assert!(load_results(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_load_skips_corrupt_and_unidentified_files() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "bad.json", "{\"gateway\": ");
        write(tmp.path(), "anon.json", r#"{"case": "A", "rps": 9.0}"#);
        write(
            tmp.path(),
            "good.json",
            r#"{"gateway": "x", "case": "A", "rps": 42.0, "latency": {"p50": 1.5}}"#,
        );

        let results = load_results(tmp.path()).unwrap();
        assert_eq!(results.len(), 1);
        let record = results.get("A", "x").unwrap();
        assert_eq!(record.rps, 42.0);
        assert_eq!(record.latency.p50, Some(1.5));
    }

    #[test]
    fn test_duplicates_resolve_in_file_name_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "2-rerun.json", r#"{"gateway": "x", "case": "A", "rps": 2.0}"#);
        write(tmp.path(), "1-first.json", r#"{"gateway": "x", "case": "A", "rps": 1.0}"#);

        let results = load_results(tmp.path()).unwrap();
        assert_eq!(results.get("A", "x").map(|r| r.rps), Some(2.0));
    }

    #[test]
    fn test_corrupt_file_is_logged_and_unidentified_is_silent() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "bad.json", "{\"gateway\": ");
        write(tmp.path(), "anon.json", r#"{"case": "A", "rps": 9.0}"#);
        write(tmp.path(), "good.json", r#"{"gateway": "x", "case": "A", "rps": 42.0}"#);

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();

        let results =
            tracing::subscriber::with_default(subscriber, || load_results(tmp.path())).unwrap();
        assert_eq!(results.len(), 1);

        let output = logs.contents();
        let bad_lines: Vec<&str> = output.lines().filter(|l| l.contains("bad.json")).collect();
        assert_eq!(bad_lines.len(), 1);
        assert!(bad_lines[0].contains("ERROR"));
        assert!(bad_lines[0].contains("skipping result file"));
        assert!(!output.contains("anon.json"));
        assert!(output.contains("good.json"));
    }

    #[test]
    fn test_repeated_key_keeps_last_value() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            tmp.path(),
            "dup.json",
            r#"{"gateway": "x", "case": "A", "rps": 1, "rps": 2}"#,
        );

        let record = read_record(&path).unwrap();
        assert_eq!(record.rps, 2.0);

        let results = load_results(tmp.path()).unwrap();
        assert_eq!(results.get("A", "x").map(|r| r.rps), Some(2.0));
    }

    #[test]
    fn test_wrong_field_type_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "typed.json", r#"{"gateway": "x", "case": "A", "rps": "fast"}"#);
        let err = read_record(&path).unwrap_err();
        assert!(matches!(err, ReportError::ParseRecord { .. }));
    }
}
