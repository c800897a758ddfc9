use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use lsstap_core::{ByteSource, CsvFileSource, SourceError};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

#[test]
fn csv_source_reads_bytes_from_fixture() {
    let path = repo_root()
        .join("tests")
        .join("golden")
        .join("basic")
        .join("input.csv");
    let mut source = CsvFileSource::open(&path).unwrap();

    let mut bytes = 0;
    while let Some(_event) = source.next_byte().unwrap() {
        bytes += 1;
    }

    assert_eq!(bytes, 39);
}

#[test]
fn csv_source_rejects_malformed_file() {
    let mut path = std::env::temp_dir();
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("lsstap_malformed_{unique}.csv"));

    fs::write(&path, "0.0,0.1,35\nbroken line\n").unwrap();
    let mut source = CsvFileSource::open(&path).unwrap();
    source.next_byte().unwrap();
    let err = source.next_byte().unwrap_err();
    assert!(matches!(err, SourceError::Csv { line: 2, .. }));

    fs::remove_file(&path).ok();
}

#[test]
fn csv_source_missing_file_is_io_error() {
    let err = match CsvFileSource::open(&repo_root().join("tests").join("no_such.csv")) {
        Ok(_) => panic!("expected open to fail"),
        Err(err) => err,
    };
    assert!(matches!(err, SourceError::Io(_)));
}
