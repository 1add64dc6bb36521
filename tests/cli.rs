use std::error::Error;
use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

#[test]
fn test_cli_with_prefix() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let prefix = dir.path().join("mixed");

    Command::cargo_bin("bluebase")?
        .arg("tests/data/mixed.fasta")
        .arg("-p")
        .arg(&prefix)
        .assert()
        .success()
        .stderr(predicate::str::contains("Analyzed 5 sequences x 12 columns"));

    let table = fs::read_to_string(dir.path().join("mixed.txt"))?;
    assert_eq!(table, fs::read_to_string("tests/data/mixed.txt")?);
    let summary = fs::read_to_string(dir.path().join("mixed_gapStat.log"))?;
    assert_eq!(summary, fs::read_to_string("tests/data/mixed_gapStat.log")?);
    Ok(())
}

#[test]
fn test_cli_with_explicit_paths() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let table = dir.path().join("columns.tsv");
    let summary = dir.path().join("summary.log");

    Command::cargo_bin("bluebase")?
        .arg("tests/data/mixed.fasta")
        .arg("--align-stat")
        .arg(&table)
        .arg("--gap-stat")
        .arg(&summary)
        .assert()
        .success();

    assert!(table.exists());
    assert!(fs::read_to_string(&summary)?.contains("Blue base ratio :0.7916666666666666"));
    Ok(())
}

#[test]
fn test_cli_requires_outputs() -> Result<(), Box<dyn Error>> {
    Command::cargo_bin("bluebase")?
        .arg("tests/data/mixed.fasta")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--prefix"));
    Ok(())
}

#[test]
fn test_cli_missing_input() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let prefix = dir.path().join("out");

    Command::cargo_bin("bluebase")?
        .arg(dir.path().join("absent.fasta"))
        .arg("-p")
        .arg(&prefix)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to compute statistics"));

    assert!(!dir.path().join("out.txt").exists());
    Ok(())
}

#[test]
fn test_cli_rejects_unequal_lengths() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("ragged.fasta");
    fs::write(&input, ">a\nACGT\n>b\nAC\n")?;

    Command::cargo_bin("bluebase")?
        .arg(&input)
        .arg("-p")
        .arg(dir.path().join("out"))
        .assert()
        .failure();

    assert!(!dir.path().join("out_gapStat.log").exists());
    Ok(())
}

#[test]
fn test_cli_help_has_no_author() -> Result<(), Box<dyn Error>> {
    assert!(env!("CARGO_PKG_AUTHORS").is_empty());

    Command::cargo_bin("bluebase")?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--prefix"))
        .stdout(predicate::str::contains("Ranwez").not());
    Ok(())
}

#[test]
fn test_cli_logs_load_once() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;

    let output = Command::cargo_bin("bluebase")?
        .arg("-vv")
        .arg("tests/data/mixed.fasta")
        .arg("-p")
        .arg(dir.path().join("out"))
        .output()?;
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr)?;
    assert_eq!(stderr.matches("Loaded 5 sequences x 12 columns").count(), 1);
    assert!(stderr.contains("Blue bases:"));
    Ok(())
}
