//! End-to-end: JSON rule file on disk → `Festival::get_festivals`.

use std::fs;
use std::path::Path;

use festival::{logging, Festival, FestivalConfig};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const RULES: &str = r#"{
  "solar": {
    "1": ["solar(m1:d1)=元旦"],
    "4": ["solar(m4:s345)=寒食节", "solar(m4:s456)=清明节"],
    "5": ["solar(m5:w2n1)=母亲节"],
    "6": ["solar(m6:w3n1)=父亲节"],
    "10": ["solar(m10:d1)=国庆节"],
    "11": ["solar(m11:w4n5)=感恩节"]
  },
  "lunar": {
    "1": ["lunar(m1:d1)=春节", "lunar(m1:d15)=元宵节"],
    "5": ["lunar(m5:d5)=端午节"],
    "7": ["lunar(m7:d7)=七夕"],
    "8": ["lunar(m8:d15)=中秋节"],
    "9": ["lunar(m9:d9)=重阳节"],
    "12": ["lunar(m12:d8)=腊八节", "lunar(m12:ld)=除夕"]
  }
}"#;

fn write_rules(dir: &Path, json: &str) -> FestivalConfig {
    let path = dir.join("festival.json");
    fs::write(&path, json).unwrap();
    FestivalConfig::new(path, "Asia/Shanghai")
}

fn festival() -> (TempDir, Festival) {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let config = write_rules(dir.path(), RULES);
    let festival = Festival::try_new(config).unwrap();
    (dir, festival)
}

#[test]
fn solar_festivals() {
    let (_dir, f) = festival();
    assert_eq!(f.get_festivals("2024-01-01"), ["元旦"]);
    assert_eq!(f.get_festivals("2024-04-03"), ["寒食节"]);
    assert_eq!(f.get_festivals("2024-04-04"), ["清明节"]);
    assert_eq!(f.get_festivals("2024-05-12"), ["母亲节"]);
    assert_eq!(f.get_festivals("2024-06-16"), ["父亲节"]);
    assert_eq!(f.get_festivals("2024-11-28"), ["感恩节"]);
    assert!(f.get_festivals("2024-04-05").is_empty());
}

#[test]
fn lunar_festivals() {
    let (_dir, f) = festival();
    assert_eq!(f.get_festivals("2024-02-10"), ["春节"]);
    assert_eq!(f.get_festivals("2024-02-24"), ["元宵节"]);
    assert_eq!(f.get_festivals("2024-06-10"), ["端午节"]);
    assert_eq!(f.get_festivals("2024-09-17"), ["中秋节"]);
    assert_eq!(f.get_festivals("2024-01-18"), ["腊八节"]);
}

#[test]
fn new_years_eve() {
    let (_dir, f) = festival();
    assert_eq!(f.get_festivals("2024-02-09"), ["除夕"]);
    assert!(f.get_festivals("2024-02-08").is_empty());
    assert_eq!(f.get_festivals("2025-01-28"), ["除夕"]);
}

#[test]
fn solar_results_precede_lunar_results() {
    let (_dir, f) = festival();
    assert_eq!(f.get_festivals("2020-10-01"), ["国庆节", "中秋节"]);
}

#[test]
fn invalid_entries_are_skipped() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let config = write_rules(
        dir.path(),
        r#"{
          "solar": {"1": ["solar(m1:d1)=New Year", "solar(m1:q1)=Bad", 5, "solar(m2:d1)=Misfiled"]},
          "lunar": {"12": ["lunar(m12:ld)=Eve", "solar(m12:d25)=Wrong Section"]}
        }"#,
    );
    let f = Festival::new(config);
    assert_eq!(f.resolver().rules().len(), 2);
    assert_eq!(f.get_festivals("2024-01-01"), ["New Year"]);
    assert!(f.get_festivals("2024-02-01").is_empty());
    assert!(f.get_festivals("2024-12-25").is_empty());
}

#[test]
fn malformed_rule_file_leaves_no_rules() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let config = write_rules(dir.path(), "{ not json");
    let f = Festival::new(config);
    assert!(f.resolver().rules().is_empty());
    assert!(f.get_festivals("2024-01-01").is_empty());
}

#[test]
fn bad_queries_return_nothing() {
    let (_dir, f) = festival();
    assert!(f.get_festivals("2024-13-01").is_empty());
    assert!(f.get_festivals("20240101").is_empty());

    let dir = tempfile::tempdir().unwrap();
    let config = write_rules(dir.path(), RULES).with_time_zone("Atlantis/Capital");
    let f = Festival::new(config);
    assert!(f.get_festivals("2024-01-01").is_empty());
}
