//! Integration tests for the full extraction pipeline.
//!
//! These run the runner and the text report against the testdata fixtures.

use std::path::PathBuf;

use visionscan::config::Config;
use visionscan::error::FileErrorKind;
use visionscan::report;
use visionscan::runner::{collect_files, ExtractionResult, Runner};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn run_testdata(parallel: bool) -> ExtractionResult {
    let testdata = testdata_path();
    let config = Config::parse_file(testdata.join("visionscan.yaml")).expect("should parse config");
    let files = collect_files(&testdata, &config).expect("should collect files");
    Runner::new(&testdata).parallel(parallel).run(&files)
}

fn text(result: &ExtractionResult) -> String {
    let mut out = Vec::new();
    report::write_text(&mut out, result).expect("text report should render");
    String::from_utf8(out).expect("text report is utf-8")
}

#[test]
fn test_files_scanned_in_path_order() {
    let result = run_testdata(true);
    let paths: Vec<_> = result.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["bank/account.vis", "broken.vis", "shapes.vis"]);
}

#[test]
fn test_text_output_for_fixtures() {
    let result = run_testdata(true);
    assert_eq!(
        text(&result),
        "\
File is in package: pkg.sample
Class Name: Account
Class Account has argument owner with type String
Class Account has argument balance with type Int
Class Account has function deposit
Class Account has function withdraw
Interface Name: Ledger
File is in package: geometry
Interface Name: Shape
Class Name: Canvas
Class Canvas has argument shapes with type List<Shape>
Class Canvas has argument size with type Map<String,Int>?
Class Canvas has argument pixels with type Int[][]
Class Canvas has function draw
"
    );
}

#[test]
fn test_broken_file_is_reported_not_emitted() {
    let result = run_testdata(false);
    assert_eq!(result.failed(), 1);

    let broken = result
        .files
        .iter()
        .find(|f| f.path == "broken.vis")
        .expect("broken.vis should be scanned");
    assert!(broken.declarations().is_empty());

    let err = broken.error().expect("broken.vis should fail");
    assert!(matches!(err.kind, FileErrorKind::Syntax(_)));
    assert!(
        err.to_string().starts_with("broken.vis:8:1: syntax error: unclosed '{'"),
        "unexpected message: {}",
        err
    );
}

#[test]
fn test_parallel_and_sequential_reports_match() {
    let parallel = run_testdata(true);
    let sequential = run_testdata(false);
    assert_eq!(text(&parallel), text(&sequential));

    let mut a = Vec::new();
    let mut b = Vec::new();
    report::write_json(&mut a, "testdata", &parallel).unwrap();
    report::write_json(&mut b, "testdata", &sequential).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_excluded_directory_is_skipped() {
    let result = run_testdata(true);
    assert!(result.files.iter().all(|f| !f.path.starts_with("generated/")));

    // Without the config the generated file is picked up
    let testdata = testdata_path();
    let files = collect_files(&testdata, &Config::default()).unwrap();
    assert!(files.iter().any(|f| f.ends_with("generated/stub.vis")));
}
