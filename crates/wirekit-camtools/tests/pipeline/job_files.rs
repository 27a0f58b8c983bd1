use std::io::Write;
use wirekit_camtools::{ToolpathError, WireCutGenerator, WireCutJob};
use wirekit_settings::Config;

const FOAM_BLOCK_JOB: &str = r#"{
    "segments": [
        { "type": "guide_lines", "kind": "rapid",
          "lines": [[[0, 0, -10], [0, 10, -10]]] },
        { "type": "rails",
          "curve_a": [[0, 0, 0], [5, 0, 5], [10, 0, 10]],
          "curve_b": [[0, 10, 0], [10, 10, 10]] },
        { "type": "single", "kind": "retract",
          "curve": [[10, 0, 20], [10, 10, 20]] }
    ]
}"#;

fn write_job(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_job_file_to_program() {
    let file = write_job(FOAM_BLOCK_JOB);
    let job = WireCutJob::load_from_file(file.path()).unwrap();
    assert_eq!(job.segments.len(), 3);

    let program = WireCutGenerator::new(Config::default()).generate(&job).unwrap();

    // Approach, three rail poses, retract.
    assert_eq!(program.table.len(), 5);
    assert_eq!(program.fallback_count, 0);
    assert_eq!(program.lines.first().map(String::as_str), Some("G92 X0 Y0 Z0 Q1=0"));
    assert_eq!(program.lines.last().map(String::as_str), Some("M02"));
    assert!(program.lines[1].starts_with("G00 "));
    // Entering the rails after a rapid states the feed once.
    assert!(program.lines[2].ends_with("F200"));
    assert!(!program.lines[3].contains('F'));
    assert!(program.lines[5].starts_with("G00 "));
}

#[test]
fn test_missing_job_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = WireCutJob::load_from_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ToolpathError::IoError(_)));
}

#[test]
fn test_incomplete_rails_segment() {
    let file = write_job(r#"{"segments":[{"type":"rails","curve_a":[[0,0,0],[1,0,1]]}]}"#);
    let err = WireCutJob::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ToolpathError::MissingInputField(ref field) if field == "curve_b"));
}
