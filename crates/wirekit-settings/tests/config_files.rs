use std::io::Write;
use wirekit_settings::{Config, ConfigError, SettingsError};

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_toml_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cutter.toml");

    let mut config = Config::default();
    config.tolerance = 0.001;
    config.cutting_speed = 350;
    config.axis_labels[3] = "A".to_string();
    config.flattening.min_edge_length = 0.05;
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.precision().decimals(), 3);
}

#[test]
fn test_json_file_with_optional_fields_omitted() {
    let file = write_temp(
        ".json",
        r#"{
            "tolerance": 0.1,
            "cutting_speed": 120,
            "rapid_prefix": "G0",
            "cut_prefix": "G1",
            "feed_prefix": "F",
            "header": "G92 X0 Y0 Z0 A0",
            "footer": "M30",
            "axis_labels": ["X", "Y", "Z", "A"]
        }"#,
    );

    let config = Config::load_from_file(file.path()).unwrap();
    assert_eq!(config.cutting_speed, 120);
    assert_eq!(config.angle_tolerance, 1e-4);
    assert_eq!(config.extension_length, 0.0);
    assert_eq!(config.plane, Default::default());
    assert_eq!(config.precision().decimals(), 1);
}

#[test]
fn test_missing_required_key_is_reported() {
    let file = write_temp(
        ".toml",
        r#"
tolerance = 0.01
cutting_speed = 200
rapid_prefix = "G00"
cut_prefix = "G01"
feed_prefix = "F"
header = "G92"
axis_labels = ["X", "Y", "Z", "Q1="]
"#,
    );

    let err = Config::load_from_file(file.path()).unwrap_err();
    assert_eq!(err.missing_key(), Some("footer"));
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::MissingKey(_))
    ));
}

#[test]
fn test_invalid_value_in_file() {
    let file = write_temp(
        ".toml",
        r#"
tolerance = -1.0
cutting_speed = 200
rapid_prefix = "G00"
cut_prefix = "G01"
feed_prefix = "F"
header = "G92"
footer = "M02"
axis_labels = ["X", "Y", "Z", "Q1="]
"#,
    );

    let err = Config::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidSetting { ref key, .. } if key == "tolerance"));
}

#[test]
fn test_unsupported_extension() {
    let file = write_temp(".yaml", "tolerance: 0.01");
    let err = Config::load_from_file(file.path()).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::UnsupportedFormat(_))
    ));
}
