//! Configuration for WireKit
//!
//! Provides the enumerated configuration of a synthesis run, file loading and
//! saving, and validation. Supports JSON and TOML documents.
//!
//! Configuration is organized into:
//! - Precision (tolerance and the absolute angle tolerance)
//! - Output format (motion prefixes, header/footer, axis labels, feed)
//! - Cut plane (the cutter's canonical frame)
//! - Curve flattening limits

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wirekit_core::{CutPlane, Point3, Precision, Vector3};

/// Keys that must be present in every configuration document.
pub const REQUIRED_KEYS: &[&str] = &[
    "tolerance",
    "cutting_speed",
    "rapid_prefix",
    "cut_prefix",
    "feed_prefix",
    "header",
    "footer",
    "axis_labels",
];

/// Reference plane of the cutter frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneSettings {
    /// Plane origin
    pub origin: [f64; 3],
    /// Direction of 0° tilt
    pub x_axis: [f64; 3],
    /// Direction of 90° tilt
    pub y_axis: [f64; 3],
}

impl PlaneSettings {
    /// Build the validated cut plane
    pub fn to_cut_plane(&self) -> SettingsResult<CutPlane> {
        let [ox, oy, oz] = self.origin;
        let [xx, xy, xz] = self.x_axis;
        let [yx, yy, yz] = self.y_axis;
        CutPlane::new(
            Point3::new(ox, oy, oz),
            Vector3::new(xx, xy, xz),
            Vector3::new(yx, yy, yz),
        )
        .map_err(|e| SettingsError::invalid("plane", e.to_string()))
    }
}

impl Default for PlaneSettings {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0, 0.0],
            x_axis: [1.0, 0.0, 0.0],
            y_axis: [0.0, 1.0, 0.0],
        }
    }
}

/// Limits handed to the curve flattener
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatteningSettings {
    /// Interior points turning less than this (degrees) may be merged; 0 keeps all
    pub angle_tolerance: f64,
    /// Points closer than this to their predecessor are dropped
    pub min_edge_length: f64,
    /// Upper bound on segments per flattened curve
    pub max_segments: usize,
}

impl Default for FlatteningSettings {
    fn default() -> Self {
        Self {
            angle_tolerance: 0.0,
            min_edge_length: 0.0,
            max_segments: 100_000,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Working tolerance; drives rounding, sync matching and deduplication
    pub tolerance: f64,
    /// Feed rate stated at the start of each cutting segment
    pub cutting_speed: u32,
    /// Prefix for non-cutting moves
    pub rapid_prefix: String,
    /// Prefix for cutting moves
    pub cut_prefix: String,
    /// Label placed before the feed rate
    pub feed_prefix: String,
    /// First line of every program
    pub header: String,
    /// Last line of every program
    pub footer: String,
    /// Labels for X, Y, Z and the rotary axis, in that order
    pub axis_labels: [String; 4],
    /// Absolute tolerance in degrees for quadrant matching
    #[serde(default = "default_angle_tolerance")]
    pub angle_tolerance: f64,
    /// Curve extension length; only zero is supported
    #[serde(default)]
    pub extension_length: f64,
    /// Cutter reference plane
    #[serde(default)]
    pub plane: PlaneSettings,
    /// Flattening limits
    #[serde(default)]
    pub flattening: FlatteningSettings,
}

fn default_angle_tolerance() -> f64 {
    1e-4
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            cutting_speed: 200,
            rapid_prefix: "G00".to_string(),
            cut_prefix: "G01".to_string(),
            feed_prefix: "F".to_string(),
            header: "G92 X0 Y0 Z0 Q1=0".to_string(),
            footer: "M02".to_string(),
            axis_labels: [
                "X".to_string(),
                "Y".to_string(),
                "Z".to_string(),
                "Q1=".to_string(),
            ],
            angle_tolerance: default_angle_tolerance(),
            extension_length: 0.0,
            plane: PlaneSettings::default(),
            flattening: FlatteningSettings::default(),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location (`<config dir>/wirekit/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wirekit").join("config.toml"))
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> SettingsResult<Self> {
        let table: toml::Table = toml::from_str(content)?;
        check_required(|key| table.contains_key(key))?;
        let config: Self = toml::Value::Table(table).try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(content: &str) -> SettingsResult<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let object = value.as_object().ok_or_else(|| {
            ConfigError::Corrupted("top-level JSON value must be an object".to_string())
        })?;
        check_required(|key| object.contains_key(key))?;
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config = match Format::from_path(path)? {
            Format::Json => Self::from_json_str(&content)?,
            Format::Toml => Self::from_toml_str(&content)?,
        };
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SettingsError::invalid("tolerance", "must be > 0"));
        }

        if self.cutting_speed == 0 {
            return Err(SettingsError::invalid("cutting_speed", "must be > 0"));
        }

        if !(self.angle_tolerance.is_finite() && self.angle_tolerance > 0.0) {
            return Err(SettingsError::invalid("angle_tolerance", "must be > 0"));
        }

        if let Some(index) = self.axis_labels.iter().position(|l| l.trim().is_empty()) {
            return Err(SettingsError::invalid(
                "axis_labels",
                format!("label {} is empty", index),
            ));
        }

        if !(self.extension_length.is_finite() && self.extension_length >= 0.0) {
            return Err(SettingsError::invalid("extension_length", "must be >= 0"));
        }

        let flattening = &self.flattening;
        if !(flattening.angle_tolerance.is_finite() && flattening.angle_tolerance >= 0.0) {
            return Err(SettingsError::invalid(
                "flattening.angle_tolerance",
                "must be >= 0",
            ));
        }
        if !(flattening.min_edge_length.is_finite() && flattening.min_edge_length >= 0.0) {
            return Err(SettingsError::invalid(
                "flattening.min_edge_length",
                "must be >= 0",
            ));
        }
        if flattening.max_segments == 0 {
            return Err(SettingsError::invalid(
                "flattening.max_segments",
                "must be > 0",
            ));
        }

        self.plane.to_cut_plane()?;

        Ok(())
    }

    /// Rounding precision derived from the tolerance
    pub fn precision(&self) -> Precision {
        Precision::from_tolerance(self.tolerance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )
            .into()),
        }
    }
}

fn check_required(has_key: impl Fn(&str) -> bool) -> SettingsResult<()> {
    match REQUIRED_KEYS.iter().find(|key| !has_key(**key)) {
        Some(key) => Err(ConfigError::MissingKey((*key).to_string()).into()),
        None => Ok(()),
    }
}
