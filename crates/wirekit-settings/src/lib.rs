//! WireKit Settings Crate
//!
//! Handles the run configuration: an explicit, enumerated struct whose
//! schema is declared once through `serde`, plus loading, saving and
//! validation of JSON and TOML documents.

pub mod config;
pub mod error;

pub use config::{Config, FlatteningSettings, PlaneSettings, REQUIRED_KEYS};
pub use error::{ConfigError, SettingsError, SettingsResult};
