//! # WireKit
//!
//! Toolpath synthesis for 4-axis hot-wire foam cutters. A job's drive curves
//! are turned into wire poses (X, Y, Z and a rotary angle) and written out as
//! a positional instruction program.
//!
//! ## Architecture
//!
//! WireKit is organized as a workspace with multiple crates:
//!
//! 1. **wirekit-core** - Geometry primitives, precision rules, pose and motion table types
//! 2. **wirekit-settings** - Run configuration: schema, loading, validation
//! 3. **wirekit-camtools** - Angle solving, curve synchronisation, pose assembly, serialization
//! 4. **wirekit** - Command-line binary that integrates all crates

pub mod cli;

pub use wirekit_camtools::{
    CurveFlattener, IntersectionOracle, JobSegment, PlaneIntersection, Program, SegmentGeometry,
    ToolpathError, ToolpathResult, WireCutGenerator, WireCutJob,
};
pub use wirekit_core::{CutPlane, MotionTable, MoveKind, Point3, Polyline, Pose, Vector3};
pub use wirekit_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout for the generated program
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
