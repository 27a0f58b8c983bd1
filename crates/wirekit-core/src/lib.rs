//! # WireKit Core
//!
//! Core types and utilities for WireKit.
//! Provides the geometry primitives shared by the synthesis engine
//! (points, vectors, cut planes, polylines), decimal precision helpers,
//! and the motion data model (poses, move kinds, motion tables).

pub mod data;
pub mod error;
pub mod geometry;
pub mod precision;

pub use data::{ContinuityState, MotionTable, MoveKind, Pose};
pub use error::GeometryError;
pub use geometry::{CutPlane, Point3, Polyline, Vector3, LENGTH_EPSILON};
pub use precision::{decimals_for_tolerance, round_to, Precision};
