//! # WireKit CAM Tools
//!
//! Toolpath synthesis for 4-axis hot-wire cutters. A job's drive curves are
//! turned into a table of wire poses (midpoint plus rotary angle) and rendered
//! as positional instructions.
//!
//! ## Pipeline
//!
//! - **Flatten**: curves become polylines through a [`CurveFlattener`]
//! - **Synchronize**: rail pairs are walked so both wire ends sit on the same
//!   cross-section ([`CurveSynchronizer`], backed by an [`IntersectionOracle`])
//! - **Pose**: each point pair yields a pose with an unwrapped rotary angle
//!   ([`resolve_angle`], [`calculate_pose`])
//! - **Assemble**: near-duplicate poses are dropped ([`PoseStreamBuilder`])
//! - **Serialize**: the motion table is rendered with modal axis words
//!   ([`InstructionSerializer`])
//!
//! [`WireCutGenerator`] runs the whole pipeline for a [`WireCutJob`].

pub mod angle;
pub mod error;
pub mod flatten;
pub mod intersection;
pub mod job;
pub mod pose;
pub mod pose_stream;
pub mod serializer;
pub mod synchronizer;
pub mod wire_cutter;

// Re-export commonly used items
pub use angle::resolve_angle;
pub use error::{ToolpathError, ToolpathResult};
pub use flatten::{CurveFlattener, FlattenOptions, PolylineFlattener};
pub use intersection::{IntersectionOracle, PlaneIntersection, PolylineIntersector};
pub use job::{JobSegment, SegmentGeometry, WireCutJob};
pub use pose::{calculate_pose, minimal_rotation, PoseContext};
pub use pose_stream::PoseStreamBuilder;
pub use serializer::{render, write_program, InstructionSerializer};
pub use synchronizer::{CurveSynchronizer, Resolution, Role, SyncPair};
pub use wire_cutter::{Program, WireCutGenerator};
