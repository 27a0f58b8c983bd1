//! Pose calculation for a synchronized point pair.
//!
//! A pose places the wire midpoint at the pair's midpoint and tilts the rotary
//! axis to the pair's direction. The rotary axis has no hard stops and no
//! preferred zero crossing, so the raw `[0, 360)` angle is unwrapped against
//! the previous pose: the smallest move among the candidate adjustments
//! `{0, ±180, ±360}` wins. The wire is an undirected line, so a half turn
//! leaves its orientation unchanged.

use crate::angle::resolve_angle;
use crate::error::ToolpathResult;
use wirekit_core::{ContinuityState, CutPlane, MoveKind, Point3, Pose, Precision};

/// Adjustments tried when unwrapping, in order of preference on ties.
const WRAP_CANDIDATES: [f64; 5] = [0.0, -180.0, 180.0, -360.0, 360.0];

/// Fixed inputs shared by every pose of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseContext {
    pub plane: CutPlane,
    pub precision: Precision,
    /// Absolute quadrant-matching tolerance in degrees
    pub angle_tolerance: f64,
}

impl PoseContext {
    pub fn new(plane: CutPlane, precision: Precision, angle_tolerance: f64) -> Self {
        Self {
            plane,
            precision,
            angle_tolerance,
        }
    }
}

/// Smallest rotary move from `previous` that reaches the orientation `raw`.
///
/// The result always lies in `[-90, 90]`.
pub fn minimal_rotation(raw: f64, previous: f64) -> f64 {
    let step = (raw - previous).rem_euclid(360.0);
    WRAP_CANDIDATES
        .iter()
        .map(|adjustment| step + adjustment)
        .min_by(|a, b| a.abs().total_cmp(&b.abs()))
        .unwrap_or(step)
}

/// Compute the pose for the pair `(p0, p1)` and the continuity state that follows it.
pub fn calculate_pose(
    p0: &Point3,
    p1: &Point3,
    continuity: ContinuityState,
    context: &PoseContext,
    kind: MoveKind,
) -> ToolpathResult<(Pose, ContinuityState)> {
    let precision = &context.precision;
    let center = midpoint(p0, p1);

    let raw = resolve_angle(&(p1 - p0), &context.plane, context.angle_tolerance)?;
    let step = minimal_rotation(raw, continuity.angle);
    let angle = precision.round(continuity.angle + step);

    let pose = Pose::new(
        precision.round(center.x),
        precision.round(center.y),
        precision.round(center.z),
        angle,
        kind,
    );
    Ok((pose, ContinuityState::from_pose(&pose)))
}

fn midpoint(p0: &Point3, p1: &Point3) -> Point3 {
    Point3::from((p0.coords + p1.coords) * 0.5)
}
