//! Data models for the motion program
//!
//! This module provides:
//! - Move classification (cut, rapid, drive, retract)
//! - 4-axis poses (X, Y, Z plus wire tilt angle)
//! - The append-only motion table with near-duplicate suppression
//! - The continuity state carried between pose calculations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relative slack applied to the near-duplicate tolerance
const NEAR_SLACK: f64 = 1e-9;

/// Classification of a commanded pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    /// Standalone cutting move
    Cut,
    /// Non-cutting repositioning move
    Rapid,
    /// Cutting move inside a continuous driven segment
    Drive,
    /// Non-cutting move away from the work
    Retract,
}

impl MoveKind {
    /// Whether the wire travels without cutting
    pub fn is_rapid(self) -> bool {
        matches!(self, Self::Rapid | Self::Retract)
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cut => write!(f, "cut"),
            Self::Rapid => write!(f, "rapid"),
            Self::Drive => write!(f, "drive"),
            Self::Retract => write!(f, "retract"),
        }
    }
}

impl FromStr for MoveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cut" => Ok(Self::Cut),
            "rapid" => Ok(Self::Rapid),
            "drive" => Ok(Self::Drive),
            "retract" => Ok(Self::Retract),
            _ => Err(format!("Unknown move kind: {}", s)),
        }
    }
}

/// A single commanded 4-axis sample.
///
/// Coordinates are already rounded to the run's precision. `angle` lives in
/// an unbounded domain: it is unwrapped relative to the previous pose and may
/// leave `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub angle: f64,
    pub kind: MoveKind,
}

impl Pose {
    pub fn new(x: f64, y: f64, z: f64, angle: f64, kind: MoveKind) -> Self {
        debug_assert!(
            x.is_finite() && y.is_finite() && z.is_finite() && angle.is_finite(),
            "Pose axes must be finite: x={x}, y={y}, z={z}, angle={angle}"
        );
        Self {
            x,
            y,
            z,
            angle,
            kind,
        }
    }

    /// Axis values in output order: X, Y, Z, rotary
    pub fn axes(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.angle]
    }

    /// True when every axis differs from `other` by less than `tolerance`.
    ///
    /// Poses hold rounded values, so a difference of exactly one tolerance
    /// step can come out a few ulps short; the slack keeps such moves.
    pub fn is_near(&self, other: &Pose, tolerance: f64) -> bool {
        let limit = tolerance * (1.0 - NEAR_SLACK);
        self.axes()
            .iter()
            .zip(other.axes().iter())
            .all(|(a, b)| (a - b).abs() < limit)
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X:{:.3} Y:{:.3} Z:{:.3} A:{:.3} ({})",
            self.x, self.y, self.z, self.angle, self.kind
        )
    }
}

/// Last emitted pose position, used to unwrap the next rotary angle.
///
/// Passed by value into each pose calculation and returned updated; the
/// default (all zero) is the state at the start of every run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContinuityState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub angle: f64,
}

impl ContinuityState {
    pub fn from_pose(pose: &Pose) -> Self {
        Self {
            x: pose.x,
            y: pose.y,
            z: pose.z,
            angle: pose.angle,
        }
    }
}

/// Ordered, append-only sequence of poses in cut order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionTable {
    poses: Vec<Pose>,
}

impl MotionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `pose` unless it is within `tolerance` of the last entry on all
    /// four axes. Returns whether the pose was kept.
    pub fn push_deduplicated(&mut self, pose: Pose, tolerance: f64) -> bool {
        if let Some(last) = self.poses.last() {
            if pose.is_near(last, tolerance) {
                return false;
            }
        }
        self.poses.push(pose);
        true
    }

    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pose> {
        self.poses.iter()
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn last(&self) -> Option<&Pose> {
        self.poses.last()
    }

    /// Largest absolute rotary step between consecutive poses
    pub fn max_angle_step(&self) -> f64 {
        self.poses
            .windows(2)
            .map(|w| (w[1].angle - w[0].angle).abs())
            .fold(0.0, f64::max)
    }
}

impl<'a> IntoIterator for &'a MotionTable {
    type Item = &'a Pose;
    type IntoIter = std::slice::Iter<'a, Pose>;

    fn into_iter(self) -> Self::IntoIter {
        self.poses.iter()
    }
}
