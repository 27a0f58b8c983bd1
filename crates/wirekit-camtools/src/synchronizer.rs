//! Dual-rail curve synchronisation.
//!
//! Ruled-surface rails are rarely parametrised at matching arc length, so
//! pairing points by index would skew the wire. The synchronizer walks both
//! samples with independent cursors and pairs points that sit at the same
//! height above the reference plane.
//!
//! When the two current points disagree by more than the tolerance, the one
//! with the smaller signed distance becomes the drive point. The far point is
//! re-derived on the drive point's cross-sectional plane: from the oracle's
//! crossing of the far curve if there is one, otherwise by projecting the far
//! point onto that plane (logged and counted). Only the drive cursor advances;
//! the far cursor is tested again against the next drive point.

use crate::error::{ToolpathError, ToolpathResult};
use crate::intersection::{IntersectionOracle, PlaneIntersection};
use tracing::{trace, warn};
use wirekit_core::{CutPlane, Point3, Polyline};

/// Part a rail played in one synchronisation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Its point defined the cross-section
    Drive,
    /// Its point was located on the drive point's cross-section
    Far,
}

/// How the far point of a pair was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Both points already matched; neither was moved
    InSync,
    /// The far point is the curve's crossing of the cross-section
    Intersection,
    /// The oracle found no crossing; the far point was projected
    Projection,
}

/// A synchronized pair of rail points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncPair {
    /// Point on rail A
    pub a: Point3,
    /// Point on rail B
    pub b: Point3,
    /// Roles of rail A and rail B; both `Drive` when in sync
    pub roles: (Role, Role),
    pub resolution: Resolution,
}

impl SyncPair {
    fn in_sync(a: Point3, b: Point3) -> Self {
        Self {
            a,
            b,
            roles: (Role::Drive, Role::Drive),
            resolution: Resolution::InSync,
        }
    }

    fn resynced(drive: Point3, far: Point3, a_drives: bool, resolution: Resolution) -> Self {
        if a_drives {
            Self {
                a: drive,
                b: far,
                roles: (Role::Drive, Role::Far),
                resolution,
            }
        } else {
            Self {
                a: far,
                b: drive,
                roles: (Role::Far, Role::Drive),
                resolution,
            }
        }
    }

    /// Both points in rail order
    pub fn points(&self) -> (Point3, Point3) {
        (self.a, self.b)
    }
}

/// Stateful walk over two rail samples.
///
/// Yields `Ok(SyncPair)` until either cursor passes the end of its rail.
/// After an `Err` the iterator is exhausted.
pub struct CurveSynchronizer<'a, O: IntersectionOracle> {
    curve_a: &'a Polyline,
    curve_b: &'a Polyline,
    oracle: &'a O,
    plane: CutPlane,
    tolerance: f64,
    cursor_a: usize,
    cursor_b: usize,
    intersection_calls: usize,
    fallback_count: usize,
    failed: bool,
}

impl<'a, O: IntersectionOracle> CurveSynchronizer<'a, O> {
    pub fn new(
        curve_a: &'a Polyline,
        curve_b: &'a Polyline,
        oracle: &'a O,
        plane: CutPlane,
        tolerance: f64,
    ) -> Self {
        Self {
            curve_a,
            curve_b,
            oracle,
            plane,
            tolerance,
            cursor_a: 0,
            cursor_b: 0,
            intersection_calls: 0,
            fallback_count: 0,
            failed: false,
        }
    }

    /// Number of times the oracle was consulted
    pub fn intersection_calls(&self) -> usize {
        self.intersection_calls
    }

    /// Number of pairs whose far point had to be projected
    pub fn fallback_count(&self) -> usize {
        self.fallback_count
    }

    fn locate_far_point(
        &mut self,
        drive: Point3,
        far: Point3,
        far_curve: &Polyline,
    ) -> ToolpathResult<(Point3, Resolution)> {
        let section = self.plane.through(drive);
        self.intersection_calls += 1;

        match self
            .oracle
            .intersect_with_plane(far_curve, &section, self.tolerance)
        {
            PlaneIntersection::Points(points) => {
                let nearest = points
                    .into_iter()
                    .min_by(|p, q| (*p - far).norm().total_cmp(&(*q - far).norm()));
                match nearest {
                    Some(point) => Ok((point, Resolution::Intersection)),
                    None => Ok(self.project(&section, far)),
                }
            }
            PlaneIntersection::None => Ok(self.project(&section, far)),
            PlaneIntersection::Overlap => Err(ToolpathError::UnsupportedIntersection(format!(
                "far curve overlaps the cross-section through ({:.4}, {:.4}, {:.4})",
                drive.x, drive.y, drive.z
            ))),
        }
    }

    fn project(&mut self, section: &CutPlane, far: Point3) -> (Point3, Resolution) {
        self.fallback_count += 1;
        let projected = section.closest_point(&far);
        warn!(
            "No intersection with cross-section at cursors ({}, {}); projecting far point ({:.4}, {:.4}, {:.4})",
            self.cursor_a, self.cursor_b, far.x, far.y, far.z
        );
        (projected, Resolution::Projection)
    }
}

impl<O: IntersectionOracle> Iterator for CurveSynchronizer<'_, O> {
    type Item = ToolpathResult<SyncPair>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed
            || self.cursor_a > self.curve_a.segment_count()
            || self.cursor_b > self.curve_b.segment_count()
        {
            return None;
        }

        let point_a = self.curve_a.points()[self.cursor_a];
        let point_b = self.curve_b.points()[self.cursor_b];
        let distance_a = self.plane.signed_distance(&point_a);
        let distance_b = self.plane.signed_distance(&point_b);

        if (distance_a - distance_b).abs() <= self.tolerance {
            trace!("In sync at cursors ({}, {})", self.cursor_a, self.cursor_b);
            self.cursor_a += 1;
            self.cursor_b += 1;
            return Some(Ok(SyncPair::in_sync(point_a, point_b)));
        }

        let a_drives = distance_a < distance_b;
        let (drive, far, far_curve) = if a_drives {
            (point_a, point_b, self.curve_b)
        } else {
            (point_b, point_a, self.curve_a)
        };

        let located = self.locate_far_point(drive, far, far_curve);
        match located {
            Ok((far, resolution)) => {
                if a_drives {
                    self.cursor_a += 1;
                } else {
                    self.cursor_b += 1;
                }
                Some(Ok(SyncPair::resynced(drive, far, a_drives, resolution)))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
