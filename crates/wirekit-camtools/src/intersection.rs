//! Curve/plane intersection.
//!
//! The synchronizer asks an [`IntersectionOracle`] where the far rail crosses
//! the cross-sectional plane of the drive point. Hosts with an exact curve
//! kernel can plug their own oracle in; [`PolylineIntersector`] answers on the
//! tessellated sample itself.

use wirekit_core::{CutPlane, Point3, Polyline};

/// Result of intersecting a curve with a plane
#[derive(Debug, Clone, PartialEq)]
pub enum PlaneIntersection {
    /// The curve does not reach the plane
    None,
    /// Isolated crossing points, in curve order
    Points(Vec<Point3>),
    /// Part of the curve lies in the plane
    Overlap,
}

/// Finds where a curve crosses a plane
pub trait IntersectionOracle {
    fn intersect_with_plane(
        &self,
        curve: &Polyline,
        plane: &CutPlane,
        tolerance: f64,
    ) -> PlaneIntersection;
}

impl<F> IntersectionOracle for F
where
    F: Fn(&Polyline, &CutPlane, f64) -> PlaneIntersection,
{
    fn intersect_with_plane(
        &self,
        curve: &Polyline,
        plane: &CutPlane,
        tolerance: f64,
    ) -> PlaneIntersection {
        self(curve, plane, tolerance)
    }
}

/// Segment-by-segment intersection of a polyline with a plane
#[derive(Debug, Clone, Copy, Default)]
pub struct PolylineIntersector;

impl IntersectionOracle for PolylineIntersector {
    fn intersect_with_plane(
        &self,
        curve: &Polyline,
        plane: &CutPlane,
        tolerance: f64,
    ) -> PlaneIntersection {
        let mut hits: Vec<Point3> = Vec::new();
        let push_hit = |point: Point3, hits: &mut Vec<Point3>| {
            // Adjacent segments report their shared vertex twice.
            if hits.last().is_none_or(|last| (*last - point).norm() > tolerance) {
                hits.push(point);
            }
        };

        for (start, end) in curve.segments() {
            let d0 = plane.signed_distance(&start);
            let d1 = plane.signed_distance(&end);
            let on0 = d0.abs() <= tolerance;
            let on1 = d1.abs() <= tolerance;

            if on0 && on1 {
                if (end - start).norm() > tolerance {
                    return PlaneIntersection::Overlap;
                }
                push_hit(start, &mut hits);
            } else if on0 {
                push_hit(start, &mut hits);
            } else if on1 {
                push_hit(end, &mut hits);
            } else if d0 * d1 < 0.0 {
                let t = d0 / (d0 - d1);
                push_hit(start + (end - start) * t, &mut hits);
            }
        }

        if hits.is_empty() {
            PlaneIntersection::None
        } else {
            PlaneIntersection::Points(hits)
        }
    }
}
