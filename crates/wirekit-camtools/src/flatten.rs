//! Curve flattening.
//!
//! Drive curves reach the engine as point samples. A [`CurveFlattener`]
//! turns a curve into the polyline the synchronizer walks; the result must be
//! deterministic for a given curve and set of limits. [`PolylineFlattener`]
//! cleans up an existing sample: it removes repeated and too-short edges and,
//! when an angle tolerance is set, merges nearly collinear runs.

use crate::error::{ToolpathError, ToolpathResult};
use tracing::debug;
use wirekit_core::{Point3, Polyline, LENGTH_EPSILON};
use wirekit_settings::Config;

/// Limits applied while flattening
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlattenOptions {
    /// Maximum deviation of a merged point from the kept chord
    pub tolerance: f64,
    /// Maximum turn in degrees at a merged point; zero disables merging
    pub angle_tolerance: f64,
    /// Edges shorter than this are collapsed
    pub min_edge_length: f64,
    /// Upper bound on output segments
    pub max_segments: usize,
}

impl FlattenOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            tolerance: config.tolerance,
            angle_tolerance: config.flattening.angle_tolerance,
            min_edge_length: config.flattening.min_edge_length,
            max_segments: config.flattening.max_segments,
        }
    }
}

/// Produces the polyline approximation of a drive curve
pub trait CurveFlattener {
    fn flatten(&self, curve: &Polyline, options: &FlattenOptions) -> ToolpathResult<Polyline>;
}

/// Flattener for curves that are already point samples
#[derive(Debug, Clone, Copy, Default)]
pub struct PolylineFlattener;

impl CurveFlattener for PolylineFlattener {
    fn flatten(&self, curve: &Polyline, options: &FlattenOptions) -> ToolpathResult<Polyline> {
        let points = curve.points();
        let last_index = points.len() - 1;
        let mut kept: Vec<Point3> = Vec::with_capacity(points.len());
        kept.push(points[0]);

        for (index, &point) in points.iter().enumerate().skip(1) {
            let Some(&previous) = kept.last() else {
                continue;
            };
            let edge = (point - previous).norm();
            let is_end = index == last_index;

            if is_end {
                // The true end point always survives; it replaces a short tail edge.
                if (edge <= LENGTH_EPSILON || edge < options.min_edge_length) && kept.len() > 1 {
                    kept.pop();
                    kept.push(point);
                } else if edge > LENGTH_EPSILON {
                    kept.push(point);
                }
                continue;
            }

            if edge <= LENGTH_EPSILON || edge < options.min_edge_length {
                continue;
            }

            if options.angle_tolerance > 0.0
                && is_mergeable(&previous, &point, &points[index + 1], options)
            {
                continue;
            }

            kept.push(point);
        }

        let flattened = Polyline::new(kept)?;
        if flattened.segment_count() > options.max_segments {
            return Err(ToolpathError::InvalidParameters(format!(
                "flattened curve has {} segments, limit is {}",
                flattened.segment_count(),
                options.max_segments
            )));
        }

        debug!(
            "Flattened curve: {} -> {} points",
            points.len(),
            flattened.len()
        );
        Ok(flattened)
    }
}

/// Whether `point` can be dropped between `previous` and `next`.
fn is_mergeable(previous: &Point3, point: &Point3, next: &Point3, options: &FlattenOptions) -> bool {
    let incoming = point - previous;
    let outgoing = next - point;
    let (Some(incoming), Some(outgoing)) = (
        incoming.try_normalize(LENGTH_EPSILON),
        outgoing.try_normalize(LENGTH_EPSILON),
    ) else {
        return true;
    };

    let turn = incoming.dot(&outgoing).clamp(-1.0, 1.0).acos().to_degrees();
    turn < options.angle_tolerance && distance_to_segment(point, previous, next) < options.tolerance
}

fn distance_to_segment(point: &Point3, start: &Point3, end: &Point3) -> f64 {
    let chord = end - start;
    let length_sq = chord.norm_squared();
    if length_sq <= LENGTH_EPSILON * LENGTH_EPSILON {
        return (point - start).norm();
    }
    let t = ((point - start).dot(&chord) / length_sq).clamp(0.0, 1.0);
    (point - (start + chord * t)).norm()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(angle_tolerance: f64, min_edge_length: f64) -> FlattenOptions {
        FlattenOptions {
            tolerance: 0.01,
            angle_tolerance,
            min_edge_length,
            max_segments: 1000,
        }
    }

    #[test]
    fn test_default_keeps_every_distinct_point() {
        let curve =
            Polyline::from_coords(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]).unwrap();
        let flat = PolylineFlattener.flatten(&curve, &options(0.0, 0.0)).unwrap();
        assert_eq!(flat, curve);
    }

    #[test]
    fn test_repeated_points_are_removed() {
        let curve = Polyline::from_coords(&[
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
        ])
        .unwrap();
        let flat = PolylineFlattener.flatten(&curve, &options(0.0, 0.0)).unwrap();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat.end(), Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_collinear_points_merge_with_angle_tolerance() {
        let curve = Polyline::from_coords(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [2.0, 1.0, 0.0],
        ])
        .unwrap();
        let flat = PolylineFlattener.flatten(&curve, &options(1.0, 0.0)).unwrap();
        assert_eq!(
            flat.points(),
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 1.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_short_edges_collapse_but_end_survives() {
        let curve = Polyline::from_coords(&[
            [0.0, 0.0, 0.0],
            [0.05, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.02, 0.0, 0.0],
        ])
        .unwrap();
        let flat = PolylineFlattener.flatten(&curve, &options(0.0, 0.1)).unwrap();
        assert_eq!(
            flat.points(),
            &[Point3::new(0.0, 0.0, 0.0), Point3::new(1.02, 0.0, 0.0)]
        );
    }

    #[test]
    fn test_segment_limit() {
        let curve =
            Polyline::from_coords(&[[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [2.0, 0.0, 0.0]]).unwrap();
        let limits = FlattenOptions {
            max_segments: 1,
            ..options(0.0, 0.0)
        };
        let err = PolylineFlattener.flatten(&curve, &limits).unwrap_err();
        assert!(matches!(err, ToolpathError::InvalidParameters(_)));
    }

    #[test]
    fn test_fully_collapsed_curve_is_rejected() {
        let curve = Polyline::from_coords(&[[0.0, 0.0, 0.0], [0.0, 0.0, 0.0]]).unwrap();
        let err = PolylineFlattener.flatten(&curve, &options(0.0, 0.0)).unwrap_err();
        assert!(matches!(err, ToolpathError::Geometry(_)));
    }
}
