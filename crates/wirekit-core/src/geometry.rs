//! Geometry primitives
//!
//! Points and vectors are `nalgebra` types in `f64`. On top of them this module
//! provides the two shapes the engine works with: the [`CutPlane`] that defines
//! the cutter's canonical frame (and the cross-sectional planes derived from
//! it), and the [`Polyline`] that approximates a drive curve.

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// 3-D point in the cutter frame
pub type Point3 = nalgebra::Point3<f64>;

/// 3-D direction in the cutter frame
pub type Vector3 = nalgebra::Vector3<f64>;

/// Lengths below this are treated as zero when normalising directions.
pub const LENGTH_EPSILON: f64 = 1e-12;

/// An oriented plane with an orthonormal in-plane frame.
///
/// The wire tilt angle is measured inside this plane, counter-clockwise from
/// `x_axis` towards `y_axis`. `normal` is `x_axis × y_axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutPlane {
    origin: Point3,
    x_axis: Vector3,
    y_axis: Vector3,
    normal: Vector3,
}

impl CutPlane {
    /// Create a plane from an origin and two in-plane directions.
    ///
    /// The axes are normalised and `y_axis` is re-orthogonalised against
    /// `x_axis`, so callers may pass any two non-parallel directions.
    pub fn new(origin: Point3, x_axis: Vector3, y_axis: Vector3) -> Result<Self, GeometryError> {
        let x_axis = x_axis
            .try_normalize(LENGTH_EPSILON)
            .ok_or_else(|| GeometryError::ZeroLength {
                context: "plane x axis".to_string(),
            })?;
        if y_axis.norm() <= LENGTH_EPSILON {
            return Err(GeometryError::ZeroLength {
                context: "plane y axis".to_string(),
            });
        }
        let y_axis = (y_axis - x_axis * x_axis.dot(&y_axis))
            .try_normalize(LENGTH_EPSILON)
            .ok_or(GeometryError::ParallelAxes)?;
        let normal = x_axis.cross(&y_axis);

        Ok(Self {
            origin,
            x_axis,
            y_axis,
            normal,
        })
    }

    /// World XY plane through the origin (normal +Z)
    pub fn world_xy() -> Self {
        Self::from_orthonormal(Point3::origin(), Vector3::x(), Vector3::y())
    }

    /// World ZX plane through the origin (normal +Y)
    pub fn world_zx() -> Self {
        Self::from_orthonormal(Point3::origin(), Vector3::z(), Vector3::x())
    }

    fn from_orthonormal(origin: Point3, x_axis: Vector3, y_axis: Vector3) -> Self {
        Self {
            origin,
            x_axis,
            y_axis,
            normal: x_axis.cross(&y_axis),
        }
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn x_axis(&self) -> Vector3 {
        self.x_axis
    }

    pub fn y_axis(&self) -> Vector3 {
        self.y_axis
    }

    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// Signed distance from the plane along its normal
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        (point - self.origin).dot(&self.normal)
    }

    /// Closest point on the plane
    pub fn closest_point(&self, point: &Point3) -> Point3 {
        point - self.normal * self.signed_distance(point)
    }

    /// Remove the normal component of a direction
    pub fn project_vector(&self, vector: &Vector3) -> Vector3 {
        vector - self.normal * vector.dot(&self.normal)
    }

    /// Parallel plane (same frame) passing through `point`
    pub fn through(&self, point: Point3) -> Self {
        Self {
            origin: point,
            ..*self
        }
    }
}

impl Default for CutPlane {
    fn default() -> Self {
        Self::world_xy()
    }
}

/// Ordered point sample approximating a continuous curve.
///
/// Segment `i` joins `points[i]` and `points[i + 1]`. Serialized as a list of
/// `[x, y, z]` triples; deserializing runs the same checks as [`Polyline::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 3]>", into = "Vec<[f64; 3]>")]
pub struct Polyline {
    points: Vec<Point3>,
}

impl Polyline {
    /// Create a polyline, rejecting fewer than two points or non-finite coordinates
    pub fn new(points: Vec<Point3>) -> Result<Self, GeometryError> {
        if points.len() < 2 {
            return Err(GeometryError::TooFewPoints {
                count: points.len(),
            });
        }
        if let Some(index) = points
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(GeometryError::NonFinite { index });
        }
        Ok(Self { points })
    }

    /// Create a polyline from raw `[x, y, z]` triples
    pub fn from_coords(coords: &[[f64; 3]]) -> Result<Self, GeometryError> {
        Self::new(
            coords
                .iter()
                .map(|&[x, y, z]| Point3::new(x, y, z))
                .collect(),
        )
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of segments (`len - 1`)
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn start(&self) -> Point3 {
        self.points[0]
    }

    pub fn end(&self) -> Point3 {
        self.points[self.points.len() - 1]
    }

    /// Iterate over consecutive point pairs
    pub fn segments(&self) -> impl Iterator<Item = (Point3, Point3)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

impl TryFrom<Vec<[f64; 3]>> for Polyline {
    type Error = GeometryError;

    fn try_from(coords: Vec<[f64; 3]>) -> Result<Self, Self::Error> {
        Self::from_coords(&coords)
    }
}

impl From<Polyline> for Vec<[f64; 3]> {
    fn from(polyline: Polyline) -> Self {
        polyline.points.iter().map(|p| [p.x, p.y, p.z]).collect()
    }
}
