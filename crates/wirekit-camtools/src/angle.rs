//! Wire tilt angle solver.
//!
//! Maps a wire direction to its angle inside the cut plane, measured from the
//! plane's X axis towards its Y axis, in `[0, 360)` degrees.
//!
//! `acos` of a single dot product cannot tell θ from 360 − θ. Instead the
//! angles to both in-plane axes are taken and the quadrant is identified by
//! which sum/difference identity they satisfy:
//!
//! | Quadrant | Identity              | Angle      |
//! |----------|-----------------------|------------|
//! | I        | `h + v = 90`          | `h`        |
//! | II       | `h − v = 90`          | `90 + v`   |
//! | III      | `h + v = 270`         | `90 + v`   |
//! | IV       | `v − h = 90`          | `360 − h`  |
//!
//! Identities are tested in that order against an absolute tolerance in degrees.

use crate::error::{ToolpathError, ToolpathResult};
use wirekit_core::{CutPlane, Vector3, LENGTH_EPSILON};

/// Directions whose cross product with the normal is shorter than this are parallel to it.
const PARALLEL_EPSILON: f64 = 1e-9;

/// Out-of-plane components below this are ignored instead of projected away.
const PERPENDICULAR_EPSILON: f64 = 1e-12;

/// Distance at which a unit direction counts as exactly on an axis.
const AXIS_EPSILON: f64 = 1e-12;

/// Resolve the in-plane angle of `vector`, in degrees within `[0, 360)`.
///
/// Small out-of-plane drift is projected away. Fails with
/// [`ToolpathError::DegenerateVector`] for zero vectors or vectors parallel to
/// the plane normal, and with [`ToolpathError::AngleResolution`] when no
/// quadrant identity holds within `angle_tolerance`.
pub fn resolve_angle(
    vector: &Vector3,
    plane: &CutPlane,
    angle_tolerance: f64,
) -> ToolpathResult<f64> {
    let direction = vector
        .try_normalize(LENGTH_EPSILON)
        .ok_or_else(|| ToolpathError::DegenerateVector("zero-length wire vector".to_string()))?;

    let normal = plane.normal();
    if direction.cross(&normal).norm() <= PARALLEL_EPSILON {
        return Err(ToolpathError::DegenerateVector(format!(
            "wire vector ({:.6}, {:.6}, {:.6}) is parallel to the cut plane normal",
            direction.x, direction.y, direction.z
        )));
    }

    let in_plane = if direction.dot(&normal).abs() > PERPENDICULAR_EPSILON {
        plane.project_vector(&direction)
    } else {
        direction
    };
    let unit = in_plane.try_normalize(LENGTH_EPSILON).ok_or_else(|| {
        ToolpathError::DegenerateVector("wire vector vanishes in the cut plane".to_string())
    })?;

    let x_axis = plane.x_axis();
    let y_axis = plane.y_axis();
    if (unit - x_axis).norm() <= AXIS_EPSILON {
        return Ok(0.0);
    }
    if (unit - y_axis).norm() <= AXIS_EPSILON {
        return Ok(90.0);
    }

    let horizontal = angle_between(&unit, &x_axis);
    let vertical = angle_between(&unit, &y_axis);
    let matches = |value: f64, target: f64| (value - target).abs() <= angle_tolerance;

    let angle = if matches(horizontal + vertical, 90.0) {
        horizontal
    } else if matches(horizontal - vertical, 90.0) {
        90.0 + vertical
    } else if matches(horizontal + vertical, 270.0) {
        90.0 + vertical
    } else if matches(vertical - horizontal, 90.0) {
        360.0 - horizontal
    } else {
        return Err(ToolpathError::AngleResolution {
            horizontal,
            vertical,
            tolerance: angle_tolerance,
        });
    };

    Ok(if angle >= 360.0 { angle - 360.0 } else { angle })
}

/// Unsigned angle between two unit vectors, in degrees within `[0, 180]`.
fn angle_between(a: &Vector3, b: &Vector3) -> f64 {
    a.dot(b).clamp(-1.0, 1.0).acos().to_degrees()
}
