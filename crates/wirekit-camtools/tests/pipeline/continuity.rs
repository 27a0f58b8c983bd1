use wirekit_camtools::{minimal_rotation, resolve_angle, PoseContext, PoseStreamBuilder};
use wirekit_core::{CutPlane, MoveKind, Point3, Precision, Vector3};

#[test]
fn test_rotation_step_is_bounded() {
    for previous in (-720..=720).step_by(15) {
        for raw in (0..360).step_by(7) {
            let step = minimal_rotation(raw as f64, previous as f64);
            assert!(
                step.abs() <= 180.0,
                "raw {} from {} stepped {}",
                raw,
                previous,
                step
            );
        }
    }
}

#[test]
fn test_solver_round_trip() {
    let plane = CutPlane::world_xy();
    for degrees in [0.0_f64, 37.0, 90.0, 143.0, 200.0, 315.0] {
        let radians = degrees.to_radians();
        let vector = Vector3::new(radians.cos(), radians.sin(), 0.0);
        let angle = resolve_angle(&vector, &plane, 1e-4).unwrap();
        assert!((angle - degrees).abs() < 1e-6, "{} resolved to {}", degrees, angle);
    }
}

#[test]
fn test_spinning_wire_accumulates_angle() {
    let mut builder = PoseStreamBuilder::new(PoseContext::new(
        CutPlane::world_xy(),
        Precision::from_tolerance(0.01),
        1e-4,
    ));

    // The wire keeps turning the same way, 30 degrees per pose.
    for step in 0..=24 {
        let radians = (step as f64 * 30.0).to_radians();
        let half = Vector3::new(radians.cos(), radians.sin(), 0.0);
        let center = Point3::new(0.0, 0.0, step as f64);
        builder
            .push_pair(&(center - half), &(center + half), MoveKind::Drive)
            .unwrap();
    }

    let table = builder.finish();
    assert_eq!(table.len(), 25);
    assert!(table.max_angle_step() <= 30.0 + 1e-9);
    assert_eq!(table.last().unwrap().angle, 720.0);
}
