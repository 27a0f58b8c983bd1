use wirekit_camtools::{
    CurveSynchronizer, JobSegment, PolylineIntersector, Resolution, SegmentGeometry,
    WireCutGenerator, WireCutJob,
};
use wirekit_core::{CutPlane, MoveKind, Polyline};
use wirekit_settings::{Config, PlaneSettings};

fn zx_config() -> Config {
    Config {
        plane: PlaneSettings {
            origin: [0.0, 0.0, 0.0],
            x_axis: [0.0, 0.0, 1.0],
            y_axis: [1.0, 0.0, 0.0],
        },
        ..Config::default()
    }
}

fn parallel_rails() -> (Polyline, Polyline) {
    let a = Polyline::from_coords(&[[0.0, 0.0, 0.0], [0.0, 1.0, 1.0], [0.0, 2.0, 2.0]]).unwrap();
    let b = Polyline::from_coords(&[[0.0, 0.0, 5.0], [0.0, 1.0, 6.0], [0.0, 2.0, 7.0]]).unwrap();
    (a, b)
}

#[test]
fn test_parallel_rails_stay_in_sync() {
    let (a, b) = parallel_rails();
    let mut sync = CurveSynchronizer::new(&a, &b, &PolylineIntersector, CutPlane::world_zx(), 0.01);
    let pairs: Vec<_> = sync.by_ref().collect::<Result<_, _>>().unwrap();

    assert_eq!(pairs.len(), 3);
    assert!(pairs.iter().all(|p| p.resolution == Resolution::InSync));
    assert_eq!(sync.intersection_calls(), 0);
    assert_eq!(sync.fallback_count(), 0);
}

#[test]
fn test_parallel_rails_program() {
    let (a, b) = parallel_rails();
    let job = WireCutJob::new(vec![JobSegment::new(SegmentGeometry::Rails { a, b })]);
    let program = WireCutGenerator::new(zx_config()).generate(&job).unwrap();

    let poses = program.table.poses();
    assert_eq!(poses.len(), 3);
    assert!(poses.windows(2).all(|w| w[1].z > w[0].z));
    assert!(poses.iter().all(|p| p.angle == 0.0));
    assert!(poses.iter().all(|p| p.kind == MoveKind::Drive));

    assert_eq!(
        program.lines,
        vec![
            "G92 X0 Y0 Z0 Q1=0",
            "G00 X0.00 Y0.00 Z2.50 Q1=0.00",
            "G01 Y1.00 Z3.50 F200",
            "G01 Y2.00 Z4.50",
            "M02",
        ]
    );
}

#[test]
fn test_program_written_to_file() {
    let (a, b) = parallel_rails();
    let job = WireCutJob::new(vec![JobSegment::new(SegmentGeometry::Rails { a, b })]);
    let program = WireCutGenerator::new(zx_config()).generate(&job).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("part.nc");
    program.write_to(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, program.to_gcode());
    assert_eq!(written.lines().count(), 5);
}
