//! Wire cut program generation.
//!
//! Ties the pipeline together for one job: flatten each segment's curves,
//! synchronize rail pairs, turn pairs into poses and render the motion table.
//! A run is all or nothing; the first error discards everything built so far.

use crate::error::{ToolpathError, ToolpathResult};
use crate::flatten::{CurveFlattener, FlattenOptions, PolylineFlattener};
use crate::intersection::{IntersectionOracle, PolylineIntersector};
use crate::job::{JobSegment, SegmentGeometry, WireCutJob};
use crate::pose::PoseContext;
use crate::pose_stream::PoseStreamBuilder;
use crate::serializer;
use crate::synchronizer::CurveSynchronizer;
use std::path::Path;
use tracing::{debug, info};
use wirekit_core::{MotionTable, Polyline};
use wirekit_settings::Config;

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Poses in emission order
    pub table: MotionTable,
    /// Rendered instructions, header and footer included
    pub lines: Vec<String>,
    /// Far points that had to be projected during synchronisation
    pub fallback_count: usize,
    /// Poses dropped as near-duplicates
    pub dropped: usize,
}

impl Program {
    /// Program text, newline terminated
    pub fn to_gcode(&self) -> String {
        serializer::to_program_text(&self.lines)
    }

    pub fn write_to(&self, path: &Path) -> ToolpathResult<()> {
        serializer::write_program(path, &self.lines)
    }
}

/// Generator for wire cut programs
pub struct WireCutGenerator<F = PolylineFlattener, O = PolylineIntersector> {
    config: Config,
    flattener: F,
    oracle: O,
}

impl WireCutGenerator {
    /// Generator using the built-in polyline collaborators
    pub fn new(config: Config) -> Self {
        Self::with_collaborators(config, PolylineFlattener, PolylineIntersector)
    }
}

impl<F: CurveFlattener, O: IntersectionOracle> WireCutGenerator<F, O> {
    /// Generator with a host-supplied flattener and intersection oracle
    pub fn with_collaborators(config: Config, flattener: F, oracle: O) -> Self {
        Self {
            config,
            flattener,
            oracle,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate the program for `job`
    pub fn generate(&self, job: &WireCutJob) -> ToolpathResult<Program> {
        self.config.validate()?;
        if self.config.extension_length > 0.0 {
            return Err(ToolpathError::UnsupportedOperation(format!(
                "wire extension ({} mm) is not supported",
                self.config.extension_length
            )));
        }
        if job.is_empty() {
            return Err(ToolpathError::InvalidParameters(
                "job has no segments".to_string(),
            ));
        }

        let plane = self.config.plane.to_cut_plane()?;
        let context = PoseContext::new(plane, self.config.precision(), self.config.angle_tolerance);
        let options = FlattenOptions::from_config(&self.config);
        let mut builder = PoseStreamBuilder::new(context);
        let mut fallback_count = 0;

        for (index, segment) in job.segments.iter().enumerate() {
            debug!(
                "Segment {}: {} as {}",
                index,
                segment.geometry.type_name(),
                segment.kind
            );
            fallback_count += self.append_segment(&mut builder, segment, &options)?;
        }

        let dropped = builder.dropped();
        let table = builder.finish();
        let lines = serializer::render(&table, &self.config);

        info!(
            "Generated {} poses from {} segments ({} duplicates dropped, {} projection fallbacks)",
            table.len(),
            job.segments.len(),
            dropped,
            fallback_count
        );

        Ok(Program {
            table,
            lines,
            fallback_count,
            dropped,
        })
    }

    /// Append one segment's poses. Returns the number of projection fallbacks.
    fn append_segment(
        &self,
        builder: &mut PoseStreamBuilder,
        segment: &JobSegment,
        options: &FlattenOptions,
    ) -> ToolpathResult<usize> {
        match &segment.geometry {
            SegmentGeometry::Single(curve) => {
                let curve = self.flattener.flatten(curve, options)?;
                builder.push_single(&curve, segment.kind)?;
                Ok(0)
            }
            SegmentGeometry::GuideLines(lines) => {
                builder.push_guide_lines(lines, segment.kind)?;
                Ok(0)
            }
            SegmentGeometry::Rails { a, b } => self.append_rails(builder, a, b, segment, options),
        }
    }

    fn append_rails(
        &self,
        builder: &mut PoseStreamBuilder,
        a: &Polyline,
        b: &Polyline,
        segment: &JobSegment,
        options: &FlattenOptions,
    ) -> ToolpathResult<usize> {
        let rail_a = self.flattener.flatten(a, options)?;
        let rail_b = self.flattener.flatten(b, options)?;

        let mut sync = CurveSynchronizer::new(
            &rail_a,
            &rail_b,
            &self.oracle,
            builder.context().plane,
            self.config.tolerance,
        );
        builder.extend_pairs(&mut sync, segment.kind)?;

        debug!(
            "Rails synchronized with {} intersection calls",
            sync.intersection_calls()
        );
        Ok(sync.fallback_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intersection::PlaneIntersection;
    use wirekit_core::{CutPlane, MoveKind, Point3};

    fn rails_job() -> WireCutJob {
        WireCutJob::new(vec![JobSegment::new(SegmentGeometry::Rails {
            a: Polyline::from_coords(&[[0.0, 0.0, 0.0], [1.0, 0.0, 1.0], [2.0, 0.0, 2.0]]).unwrap(),
            b: Polyline::from_coords(&[[0.0, 3.0, 0.0], [2.0, 3.0, 2.0]]).unwrap(),
        })])
    }

    #[test]
    fn test_generate_rails_with_resync() {
        let program = WireCutGenerator::new(Config::default())
            .generate(&rails_job())
            .unwrap();

        // (a0, b0) in sync, a1 drives against b's crossing, (a2, b1) in sync.
        assert_eq!(program.table.len(), 3);
        assert_eq!(program.fallback_count, 0);
        let middle = program.table.poses()[1];
        assert_eq!((middle.x, middle.y, middle.z), (1.0, 1.5, 1.0));
        assert_eq!(middle.angle, 90.0);
        assert_eq!(program.lines.len(), 5);
        assert_eq!(program.lines[2], "G01 X1.00 Z1.00 F200");
        assert_eq!(program.lines[3], "G01 X2.00 Z2.00");
        assert!(program.to_gcode().ends_with("M02\n"));
    }

    #[test]
    fn test_oracle_miss_is_counted() {
        let blind = |_: &Polyline, _: &CutPlane, _: f64| PlaneIntersection::None;
        let generator =
            WireCutGenerator::with_collaborators(Config::default(), PolylineFlattener, blind);
        let program = generator.generate(&rails_job()).unwrap();
        assert_eq!(program.fallback_count, 1);
        // b0 is projected to (0, 3, 1); the pose midpoint keeps y = 1.5.
        assert_eq!(program.table.poses()[1].y, 1.5);
    }

    #[test]
    fn test_overlap_aborts_the_run() {
        let overlapping = |_: &Polyline, _: &CutPlane, _: f64| PlaneIntersection::Overlap;
        let generator =
            WireCutGenerator::with_collaborators(Config::default(), PolylineFlattener, overlapping);
        let err = generator.generate(&rails_job()).unwrap_err();
        assert!(matches!(err, ToolpathError::UnsupportedIntersection(_)));
    }

    #[test]
    fn test_rejected_configurations() {
        let extended = Config {
            extension_length: 5.0,
            ..Config::default()
        };
        let err = WireCutGenerator::new(extended)
            .generate(&rails_job())
            .unwrap_err();
        assert!(matches!(err, ToolpathError::UnsupportedOperation(_)));

        let invalid = Config {
            tolerance: 0.0,
            ..Config::default()
        };
        let err = WireCutGenerator::new(invalid)
            .generate(&rails_job())
            .unwrap_err();
        assert!(matches!(err, ToolpathError::Settings(_)));

        let err = WireCutGenerator::new(Config::default())
            .generate(&WireCutJob::default())
            .unwrap_err();
        assert!(matches!(err, ToolpathError::InvalidParameters(_)));
    }

    #[test]
    fn test_mixed_segments_share_continuity() {
        let job = WireCutJob::new(vec![
            JobSegment::with_kind(
                SegmentGeometry::GuideLines(vec![(
                    Point3::new(0.0, 0.0, -5.0),
                    Point3::new(0.0, 1.0, -5.0),
                )]),
                MoveKind::Rapid,
            ),
            JobSegment::new(SegmentGeometry::Single(
                Polyline::from_coords(&[[0.0, 1.0, 0.0], [0.0, 0.0, 0.0]]).unwrap(),
            )),
        ]);
        let program = WireCutGenerator::new(Config::default())
            .generate(&job)
            .unwrap();

        let poses = program.table.poses();
        assert_eq!(poses.len(), 2);
        assert_eq!(poses[0].angle, 90.0);
        // Reversed line keeps the orientation.
        assert_eq!(poses[1].angle, 90.0);
        assert_eq!(program.lines[1], "G00 X0.00 Y0.50 Z-5.00 Q1=90.00");
        assert_eq!(program.lines[2], "G01 Z0.00 F200");
    }
}
