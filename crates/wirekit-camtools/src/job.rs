//! Wire cut job description.
//!
//! A job is an ordered list of segments. Each segment is one of:
//!
//! - `single`: one curve, cut as a single pose between its ends
//! - `guide_lines`: explicit wire positions, one pose per line
//! - `rails`: two curves the wire is swept along
//!
//! Jobs are read from JSON:
//!
//! ```json
//! {
//!   "segments": [
//!     { "type": "rails", "kind": "drive",
//!       "curve_a": [[0, 0, 0], [0, 1, 1]],
//!       "curve_b": [[0, 0, 5], [0, 1, 6]] }
//!   ]
//! }
//! ```
//!
//! `kind` is optional; single curves default to `cut` and the two swept
//! segment types to `drive`.

use crate::error::{ToolpathError, ToolpathResult};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;
use wirekit_core::{MoveKind, Point3, Polyline};

/// Geometry of one job segment
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentGeometry {
    Single(Polyline),
    GuideLines(Vec<(Point3, Point3)>),
    Rails { a: Polyline, b: Polyline },
}

impl SegmentGeometry {
    /// Classification used when the job does not give one
    pub fn default_kind(&self) -> MoveKind {
        match self {
            Self::Single(_) => MoveKind::Cut,
            Self::GuideLines(_) | Self::Rails { .. } => MoveKind::Drive,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Single(_) => "single",
            Self::GuideLines(_) => "guide_lines",
            Self::Rails { .. } => "rails",
        }
    }
}

/// One segment together with the classification of its poses
#[derive(Debug, Clone, PartialEq)]
pub struct JobSegment {
    pub geometry: SegmentGeometry,
    pub kind: MoveKind,
}

impl JobSegment {
    /// Segment with the default classification for its geometry
    pub fn new(geometry: SegmentGeometry) -> Self {
        let kind = geometry.default_kind();
        Self { geometry, kind }
    }

    pub fn with_kind(geometry: SegmentGeometry, kind: MoveKind) -> Self {
        Self { geometry, kind }
    }
}

/// Ordered list of segments making up one program
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireCutJob {
    pub segments: Vec<JobSegment>,
}

impl WireCutJob {
    pub fn new(segments: Vec<JobSegment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn from_json_str(content: &str) -> ToolpathResult<Self> {
        let raw: RawJob = serde_json::from_str(content)?;
        let segments = raw
            .segments
            .ok_or_else(|| missing("segments"))?
            .into_iter()
            .map(RawSegment::into_segment)
            .collect::<ToolpathResult<Vec<_>>>()?;
        debug!("Parsed job with {} segments", segments.len());
        Ok(Self { segments })
    }

    pub fn load_from_file(path: &Path) -> ToolpathResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

#[derive(Debug, Deserialize)]
struct RawJob {
    segments: Option<Vec<RawSegment>>,
}

#[derive(Debug, Deserialize)]
struct RawSegment {
    #[serde(rename = "type")]
    segment_type: Option<String>,
    kind: Option<MoveKind>,
    curve: Option<Polyline>,
    lines: Option<Vec<[[f64; 3]; 2]>>,
    curve_a: Option<Polyline>,
    curve_b: Option<Polyline>,
}

impl RawSegment {
    fn into_segment(self) -> ToolpathResult<JobSegment> {
        let segment_type = self.segment_type.ok_or_else(|| missing("type"))?;
        let geometry = match segment_type.as_str() {
            "single" => {
                SegmentGeometry::Single(self.curve.ok_or_else(|| missing("curve"))?)
            }
            "guide_lines" => {
                let lines = self.lines.ok_or_else(|| missing("lines"))?;
                SegmentGeometry::GuideLines(
                    lines
                        .iter()
                        .map(|[start, end]| (Point3::from(*start), Point3::from(*end)))
                        .collect(),
                )
            }
            "rails" => {
                let a = self.curve_a.ok_or_else(|| missing("curve_a"))?;
                let b = self.curve_b.ok_or_else(|| missing("curve_b"))?;
                SegmentGeometry::Rails { a, b }
            }
            other => {
                return Err(ToolpathError::InvalidParameters(format!(
                    "unknown segment type '{}'",
                    other
                )))
            }
        };

        Ok(match self.kind {
            Some(kind) => JobSegment::with_kind(geometry, kind),
            None => JobSegment::new(geometry),
        })
    }
}

fn missing(field: &str) -> ToolpathError {
    ToolpathError::MissingInputField(field.to_string())
}
