//! Motion table assembly.
//!
//! The builder owns the continuity state and the motion table of one run.
//! Each incoming point pair becomes a pose tagged with the caller's move kind;
//! a pose within tolerance of the previous entry on all four axes is dropped
//! so the axes never receive zero-length moves.

use crate::error::ToolpathResult;
use crate::pose::{calculate_pose, PoseContext};
use crate::synchronizer::SyncPair;
use tracing::debug;
use wirekit_core::{ContinuityState, MotionTable, MoveKind, Point3, Polyline};

/// Incrementally builds the motion table of a single run
#[derive(Debug, Clone)]
pub struct PoseStreamBuilder {
    context: PoseContext,
    continuity: ContinuityState,
    table: MotionTable,
    dropped: usize,
}

impl PoseStreamBuilder {
    pub fn new(context: PoseContext) -> Self {
        Self {
            context,
            continuity: ContinuityState::default(),
            table: MotionTable::new(),
            dropped: 0,
        }
    }

    /// Append the pose for `(p0, p1)`. Returns `false` if it was a near-duplicate.
    pub fn push_pair(&mut self, p0: &Point3, p1: &Point3, kind: MoveKind) -> ToolpathResult<bool> {
        let (pose, continuity) = calculate_pose(p0, p1, self.continuity, &self.context, kind)?;
        self.continuity = continuity;

        let kept = self
            .table
            .push_deduplicated(pose, self.context.precision.tolerance());
        if !kept {
            self.dropped += 1;
        }
        Ok(kept)
    }

    /// Consume a stream of synchronized pairs. Returns the number of poses kept.
    ///
    /// Stops at the first error; poses appended before it stay in the builder,
    /// which callers discard along with the run.
    pub fn extend_pairs<I>(&mut self, pairs: I, kind: MoveKind) -> ToolpathResult<usize>
    where
        I: IntoIterator<Item = ToolpathResult<SyncPair>>,
    {
        let mut kept = 0;
        let mut seen = 0;
        for pair in pairs {
            let pair = pair?;
            seen += 1;
            if self.push_pair(&pair.a, &pair.b, kind)? {
                kept += 1;
            }
        }
        debug!("Appended {} of {} synchronized pairs as {}", kept, seen, kind);
        Ok(kept)
    }

    /// Single-curve segment: one pose spanning the curve's start and end points
    pub fn push_single(&mut self, curve: &Polyline, kind: MoveKind) -> ToolpathResult<bool> {
        self.push_pair(&curve.start(), &curve.end(), kind)
    }

    /// Explicit guide lines: one pose per line. Returns the number kept.
    pub fn push_guide_lines(
        &mut self,
        lines: &[(Point3, Point3)],
        kind: MoveKind,
    ) -> ToolpathResult<usize> {
        let mut kept = 0;
        for (start, end) in lines {
            if self.push_pair(start, end, kind)? {
                kept += 1;
            }
        }
        debug!("Appended {} of {} guide lines as {}", kept, lines.len(), kind);
        Ok(kept)
    }

    pub fn context(&self) -> &PoseContext {
        &self.context
    }

    pub fn continuity(&self) -> ContinuityState {
        self.continuity
    }

    pub fn table(&self) -> &MotionTable {
        &self.table
    }

    /// Poses dropped as near-duplicates so far
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn finish(self) -> MotionTable {
        self.table
    }
}
