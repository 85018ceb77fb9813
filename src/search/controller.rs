//! Interval controller for parallel bisection.
//!
//! The controller owns the proven-feasible bounds `[lo, hi]` of the
//! boundary value and a set of disjoint, unexplored chunks inside them.
//! Steps are handed out from the widest chunk; results narrow the bounds and
//! clip or discard chunks that fall outside.
//!
//! Invariants:
//! - chunks are pairwise disjoint
//! - every chunk lies within `[lo, hi]`
//! - `lo` never decreases and `hi` never increases
//!
//! The controller itself is not synchronised; callers share it behind a lock.

use tracing::debug;

/// An unexplored sub-range `[start, end]` of candidate steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub start: i64,
    pub end: i64,
}

impl Chunk {
    pub fn new(start: i64, end: i64) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Width used to pick the chunk to split next. Unsigned so that a chunk
    /// covering the whole `i64` range does not overflow.
    pub fn span(&self) -> u64 {
        self.end.abs_diff(self.start)
    }
}

/// Authoritative search state for the binary strategy.
#[derive(Debug, Clone)]
pub struct IntervalController {
    lo: i64,
    hi: i64,
    chunks: Vec<Chunk>,
}

impl IntervalController {
    /// Start with bounds `[hmin, hmax]` and a single chunk spanning them.
    pub fn new(hmin: i64, hmax: i64) -> Self {
        Self {
            lo: hmin,
            hi: hmax,
            chunks: vec![Chunk::new(hmin, hmax)],
        }
    }

    pub fn bounds(&self) -> (i64, i64) {
        (self.lo, self.hi)
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Take the widest chunk and return its midpoint.
    ///
    /// Returns `None` once no chunks remain, or when the midpoint is not a
    /// positive step (step `0` and below are never probed).
    pub fn request_step(&mut self) -> Option<i64> {
        let mut widest: Option<usize> = None;
        for (index, chunk) in self.chunks.iter().enumerate() {
            if widest.is_none_or(|w| chunk.span() > self.chunks[w].span()) {
                widest = Some(index);
            }
        }

        let chunk = self.chunks.swap_remove(widest?);
        // Never past `end`, so this cannot saturate.
        let median = chunk.start.saturating_add_unsigned(chunk.span() / 2);
        if median <= 0 {
            return None;
        }

        if chunk.span() > 1 {
            self.chunks.push(Chunk::new(chunk.start, median - 1));
        }
        if chunk.end != chunk.start {
            self.chunks.push(Chunk::new(median + 1, chunk.end));
        }

        Some(median)
    }

    /// Whether `step` still lies within the proven-feasible bounds.
    pub fn is_step_needed(&self, step: i64) -> bool {
        self.lo <= step && step <= self.hi
    }

    /// Record the predicate value observed at `step`.
    ///
    /// A verified step raises `lo`; a violation lowers `hi`. Reports for
    /// steps outside the bounds are stale and ignored. Returns whether the
    /// report was applied.
    pub fn report_result(&mut self, step: i64, predicate_true: bool) -> bool {
        if !self.is_step_needed(step) {
            return false;
        }

        if predicate_true {
            if step > self.lo {
                self.lo = step;
            }
        } else if step < self.hi {
            self.hi = step;
        }

        let (lo, hi) = (self.lo, self.hi);
        self.chunks.retain_mut(|chunk| {
            if chunk.start > hi || chunk.end < lo {
                return false;
            }
            chunk.start = chunk.start.max(lo);
            chunk.end = chunk.end.min(hi);
            true
        });

        debug!(
            step,
            predicate_true,
            lo,
            hi,
            chunks = self.chunks.len(),
            "bounds updated"
        );
        true
    }
}
