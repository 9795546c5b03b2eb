//! Our parallelism abstractions for pair counting.
//!
//! A pair count is carried out in 2 phases that are separated by a barrier:
//!
//! 1. every source point `i` of `points_a` fills its own private histogram
//!    (row `i` of a [`PairHistogramsViewMut`]) with the cumulative weighted
//!    pair counts between `i` and all of the points of `points_b`.
//! 2. the private histograms are combined so that row 0 holds the total.
//!
//! No 2 source points ever touch the same row during phase 1, so the rows can
//! be filled simultaneously without any synchronization. Phase 2 is
//! independent for each bin.
//!
//! A [`PairCountSpec`] describes *what* gets computed. Types implementing
//! [`Executor`] decide *how* the work is scheduled. We require that all
//! executors perform the same floating-point operations in the same order, so
//! that a given [`PairCountSpec`] produces bitwise identical results for any
//! backend.
//!
//! # Splitting the target points
//! When there are only a handful of source points, there may not be enough
//! rows to keep every thread busy. To help with this, the target points can
//! be split into `n_target_chunks` contiguous chunks. Each chunk accumulates a
//! separate partial (differential) histogram and the partials are added to
//! the row in chunk order before the row is made cumulative. The chunking
//! affects the order of additions, so different chunkings agree only up to
//! floating-point rounding.

use crate::apply_points::{PointSet, count_pairs_for_targets, count_pairs_into_row};
use crate::bins::SquaredRadialEdges;
use crate::misc::{
    add_assign_slice, differential_to_cumulative, differential_to_cumulative_pairwise,
};
use crate::state::PairHistogramsViewMut;
use core::num::NonZeroUsize;

/// Specifies how a differential histogram is converted into a cumulative
/// histogram.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CumulativeScan {
    /// a single running sum (`O(n_bins)` additions)
    #[default]
    Linear,
    /// propagate each bin into every bin beyond it (`O(n_bins²)` additions).
    ///
    /// This reproduces the order of additions used by the classic gpairs
    /// benchmark kernel.
    Pairwise,
}

impl CumulativeScan {
    #[inline]
    pub fn apply(self, row: &mut [f64]) {
        match self {
            CumulativeScan::Linear => differential_to_cumulative(row),
            CumulativeScan::Pairwise => differential_to_cumulative_pairwise(row),
        }
    }
}

/// Describes a single pair-counting calculation.
///
/// All error-checking happens during construction so that none of the
/// methods used by the executors have to do any error-handling.
#[derive(Clone, Copy, Debug)]
pub struct PairCountSpec<'a> {
    points_a: PointSet<'a>,
    points_b: PointSet<'a>,
    edges: SquaredRadialEdges<'a>,
    n_target_chunks: NonZeroUsize,
    scan: CumulativeScan,
}

impl<'a> PairCountSpec<'a> {
    pub fn new(
        points_a: PointSet<'a>,
        points_b: PointSet<'a>,
        edges: SquaredRadialEdges<'a>,
        n_target_chunks: NonZeroUsize,
        scan: CumulativeScan,
    ) -> Result<PairCountSpec<'a>, &'static str> {
        // we may want to relax this in the future. For now, the source and
        // target points always share a length
        if points_a.n_points() != points_b.n_points() {
            Err("points_a and points_b must hold the same number of points")
        } else {
            Ok(Self {
                points_a,
                points_b,
                edges,
                n_target_chunks,
                scan,
            })
        }
    }

    /// The number of source points (and therefore the number of rows of the
    /// private histograms)
    pub fn n_points(&self) -> usize {
        self.points_a.n_points()
    }

    pub fn n_bins(&self) -> usize {
        self.edges.n_bins()
    }

    pub fn n_target_chunks(&self) -> usize {
        self.n_target_chunks.get()
    }

    pub fn scan(&self) -> CumulativeScan {
        self.scan
    }

    /// Check that `histograms` has a row for every source point and a column
    /// for every bin.
    pub fn check_histograms_shape(
        &self,
        histograms: &PairHistogramsViewMut,
    ) -> Result<(), &'static str> {
        if histograms.n_rows() != self.n_points() {
            Err("the private histograms must have a row for every source point")
        } else if histograms.n_bins() != self.n_bins() {
            Err("the private histograms must have a column for every bin")
        } else {
            Ok(())
        }
    }

    /// the half-open range of target indices in the chunk with `chunk_id`
    ///
    /// The targets are split as evenly as possible. The first
    /// `n_points % n_target_chunks` chunks hold one extra point.
    pub fn target_chunk_bounds(&self, chunk_id: usize) -> (usize, usize) {
        let n_chunks = self.n_target_chunks.get();
        let n_targets = self.points_b.n_points();
        let base = n_targets / n_chunks;
        let remainder = n_targets % n_chunks;
        let start = chunk_id * base + chunk_id.min(remainder);
        let stop = start + base + usize::from(chunk_id < remainder);
        (start, stop)
    }

    /// Add the differential contributions of the targets in a single chunk to
    /// `partial`.
    pub fn count_target_chunk(&self, partial: &mut [f64], i_a: usize, chunk_id: usize) {
        let (start, stop) = self.target_chunk_bounds(chunk_id);
        count_pairs_for_targets(
            partial,
            &self.points_a,
            i_a,
            &self.points_b,
            start,
            stop,
            self.edges.as_slice(),
        );
    }

    /// Make a row (holding the merged differential counts) cumulative
    #[inline]
    pub fn finish_row(&self, row: &mut [f64]) {
        self.scan.apply(row);
    }

    /// Overwrite `row` with the cumulative histogram of source point `i_a`.
    ///
    /// `scratch` must have space for `n_bins` entries when the targets are
    /// split into more than 1 chunk. Otherwise it is ignored (and may be
    /// empty).
    pub fn fill_row(&self, row: &mut [f64], i_a: usize, scratch: &mut [f64]) {
        row.fill(0.0);
        if self.n_target_chunks.get() == 1 {
            count_pairs_into_row(
                row,
                &self.points_a,
                i_a,
                &self.points_b,
                self.edges.as_slice(),
            );
        } else {
            for chunk_id in 0..self.n_target_chunks.get() {
                scratch.fill(0.0);
                self.count_target_chunk(scratch, i_a, chunk_id);
                add_assign_slice(row, scratch);
            }
        }
        self.finish_row(row);
    }
}

/// a trait for expressing how to launch the phases of a pair count
///
/// The idea is that we implement this for each parallelism "backend," so we
/// have a uniform interface for easily switching between backends.
///
/// An implementation must not return from [`Executor::drive_pair_count`]
/// until every row is finished. This is the barrier between the phases.
pub trait Executor {
    /// Fill every row of `histograms` with the cumulative histogram of the
    /// corresponding source point.
    fn drive_pair_count(
        &mut self,
        histograms: &mut PairHistogramsViewMut,
        spec: &PairCountSpec,
    ) -> Result<(), &'static str>;

    /// Combine the rows of `histograms` so that row 0 holds the total.
    fn drive_row_reduce(&mut self, histograms: &mut PairHistogramsViewMut)
    -> Result<(), &'static str>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_points<'a>(x: &'a [f64], zeros: &'a [f64], w: &'a [f64]) -> PointSet<'a> {
        PointSet::new(x, zeros, zeros, w).unwrap()
    }

    #[test]
    fn mismatched_point_sets() {
        let zeros = [0.0; 3];
        let ones = [1.0; 3];
        let points_a = line_points(&zeros, &zeros, &ones);
        let points_b = line_points(&zeros[..2], &zeros[..2], &ones[..2]);
        let edges = SquaredRadialEdges::new(&[1.0]).unwrap();
        let one = NonZeroUsize::new(1).unwrap();
        assert!(
            PairCountSpec::new(points_a, points_b, edges, one, CumulativeScan::Linear).is_err()
        );
        assert!(
            PairCountSpec::new(points_a, points_a, edges, one, CumulativeScan::Linear).is_ok()
        );
    }

    #[test]
    fn chunk_bounds_cover_targets() {
        let x = [0.0; 7];
        let w = [1.0; 7];
        let points = line_points(&x, &x, &w);
        let edges = SquaredRadialEdges::new(&[1.0]).unwrap();
        for n_chunks in 1..10 {
            let spec = PairCountSpec::new(
                points,
                points,
                edges,
                NonZeroUsize::new(n_chunks).unwrap(),
                CumulativeScan::Linear,
            )
            .unwrap();
            let mut expected_start = 0;
            for chunk_id in 0..n_chunks {
                let (start, stop) = spec.target_chunk_bounds(chunk_id);
                assert_eq!(start, expected_start);
                assert!(stop >= start);
                assert!(stop - start <= 7_usize.div_ceil(n_chunks));
                expected_start = stop;
            }
            assert_eq!(expected_start, 7);
        }
    }

    #[test]
    fn fill_row_chunked_and_unchunked() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let zeros = [0.0; 5];
        let w = [1.0; 5];
        let points = line_points(&x, &zeros, &w);
        let squared_edges = [1.0, 4.0, 9.0];
        let edges = SquaredRadialEdges::new(&squared_edges).unwrap();

        let mut scratch = [0.0; 3];
        for n_chunks in [1, 2, 3, 8] {
            let spec = PairCountSpec::new(
                points,
                points,
                edges,
                NonZeroUsize::new(n_chunks).unwrap(),
                CumulativeScan::Linear,
            )
            .unwrap();

            // start with garbage to confirm that the row gets overwritten
            let mut row = [7.0; 3];
            spec.fill_row(&mut row, 0, &mut scratch);
            // the point at x=0 sees itself & x=1 inside r=1, then x=2 & x=3
            assert_eq!(row, [2.0, 3.0, 4.0]);

            spec.fill_row(&mut row, 2, &mut scratch);
            assert_eq!(row, [3.0, 5.0, 5.0]);
        }
    }

    #[test]
    fn fill_row_unchunked_without_scratch() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let zeros = [0.0; 5];
        let w = [1.0; 5];
        let points = line_points(&x, &zeros, &w);
        let edges = SquaredRadialEdges::new(&[1.0, 4.0, 9.0]).unwrap();
        let spec =
            PairCountSpec::new(points, points, edges, NonZeroUsize::MIN, CumulativeScan::Linear)
                .unwrap();

        let mut row = [7.0; 3];
        spec.fill_row(&mut row, 2, &mut []);
        assert_eq!(row, [3.0, 5.0, 5.0]);
    }

    #[test]
    fn scans_agree() {
        let mut linear = [1.0, 0.5, 0.25, 2.0];
        let mut pairwise = linear;
        CumulativeScan::Linear.apply(&mut linear);
        CumulativeScan::Pairwise.apply(&mut pairwise);
        assert_eq!(linear, pairwise);
    }
}
