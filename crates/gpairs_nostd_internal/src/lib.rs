/*!
The `no_std` core of the `gpairs` crate.

This crate holds the pair-counting kernel, the differential-to-cumulative
conversion of the per-point histograms, and the reduction of those histograms
into a single histogram. It also defines the [`Executor`] trait that the
parallelism backends (which live in the `gpairs` crate) implement.

Errors are currently reported as `&'static str`. The `gpairs` crate wraps them
in a proper error type.
*/
#![no_std]
mod apply_points;
mod bins;
mod misc;
mod parallel;
mod reduce_utils;
mod state;

pub use apply_points::{
    PointSet, count_pairs_for_targets, count_pairs_into_row, squared_separation,
};
pub use bins::{SquaredRadialEdges, classify_squared_distance};
pub use misc::{
    add_assign_slice, differential_to_cumulative, differential_to_cumulative_pairwise,
};
pub use parallel::{CumulativeScan, Executor, PairCountSpec};
pub use reduce_utils::{bin_total, reduce_rows_into_first};
pub use state::PairHistogramsViewMut;
