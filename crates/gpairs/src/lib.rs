/*!
Provides parallelized routines for directly computing weighted pair-count
histograms between 2 sets of points in 3D space (the "gpairs" calculation).

# High-Level: Pair Counts

Pair counts are the building block of
[two-point correlation function](https://en.wikipedia.org/wiki/Correlation_function_(astronomy))
estimators. For every ordered pair of points `(i, j)`, with `i` taken from
the first point set and `j` taken from the second, we compute the squared
separation and add the product of the point weights to every radial bin whose
(squared) outer edge is at least as large as the squared separation. The
result is a *cumulative* histogram: bin `k` holds the total weight of all
pairs separated by no more than `sqrt(rbins_squared[k])`.

The calculation is brute-force: every pair is considered.

# User Guide

```
use gpairs::{PointSet, RuntimeSpec, pair_histogram};

let x = [0.0, 1.0];
let zeros = [0.0, 0.0];
let weights = [1.0, 1.0];
let points = PointSet::new(&x, &zeros, &zeros, &weights).unwrap();

// the pairs are separated by 0 and 1. Separations equal to an edge belong to
// the inner bin
let hist = pair_histogram(points, points, &[1.0, 4.0], &RuntimeSpec::serial()).unwrap();
assert_eq!(hist, vec![4.0, 4.0]);
```

Results may differ at the level of floating-point rounding between different
[`RuntimeSpec`]s, so comparisons against reference values should use a
tolerance.

# Developer Guide

The kernels live in `gpairs_nostd_internal`, which doesn't depend on the
standard library. This crate provides the parallelism backends (see
[`Executor`]), error handling, and the public entry points.

*/

#![deny(rustdoc::broken_intra_doc_links)]

// inform build-system of the crates in this package
mod bins;
mod error;
mod func;
mod parallel_rayon;
mod parallel_serial;
mod runtime;

// pull in symbols that visible outside of the package
pub use bins::{log_spaced_squared_edges, squared_edges_from_radii};
pub use error::Error;
pub use func::{compute_pair_histogram, gpairs, pair_histogram};
pub use gpairs_nostd_internal::{
    CumulativeScan, Executor, PairCountSpec, PairHistogramsViewMut, PointSet,
    SquaredRadialEdges, classify_squared_distance,
};
pub use parallel_rayon::RayonExecutor;
pub use parallel_serial::SerialExecutor;
pub use runtime::{Backend, RuntimeSpec};
