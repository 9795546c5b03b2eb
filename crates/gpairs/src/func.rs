//! Define API functions to actually drive the calculation
//!
//! Every entry point funnels into [`compute_pair_histogram`], which:
//! 1. validates all of the arguments (before doing any work),
//! 2. allocates the private per-point histograms,
//! 3. has an [`Executor`] fill the private histograms (phase 1) and reduce
//!    them into a single histogram (phase 2),
//! 4. copies the single histogram into the caller's buffer.
//!
//! The private histograms are freshly allocated in every call and discarded
//! afterwards. Only the caller's buffer survives.

use gpairs_nostd_internal::{
    Executor, PairCountSpec, PairHistogramsViewMut, PointSet, SquaredRadialEdges,
};
use log::{debug, trace};
use ndarray::Array2;

use crate::{Backend, Error, RayonExecutor, RuntimeSpec, SerialExecutor};

/// Compute the cumulative weighted pair-count histogram between `points_a`
/// and `points_b`, and write it into `results`.
///
/// Every ordered pair `(i, j)`, where `i` indexes `points_a` and `j` indexes
/// `points_b`, contributes `w_a[i] * w_b[j]` to every bin `k` where the
/// squared separation doesn't exceed `squared_edges[k]`. When `points_a` and
/// `points_b` are the same, the self-pairs (separation 0) are included.
///
/// Only the first `squared_edges.len()` entries of `results` are written.
/// They are overwritten (rather than accumulated).
///
/// # Errors
/// Fails, before doing any work, if:
/// - `squared_edges` is empty, unsorted, or holds negative or non-finite
///   values,
/// - `results` is shorter than `squared_edges`,
/// - the point sets hold different numbers of points,
/// - a dedicated thread pool can't be built.
pub fn compute_pair_histogram(
    points_a: PointSet,
    points_b: PointSet,
    squared_edges: &[f64],
    results: &mut [f64],
    runtime: &RuntimeSpec,
) -> Result<(), Error> {
    let edges = SquaredRadialEdges::new(squared_edges)
        .map_err(|what| Error::bin_edge("squared bin edges", what))?;
    let n_bins = edges.n_bins();
    if results.len() < n_bins {
        return Err(Error::array_length("results", n_bins, results.len()));
    } else if points_a.n_points() != points_b.n_points() {
        return Err(Error::point_set_length(
            points_a.n_points(),
            points_b.n_points(),
        ));
    }

    let spec = PairCountSpec::new(
        points_a,
        points_b,
        edges,
        runtime.n_target_chunks(),
        runtime.scan(),
    )
    .map_err(Error::internal_legacy_adhoc)?;

    let n_points = spec.n_points();
    debug!(
        "counting pairs among {n_points} x {n_points} points in {n_bins} bins with {:?}",
        runtime
    );

    // allocate per-point private histograms
    let mut private_histograms = Array2::<f64>::zeros((n_points, n_bins));
    let mut histograms = PairHistogramsViewMut::from_array_view(private_histograms.view_mut())
        .map_err(Error::internal_legacy_adhoc)?;

    match runtime.backend() {
        Backend::Serial => drive_phases(&mut SerialExecutor, &mut histograms, &spec)?,
        Backend::Rayon { n_threads } => {
            drive_phases(&mut RayonExecutor::new(n_threads)?, &mut histograms, &spec)?
        }
    }

    if n_points == 0 {
        results[..n_bins].fill(0.0);
    } else {
        results[..n_bins].copy_from_slice(histograms.row(0));
    }
    Ok(())
}

fn drive_phases(
    executor: &mut impl Executor,
    histograms: &mut PairHistogramsViewMut,
    spec: &PairCountSpec,
) -> Result<(), Error> {
    executor
        .drive_pair_count(histograms, spec)
        .map_err(Error::internal_legacy_adhoc)?;
    trace!("filled {} private histograms", histograms.n_rows());

    executor
        .drive_row_reduce(histograms)
        .map_err(Error::internal_legacy_adhoc)?;
    trace!("reduced the private histograms");
    Ok(())
}

/// Like [`compute_pair_histogram`], but allocates and returns the histogram.
pub fn pair_histogram(
    points_a: PointSet,
    points_b: PointSet,
    squared_edges: &[f64],
    runtime: &RuntimeSpec,
) -> Result<Vec<f64>, Error> {
    let mut results = vec![0.0; squared_edges.len()];
    compute_pair_histogram(points_a, points_b, squared_edges, &mut results, runtime)?;
    Ok(results)
}

/// Compute the cumulative weighted pair-count histogram from flat arrays.
///
/// The first `nopt` entries of `x1`, `y1`, `z1`, `w1` describe the first
/// point set and the first `nopt` entries of `x2`, `y2`, `z2`, `w2` describe
/// the second. `rbins_squared` holds the `nbins` squared radial edges and the
/// histogram is written to the first `nbins` entries of `results`. The
/// calculation uses the default [`RuntimeSpec`].
///
/// # Errors
/// In addition to the errors of [`compute_pair_histogram`], this fails if
/// `nbins` is 0, if `rbins_squared` doesn't hold exactly `nbins` entries, or
/// if any coordinate/weight array holds fewer than `nopt` entries.
#[allow(clippy::too_many_arguments)]
pub fn gpairs(
    nopt: usize,
    nbins: usize,
    x1: &[f64],
    y1: &[f64],
    z1: &[f64],
    w1: &[f64],
    x2: &[f64],
    y2: &[f64],
    z2: &[f64],
    w2: &[f64],
    rbins_squared: &[f64],
    results: &mut [f64],
) -> Result<(), Error> {
    if nbins == 0 || rbins_squared.len() != nbins {
        return Err(Error::bin_count(nbins, rbins_squared.len()));
    } else if results.len() < nbins {
        return Err(Error::array_length("results", nbins, results.len()));
    }

    let arrays = [
        ("x1", x1),
        ("y1", y1),
        ("z1", z1),
        ("w1", w1),
        ("x2", x2),
        ("y2", y2),
        ("z2", z2),
        ("w2", w2),
    ];
    for (name, array) in arrays {
        if array.len() < nopt {
            return Err(Error::array_length(name, nopt, array.len()));
        }
    }

    let points_a = PointSet::new(&x1[..nopt], &y1[..nopt], &z1[..nopt], &w1[..nopt])
        .map_err(Error::internal_legacy_adhoc)?;
    let points_b = PointSet::new(&x2[..nopt], &y2[..nopt], &z2[..nopt], &w2[..nopt])
        .map_err(Error::internal_legacy_adhoc)?;
    compute_pair_histogram(
        points_a,
        points_b,
        rbins_squared,
        results,
        &RuntimeSpec::default(),
    )
}
