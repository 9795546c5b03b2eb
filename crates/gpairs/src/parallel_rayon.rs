//! Implements the rayon (thread-pool) backend

use gpairs_nostd_internal::{
    Executor, PairCountSpec, PairHistogramsViewMut, add_assign_slice, bin_total,
};
use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::Error;

/// Drives each phase of a calculation on a rayon thread pool.
///
/// - phase 1 distributes the rows (source points) among the threads. When
///   the targets are split into more than one chunk, the chunks of a row are
///   also processed in parallel and then merged in chunk order.
/// - phase 2 computes the total of each bin in parallel. The totals are
///   collected before row 0 is overwritten, which acts as the barrier between
///   reading the rows and writing the result.
pub struct RayonExecutor {
    // `None` means that we use rayon's global pool
    pool: Option<ThreadPool>,
}

impl RayonExecutor {
    /// Build an executor that runs on `n_threads` threads.
    ///
    /// When `n_threads` is 0, the executor uses rayon's global thread pool
    /// (no pool gets built).
    pub fn new(n_threads: usize) -> Result<Self, Error> {
        if n_threads == 0 {
            return Ok(RayonExecutor { pool: None });
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build()
            .map_err(|err| Error::thread_pool(n_threads, err))?;
        debug!("built a dedicated thread pool with {n_threads} threads");
        Ok(RayonExecutor { pool: Some(pool) })
    }

    /// The number of threads that the work is distributed among
    pub fn n_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl Executor for RayonExecutor {
    fn drive_pair_count(
        &mut self,
        histograms: &mut PairHistogramsViewMut,
        spec: &PairCountSpec,
    ) -> Result<(), &'static str> {
        spec.check_histograms_shape(histograms)?;
        let n_bins = spec.n_bins();
        let n_chunks = spec.n_target_chunks();
        let data = histograms.as_slice_mut();

        self.install(|| {
            let rows = data.par_chunks_exact_mut(n_bins).enumerate();
            if n_chunks == 1 {
                // an unchunked row never touches the scratch buffer
                rows.for_each(|(i_a, row)| spec.fill_row(row, i_a, &mut []));
            } else {
                rows.for_each(|(i_a, row)| {
                    let partials: Vec<Vec<f64>> = (0..n_chunks)
                        .into_par_iter()
                        .map(|chunk_id| {
                            let mut partial = vec![0.0; n_bins];
                            spec.count_target_chunk(&mut partial, i_a, chunk_id);
                            partial
                        })
                        .collect();
                    // merge in chunk order to match the serial backend
                    row.fill(0.0);
                    for partial in partials.iter() {
                        add_assign_slice(row, partial);
                    }
                    spec.finish_row(row);
                });
            }
        });
        Ok(())
    }

    fn drive_row_reduce(
        &mut self,
        histograms: &mut PairHistogramsViewMut,
    ) -> Result<(), &'static str> {
        if histograms.n_rows() < 2 {
            return Ok(());
        }
        let n_bins = histograms.n_bins();
        let totals: Vec<f64> = {
            let histograms = &*histograms;
            self.install(|| {
                (0..n_bins)
                    .into_par_iter()
                    .map(|k| bin_total(histograms, k))
                    .collect()
            })
        };
        histograms.row_mut(0).copy_from_slice(&totals);
        Ok(())
    }
}
