//! Implements the "serial" backend

use gpairs_nostd_internal::{
    Executor, PairCountSpec, PairHistogramsViewMut, reduce_rows_into_first,
};

/// Drives each phase of a calculation, one row (or one bin) at a time, on the
/// calling thread.
///
/// The work is decomposed in exactly the same way as in the parallel backend,
/// so the results are bitwise identical.
pub struct SerialExecutor;

impl Executor for SerialExecutor {
    fn drive_pair_count(
        &mut self,
        histograms: &mut PairHistogramsViewMut,
        spec: &PairCountSpec,
    ) -> Result<(), &'static str> {
        spec.check_histograms_shape(histograms)?;

        // only used when the targets are split into chunks
        let mut scratch = vec![0.0; spec.n_bins()];
        for (i_a, row) in histograms.rows_mut().enumerate() {
            spec.fill_row(row, i_a, &mut scratch);
        }
        Ok(())
    }

    fn drive_row_reduce(
        &mut self,
        histograms: &mut PairHistogramsViewMut,
    ) -> Result<(), &'static str> {
        reduce_rows_into_first(histograms);
        Ok(())
    }
}
