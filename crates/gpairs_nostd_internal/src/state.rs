use core::slice::ChunksExactMut;
use ndarray::ArrayViewMut2;

/// Represents the private histograms of a pair-counting calculation.
///
/// The histograms are laid out as a row-major `(n_rows, n_bins)` array, where
/// row `i` is the histogram that is exclusively owned by source point `i`.
///
/// # Note
/// We wrap a slice (rather than an `ArrayViewMut2`) so that the rows can be
/// handed out as plain `&mut [f64]`, which is what the kernels and the
/// parallel backends want. Construction from an `ArrayViewMut2` is still
/// supported since that's how buffers are usually allocated.
pub struct PairHistogramsViewMut<'a> {
    data: &'a mut [f64],
    n_rows: usize,
    n_bins: usize,
}

impl<'a> PairHistogramsViewMut<'a> {
    pub fn from_slice(
        data: &'a mut [f64],
        n_rows: usize,
        n_bins: usize,
    ) -> Result<Self, &'static str> {
        if n_bins == 0 {
            Err("the private histograms must have at least 1 bin")
        } else if n_rows.checked_mul(n_bins) != Some(data.len()) {
            Err("the private histogram buffer doesn't have n_rows * n_bins entries")
        } else {
            Ok(Self {
                data,
                n_rows,
                n_bins,
            })
        }
    }

    /// wrap an array view with shape `(n_rows, n_bins)`. The view must be in
    /// standard (row-major, contiguous) layout.
    pub fn from_array_view(array_view: ArrayViewMut2<'a, f64>) -> Result<Self, &'static str> {
        let (n_rows, n_bins) = array_view.dim();
        match array_view.into_slice() {
            Some(data) => Self::from_slice(data, n_rows, n_bins),
            None => Err("the private histograms must be contiguous and in row-major order"),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n_bins..(i + 1) * self.n_bins]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.n_bins..(i + 1) * self.n_bins]
    }

    /// iterate over the mutable rows (in order)
    pub fn rows_mut(&mut self) -> ChunksExactMut<'_, f64> {
        self.data.chunks_exact_mut(self.n_bins)
    }

    /// the entry of row `i` at bin `k`
    #[inline(always)]
    pub fn get(&self, i: usize, k: usize) -> f64 {
        self.data[i * self.n_bins + k]
    }

    /// direct access to the underlying buffer
    pub fn as_slice_mut(&mut self) -> &mut [f64] {
        &mut self.data[..]
    }
}
