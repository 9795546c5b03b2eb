// this defines the utilities used to combine the private histograms of every
// source point into a single histogram.
//
// Every backend should go through `bin_total` so that the order of the
// floating-point additions (and consequently the result) is identical
// regardless of how the work is scheduled.

use crate::state::PairHistogramsViewMut;

/// Sum bin `k` over every row of `histograms`.
///
/// The rows are summed in ascending order, starting from row 0. Returns 0 when
/// there are no rows.
#[inline]
pub fn bin_total(histograms: &PairHistogramsViewMut, k: usize) -> f64 {
    let n_rows = histograms.n_rows();
    if n_rows == 0 {
        return 0.0;
    }
    let mut total = histograms.get(0, k);
    for i in 1..n_rows {
        total += histograms.get(i, k);
    }
    total
}

/// Consolidates the histograms so that row 0 holds the sum of every row.
///
/// This makes no guarantees about the contents of the other rows afterwards
/// (currently they are untouched). When there are 0 or 1 rows, this does
/// nothing.
pub fn reduce_rows_into_first(histograms: &mut PairHistogramsViewMut) {
    if histograms.n_rows() < 2 {
        return;
    }
    for k in 0..histograms.n_bins() {
        let total = bin_total(histograms, k);
        histograms.row_mut(0)[k] = total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduce_several_rows() {
        #[rustfmt::skip]
        let mut buf = [
            1.0, 2.0, 3.0,
            0.0, 1.0, 1.0,
            4.0, 4.0, 5.0,
        ];
        let mut hist = PairHistogramsViewMut::from_slice(&mut buf, 3, 3).unwrap();
        assert_eq!(bin_total(&hist, 2), 9.0);
        reduce_rows_into_first(&mut hist);
        assert_eq!(hist.row(0), &[5.0, 7.0, 9.0]);
    }

    #[test]
    fn reduce_trivial() {
        let mut single = [1.0, 2.0];
        let mut hist = PairHistogramsViewMut::from_slice(&mut single, 1, 2).unwrap();
        reduce_rows_into_first(&mut hist);
        assert_eq!(hist.row(0), &[1.0, 2.0]);

        let mut empty: [f64; 0] = [];
        let mut hist = PairHistogramsViewMut::from_slice(&mut empty, 0, 2).unwrap();
        assert_eq!(bin_total(&hist, 1), 0.0);
        reduce_rows_into_first(&mut hist);
    }
}
