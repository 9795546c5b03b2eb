/// Converts a differential histogram into a cumulative histogram, in place.
///
/// Afterwards, `row[k]` holds the sum of the original `row[0..=k]`. This is a
/// plain running sum.
#[inline]
pub fn differential_to_cumulative(row: &mut [f64]) {
    let mut running_total = 0.0;
    for val in row.iter_mut() {
        running_total += *val;
        *val = running_total;
    }
}

/// Converts a differential histogram into a cumulative histogram, in place,
/// by propagating every bin into each bin that lies outside of it.
///
/// The outer loop visits bins from the second-to-last bin inward, which
/// guarantees that `row[j]` still holds its differential value at the time
/// it gets added to the bins beyond it. This performs `O(n_bins²)` additions.
/// The result matches [`differential_to_cumulative`] up to floating-point
/// rounding (the terms of each bin are summed in a different order).
pub fn differential_to_cumulative_pairwise(row: &mut [f64]) {
    let n_bins = row.len();
    if n_bins < 2 {
        return;
    }
    for j in (0..(n_bins - 1)).rev() {
        for k in (j + 1)..n_bins {
            row[k] += row[j];
        }
    }
}

/// elementwise addition of `other` into `accum`
#[inline]
pub fn add_assign_slice(accum: &mut [f64], other: &[f64]) {
    for (a, b) in accum.iter_mut().zip(other.iter()) {
        *a += *b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_sum() {
        let mut row = [1.0, 2.0, 0.0, 4.0];
        differential_to_cumulative(&mut row);
        assert_eq!(row, [1.0, 3.0, 3.0, 7.0]);
    }

    #[test]
    fn pairwise_matches_running_sum() {
        // integer values keep the additions exact, so we can compare bitwise
        let differential = [3.0, 0.0, 5.0, 1.0, 2.0, 7.0];
        let mut linear = differential;
        let mut pairwise = differential;
        differential_to_cumulative(&mut linear);
        differential_to_cumulative_pairwise(&mut pairwise);
        assert_eq!(linear, pairwise);
        assert_eq!(linear, [3.0, 3.0, 8.0, 9.0, 11.0, 18.0]);
    }

    #[test]
    fn short_rows() {
        let mut empty: [f64; 0] = [];
        differential_to_cumulative(&mut empty);
        differential_to_cumulative_pairwise(&mut empty);

        let mut single = [4.5];
        differential_to_cumulative(&mut single);
        assert_eq!(single, [4.5]);
        differential_to_cumulative_pairwise(&mut single);
        assert_eq!(single, [4.5]);
    }

    #[test]
    fn add_slices() {
        let mut accum = [1.0, 2.0];
        add_assign_slice(&mut accum, &[0.5, 0.25]);
        assert_eq!(accum, [1.5, 2.25]);
    }
}
