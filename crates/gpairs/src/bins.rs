//! Helpers for building squared radial bin edges.

use crate::Error;

/// Square each radial edge.
///
/// Radii are usually the more natural quantity to think about, but the
/// calculation itself compares squared distances. This helps avoid forgetting
/// to square things.
pub fn squared_edges_from_radii(radii: &[f64]) -> Vec<f64> {
    radii.iter().map(|r| r * r).collect()
}

/// Build `nbins` squared radial edges, where the (unsquared) radii are evenly
/// spaced in log-space between `r_min` and `r_max` (inclusive).
///
/// This is the standard binning used for galaxy pair counts. When `nbins` is
/// 1, the only edge is `r_max²`.
pub fn log_spaced_squared_edges(r_min: f64, r_max: f64, nbins: usize) -> Result<Vec<f64>, Error> {
    if nbins == 0 {
        return Err(Error::bin_count(0, 0));
    } else if !(r_min.is_finite() && r_max.is_finite()) {
        return Err(Error::bin_edge("log-spaced radii", "r_min and r_max must be finite"));
    } else if r_min <= 0.0 {
        return Err(Error::bin_edge("log-spaced radii", "r_min must be positive"));
    } else if r_max <= r_min {
        return Err(Error::bin_edge(
            "log-spaced radii",
            "r_max must exceed r_min",
        ));
    }

    if nbins == 1 {
        return Ok(vec![r_max * r_max]);
    }

    let log_min = r_min.log10();
    let step = (r_max.log10() - log_min) / ((nbins - 1) as f64);
    let mut radii: Vec<f64> = (0..nbins)
        .map(|k| 10.0_f64.powf(log_min + step * (k as f64)))
        .collect();
    // pin the endpoints so that rounding doesn't nudge them
    radii[0] = r_min;
    radii[nbins - 1] = r_max;
    Ok(squared_edges_from_radii(&radii))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares() {
        assert_eq!(squared_edges_from_radii(&[0.5, 1.0, 3.0]), vec![0.25, 1.0, 9.0]);
        assert!(squared_edges_from_radii(&[]).is_empty());
    }

    #[test]
    fn log_spaced() {
        let edges = log_spaced_squared_edges(0.1, 10.0, 3).unwrap();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0], 0.1 * 0.1);
        assert!((edges[1] - 1.0).abs() < 1e-12);
        assert_eq!(edges[2], 100.0);

        // strictly increasing
        let edges = log_spaced_squared_edges(0.1, 20.0, 20).unwrap();
        assert!(edges.windows(2).all(|pair| pair[0] < pair[1]));

        assert_eq!(log_spaced_squared_edges(0.1, 3.0, 1).unwrap(), vec![9.0]);
    }

    #[test]
    fn log_spaced_errors() {
        assert!(log_spaced_squared_edges(0.1, 10.0, 0).is_err());
        assert!(log_spaced_squared_edges(0.0, 10.0, 4).is_err());
        assert!(log_spaced_squared_edges(-1.0, 10.0, 4).is_err());
        assert!(log_spaced_squared_edges(10.0, 10.0, 4).is_err());
        assert!(log_spaced_squared_edges(0.1, f64::INFINITY, 4).is_err());
        assert!(log_spaced_squared_edges(f64::NAN, 1.0, 4).is_err());
    }
}
