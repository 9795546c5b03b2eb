//! Implements the squared radial bin edges used to partition pairs of points
//! into spherical shells. The [`SquaredRadialEdges`] type validates the edges
//! once, so that the hot loops can use [`classify_squared_distance`] without
//! doing any error-handling.

/// Get the index of the radial shell that `distance_squared` falls into.
/// Returns `None` if it lies beyond the outermost edge.
///
/// The returned index is the smallest `k` such that
/// `distance_squared <= squared_edges[k]`. In other words, shell `k` covers
/// `(squared_edges[k-1], squared_edges[k]]` and shell 0 covers
/// `[0, squared_edges[0]]`. A value that is exactly equal to an edge belongs
/// to the inner shell.
///
/// A NaN distance compares false against every edge, so it is never assigned
/// to a shell.
///
/// # Assumptions
/// `squared_edges` must be non-empty and sorted in strictly increasing order
/// (this is what [`SquaredRadialEdges::new`] checks). If the edges are
/// unsorted, the assignment is meaningless.
#[inline(always)]
pub fn classify_squared_distance(distance_squared: f64, squared_edges: &[f64]) -> Option<usize> {
    let n_bins = squared_edges.len();
    // written as a negated `<=` so that NaN lands here
    if n_bins == 0 || !(distance_squared <= squared_edges[n_bins - 1]) {
        return None;
    }
    // walk inward from the outermost shell. We stop as soon as we encounter
    // an edge that distance_squared exceeds; the shell we want lies just
    // outside of that edge.
    for k in (0..(n_bins - 1)).rev() {
        if distance_squared > squared_edges[k] {
            return Some(k + 1);
        }
    }
    Some(0)
}

/// The squared upper boundaries of a sequence of radial shells.
///
/// Unlike a typical set of histogram bin edges, there is no explicit lower
/// boundary: the innermost shell extends all the way down to a separation of
/// zero. Consequently, `n_bins()` is equal to the number of edges.
#[derive(Clone, Copy, Debug)]
pub struct SquaredRadialEdges<'a> {
    squared_edges: &'a [f64],
}

impl<'a> SquaredRadialEdges<'a> {
    /// Wrap `squared_edges` after checking that the values are usable.
    ///
    /// The edges must hold at least 1 value, every value must be finite and
    /// non-negative, and the values must be strictly increasing.
    pub fn new(squared_edges: &'a [f64]) -> Result<SquaredRadialEdges<'a>, &'static str> {
        if squared_edges.is_empty() {
            return Err("at least one squared radial edge is required");
        }

        // It may be worth supporting +inf as the outermost edge
        if squared_edges.iter().any(|x| !x.is_finite()) {
            return Err("squared radial edges must be finite");
        } else if squared_edges[0] < 0.0 {
            return Err("squared radial edges must not be negative");
        }

        for i in 1..squared_edges.len() {
            if squared_edges[i] <= squared_edges[i - 1] {
                return Err("squared radial edges must be in strictly increasing order");
            }
        }

        Ok(SquaredRadialEdges { squared_edges })
    }

    /// Calculate the shell index for a squared separation.
    ///
    /// See [`classify_squared_distance`] for the precise semantics.
    #[inline(always)]
    pub fn bin_index(&self, distance_squared: f64) -> Option<usize> {
        classify_squared_distance(distance_squared, self.squared_edges)
    }

    pub fn n_bins(&self) -> usize {
        self.squared_edges.len()
    }

    pub fn as_slice(&self) -> &'a [f64] {
        self.squared_edges
    }

    /// The squared separation of the outermost edge
    pub fn outer_edge(&self) -> f64 {
        self.squared_edges[self.squared_edges.len() - 1]
    }
}
