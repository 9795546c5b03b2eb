use ndarray::{ArrayView2, Axis};

/// A borrowed collection of weighted points in 3D space.
///
/// Each component is stored in a separate array (this is sometimes called a
/// "structure of arrays" layout). Entry `i` of `x`, `y`, `z` and `w` all
/// describe the same point.
#[derive(Clone, Copy, Debug)]
pub struct PointSet<'a> {
    x: &'a [f64],
    y: &'a [f64],
    z: &'a [f64],
    weights: &'a [f64],
}

impl<'a> PointSet<'a> {
    /// create a new instance
    pub fn new(
        x: &'a [f64],
        y: &'a [f64],
        z: &'a [f64],
        weights: &'a [f64],
    ) -> Result<PointSet<'a>, &'static str> {
        let n_points = x.len();
        if y.len() != n_points {
            Err("y must have the same number of points as x")
        } else if z.len() != n_points {
            Err("z must have the same number of points as x")
        } else if weights.len() != n_points {
            Err("weights must have the same number of points as positions")
        } else {
            Ok(Self { x, y, z, weights })
        }
    }

    /// create a new instance from a positions array with shape `(3, n_points)`
    ///
    /// Axis 0 is the slow axis and corresponds to the x, y and z components.
    /// Axis 1 is the fast axis and must be contiguous.
    pub fn from_array_view(
        positions: ArrayView2<'a, f64>,
        weights: &'a [f64],
    ) -> Result<PointSet<'a>, &'static str> {
        if positions.len_of(Axis(0)) != 3 {
            return Err("positions must hold exactly 3 spatial components");
        }
        let component = |dim: usize| positions.index_axis_move(Axis(0), dim).to_slice();
        match (component(0), component(1), component(2)) {
            (Some(x), Some(y), Some(z)) => PointSet::new(x, y, z, weights),
            _ => Err("positions must be contiguous along the fast axis"),
        }
    }

    /// Returns a view of the first `n_points` points.
    pub fn leading(&self, n_points: usize) -> Result<PointSet<'a>, &'static str> {
        if n_points > self.n_points() {
            Err("can't take more points than the point set holds")
        } else {
            Ok(Self {
                x: &self.x[..n_points],
                y: &self.y[..n_points],
                z: &self.z[..n_points],
                weights: &self.weights[..n_points],
            })
        }
    }

    pub fn n_points(&self) -> usize {
        self.x.len()
    }

    #[inline(always)]
    pub fn position(&self, idx: usize) -> [f64; 3] {
        [self.x[idx], self.y[idx], self.z[idx]]
    }

    #[inline(always)]
    pub fn weight(&self, idx: usize) -> f64 {
        self.weights[idx]
    }
}

/// compute the squared euclidean distance between point `i_a` of `points_a`
/// and point `i_b` of `points_b`
#[inline(always)]
pub fn squared_separation(
    points_a: &PointSet,
    i_a: usize,
    points_b: &PointSet,
    i_b: usize,
) -> f64 {
    let [ax, ay, az] = points_a.position(i_a);
    let [bx, by, bz] = points_b.position(i_b);
    let dx = ax - bx;
    let dy = ay - by;
    let dz = az - bz;
    // NOTE: .powi can't be used in no_std crates
    dx * dx + dy * dy + dz * dz
}

/// Adds the weighted contributions of the pairs formed between point `i_a`
/// of `points_a` and the points of `points_b` with indices in
/// `target_start..target_stop`.
///
/// Each pair is binned by its squared separation (see
/// [`crate::classify_squared_distance`]) and contributes the product of the
/// weights to that bin of `row`. The result is a differential histogram:
/// each bin holds only the contributions from pairs within its own shell.
///
/// `row` is **not** reset, which lets a caller sum up the contributions from
/// several target ranges.
///
/// # Assumptions
/// `row.len()` matches `squared_edges.len()` and the edges are sorted
pub fn count_pairs_for_targets(
    row: &mut [f64],
    points_a: &PointSet,
    i_a: usize,
    points_b: &PointSet,
    target_start: usize,
    target_stop: usize,
    squared_edges: &[f64],
) {
    let pw = points_a.weight(i_a);
    for i_b in target_start..target_stop {
        let distance_squared = squared_separation(points_a, i_a, points_b, i_b);
        // classify_squared_distance rejects pairs beyond the outermost edge
        // before it walks the shells
        if let Some(k) = crate::classify_squared_distance(distance_squared, squared_edges) {
            row[k] += pw * points_b.weight(i_b);
        }
    }
}

/// Fills `row` with the differential histogram of all pairs formed between
/// point `i_a` of `points_a` and every point of `points_b`.
///
/// Like [`count_pairs_for_targets`], `row` is expected to be zeroed ahead of
/// time.
pub fn count_pairs_into_row(
    row: &mut [f64],
    points_a: &PointSet,
    i_a: usize,
    points_b: &PointSet,
    squared_edges: &[f64],
) {
    count_pairs_for_targets(
        row,
        points_a,
        i_a,
        points_b,
        0,
        points_b.n_points(),
        squared_edges,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_set_errors() {
        let x = [0.0, 1.0];
        let short = [0.0];
        let w = [1.0, 1.0];
        assert!(PointSet::new(&x, &short, &x, &w).is_err());
        assert!(PointSet::new(&x, &x, &short, &w).is_err());
        assert!(PointSet::new(&x, &x, &x, &short).is_err());
        assert!(PointSet::new(&x, &x, &x, &w).is_ok());

        // empty point sets are allowed
        let points = PointSet::new(&[], &[], &[], &[]).unwrap();
        assert_eq!(points.n_points(), 0);
    }

    #[test]
    fn point_set_from_array_view() {
        #[rustfmt::skip]
        let positions = [
            0.0, 1.0,
            2.0, 3.0,
            4.0, 5.0,
        ];
        let weights = [0.5, 2.0];
        let points =
            PointSet::from_array_view(ArrayView2::from_shape((3, 2), &positions).unwrap(), &weights)
                .unwrap();
        assert_eq!(points.n_points(), 2);
        assert_eq!(points.position(1), [1.0, 3.0, 5.0]);
        assert_eq!(points.weight(1), 2.0);

        // wrong number of spatial components
        let positions_2d = ArrayView2::from_shape((2, 3), &positions).unwrap();
        assert!(PointSet::from_array_view(positions_2d, &[1.0; 3]).is_err());

        // not contiguous along the fast axis
        let transposed = ArrayView2::from_shape((2, 3), &positions).unwrap().reversed_axes();
        assert!(PointSet::from_array_view(transposed, &weights).is_err());
    }

    #[test]
    fn leading_points() {
        let x = [0.0, 1.0, 2.0];
        let w = [1.0, 2.0, 3.0];
        let points = PointSet::new(&x, &x, &x, &w).unwrap();
        let first_two = points.leading(2).unwrap();
        assert_eq!(first_two.n_points(), 2);
        assert_eq!(first_two.weight(1), 2.0);
        assert!(points.leading(4).is_err());
    }

    #[test]
    fn separation() {
        let points_a = PointSet::new(&[1.0], &[2.0], &[3.0], &[1.0]).unwrap();
        let points_b = PointSet::new(&[4.0], &[6.0], &[3.0], &[1.0]).unwrap();
        assert_eq!(squared_separation(&points_a, 0, &points_b, 0), 25.0);
    }

    #[test]
    fn differential_row() {
        // the source point sits at the origin. The targets sit on the x-axis
        // at distances 0, 1, 1.5, 2.5 & 4
        let points_a = PointSet::new(&[0.0], &[0.0], &[0.0], &[2.0]).unwrap();
        let bx = [0.0, 1.0, 1.5, 2.5, 4.0];
        let zeros = [0.0; 5];
        let bw = [1.0, 2.0, 3.0, 4.0, 5.0];
        let points_b = PointSet::new(&bx, &zeros, &zeros, &bw).unwrap();

        let squared_edges = [1.0, 4.0, 9.0];
        let mut row = [0.0; 3];
        count_pairs_into_row(&mut row, &points_a, 0, &points_b, &squared_edges);

        // bin 0 gets the pairs at 0 and 1 (ties go to the inner shell), bin 1
        // gets 1.5, bin 2 gets 2.5 and the pair at 4 is discarded
        assert_eq!(row, [2.0 * (1.0 + 2.0), 2.0 * 3.0, 2.0 * 4.0]);

        // mass conservation: the differential row sums to the total weight of
        // the pairs inside the outer edge
        let total: f64 = row.iter().sum();
        assert_eq!(total, 2.0 * (1.0 + 2.0 + 3.0 + 4.0));
    }

    #[test]
    fn unbinnable_targets_are_skipped() {
        // targets beyond the outer edge, at infinity, or at NaN positions
        // contribute nothing
        let points_a = PointSet::new(&[0.0], &[0.0], &[0.0], &[1.0]).unwrap();
        let bx = [0.5, 3.5, f64::INFINITY, f64::NAN, 1.5];
        let zeros = [0.0; 5];
        let bw = [1.0, 10.0, 100.0, 1000.0, 2.0];
        let points_b = PointSet::new(&bx, &zeros, &zeros, &bw).unwrap();
        let squared_edges = [1.0, 9.0];
        let mut row = [0.0; 2];
        count_pairs_into_row(&mut row, &points_a, 0, &points_b, &squared_edges);
        assert_eq!(row, [1.0, 2.0]);
    }

    #[test]
    fn split_targets_match_full_row() {
        let points_a = PointSet::new(&[0.0], &[0.0], &[0.0], &[1.0]).unwrap();
        let bx = [0.0, 1.0, 1.5, 2.5, 4.0];
        let zeros = [0.0; 5];
        let bw = [1.0, 2.0, 3.0, 4.0, 5.0];
        let points_b = PointSet::new(&bx, &zeros, &zeros, &bw).unwrap();
        let squared_edges = [1.0, 4.0, 9.0];

        let mut full = [0.0; 3];
        count_pairs_into_row(&mut full, &points_a, 0, &points_b, &squared_edges);

        let mut split = [0.0; 3];
        count_pairs_for_targets(&mut split, &points_a, 0, &points_b, 0, 2, &squared_edges);
        count_pairs_for_targets(&mut split, &points_a, 0, &points_b, 2, 5, &squared_edges);
        assert_eq!(full, split);
    }
}
