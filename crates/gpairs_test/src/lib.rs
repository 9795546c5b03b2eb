use gpairs_nostd_internal::{PointSet, squared_separation};
use ndarray::{Array2, Axis};
use rand::distr::{Distribution, Uniform};
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;

// this is used to set up point sets for tests and benchmarks. It owns the
// data, so that the tests can freely borrow PointSet views from it
pub struct TestDataWrapper {
    // each positions array has shape (3, n_points)
    positions_a: Array2<f64>,
    weights_a: Vec<f64>,
    positions_b: Array2<f64>,
    weights_b: Vec<f64>,
}

impl TestDataWrapper {
    pub fn from_positions(
        positions_a: Array2<f64>,
        weights_a: Vec<f64>,
        positions_b: Array2<f64>,
        weights_b: Vec<f64>,
    ) -> TestDataWrapper {
        assert_eq!(positions_a.len_of(Axis(0)), 3);
        assert_eq!(positions_b.len_of(Axis(0)), 3);
        assert_eq!(positions_a.len_of(Axis(1)), weights_a.len());
        assert_eq!(positions_b.len_of(Axis(1)), weights_b.len());
        TestDataWrapper {
            // as_standard_layout ensures that we can take contiguous rows
            positions_a: positions_a.as_standard_layout().into_owned(),
            weights_a,
            positions_b: positions_b.as_standard_layout().into_owned(),
            weights_b,
        }
    }

    /// Both point sets hold the same `n_points` points, evenly spaced along
    /// the x-axis (starting at the origin), with unit weights.
    pub fn from_line(n_points: usize, spacing: f64) -> TestDataWrapper {
        let mut positions = Array2::<f64>::zeros([3, n_points]);
        for i in 0..n_points {
            positions[[0, i]] = (i as f64) * spacing;
        }
        Self::from_positions(
            positions.clone(),
            vec![1.0; n_points],
            positions,
            vec![1.0; n_points],
        )
    }

    /// Each point set holds `n_points` points uniformly distributed in a cube
    /// with sides of length `box_size` (with a corner at the origin). The
    /// weights are uniformly distributed between 0 and 1.
    pub fn from_random(n_points: usize, box_size: f64, seed: u64) -> TestDataWrapper {
        let mut my_rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let position_dist = Uniform::try_from(0.0..box_size).unwrap();
        let weight_dist = Uniform::try_from(0.0..1.0).unwrap();

        let make_positions = |rng: &mut Xoshiro256PlusPlus| -> Array2<f64> {
            Array2::from_shape_fn([3, n_points], |_| position_dist.sample(&mut *rng))
        };
        let positions_a = make_positions(&mut my_rng);
        let positions_b = make_positions(&mut my_rng);
        let weights_a: Vec<f64> = (0..n_points)
            .map(|_| weight_dist.sample(&mut my_rng))
            .collect();
        let weights_b: Vec<f64> = (0..n_points)
            .map(|_| weight_dist.sample(&mut my_rng))
            .collect();
        Self::from_positions(positions_a, weights_a, positions_b, weights_b)
    }

    /// Replace the weights of both point sets
    pub fn with_weights(mut self, weight: f64) -> TestDataWrapper {
        self.weights_a.fill(weight);
        self.weights_b.fill(weight);
        self
    }

    pub fn n_points(&self) -> usize {
        self.weights_a.len()
    }

    pub fn points_a<'a>(&'a self) -> PointSet<'a> {
        PointSet::from_array_view(self.positions_a.view(), &self.weights_a).unwrap()
    }

    pub fn points_b<'a>(&'a self) -> PointSet<'a> {
        PointSet::from_array_view(self.positions_b.view(), &self.weights_b).unwrap()
    }

    /// The coordinate & weight arrays in the order expected by `gpairs`:
    /// `[x1, y1, z1, w1, x2, y2, z2, w2]`
    pub fn flat_arrays(&self) -> [&[f64]; 8] {
        [
            self.positions_a.row(0).to_slice().unwrap(),
            self.positions_a.row(1).to_slice().unwrap(),
            self.positions_a.row(2).to_slice().unwrap(),
            &self.weights_a,
            self.positions_b.row(0).to_slice().unwrap(),
            self.positions_b.row(1).to_slice().unwrap(),
            self.positions_b.row(2).to_slice().unwrap(),
            &self.weights_b,
        ]
    }

    /// Computes the cumulative histogram in the most direct way possible: for
    /// each bin, we loop over every pair and check whether it lies within the
    /// bin's outer edge. This shares none of the binning logic of the actual
    /// implementation, which makes it a useful reference.
    pub fn brute_force_histogram(&self, squared_edges: &[f64]) -> Vec<f64> {
        let points_a = self.points_a();
        let points_b = self.points_b();
        let mut out = vec![0.0; squared_edges.len()];
        for (k, &edge) in squared_edges.iter().enumerate() {
            for i_a in 0..points_a.n_points() {
                for i_b in 0..points_b.n_points() {
                    if squared_separation(&points_a, i_a, &points_b, i_b) <= edge {
                        out[k] += points_a.weight(i_a) * points_b.weight(i_b);
                    }
                }
            }
        }
        out
    }
}
