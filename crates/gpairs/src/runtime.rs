//! Runtime parameters that don't have a meaningful impact on the output.
//!
//! The results are mathematically consistent (if not bitwise identical) for
//! every choice of [`RuntimeSpec`], but the choices impact performance.

use gpairs_nostd_internal::CumulativeScan;
use std::num::NonZeroUsize;

/// The parallelism backend used to drive a calculation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Strictly sequential execution on the calling thread
    Serial,
    /// Execution on a rayon thread pool.
    ///
    /// - `n_threads == 0`: use rayon's global thread pool
    /// - otherwise: build a dedicated pool with `n_threads` threads for the
    ///   duration of the calculation
    Rayon { n_threads: usize },
}

impl Default for Backend {
    fn default() -> Self {
        Backend::Rayon { n_threads: 0 }
    }
}

impl Backend {
    /// Pick a backend from a thread count.
    ///
    /// - `0` → rayon's global thread pool
    /// - `1` → serial
    /// - `n > 1` → a dedicated rayon pool with `n` threads
    pub fn from_threads(n_threads: usize) -> Self {
        match n_threads {
            1 => Backend::Serial,
            n => Backend::Rayon { n_threads: n },
        }
    }
}

/// Tracks the runtime parameters of a calculation.
///
/// ```
/// use gpairs::{Backend, CumulativeScan, RuntimeSpec};
/// use std::num::NonZeroUsize;
///
/// let runtime = RuntimeSpec::new()
///     .with_backend(Backend::Rayon { n_threads: 4 })
///     .with_n_target_chunks(NonZeroUsize::new(2).unwrap())
///     .with_scan(CumulativeScan::Pairwise);
/// assert_eq!(runtime.n_target_chunks().get(), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeSpec {
    backend: Backend,
    n_target_chunks: NonZeroUsize,
    scan: CumulativeScan,
}

impl Default for RuntimeSpec {
    fn default() -> Self {
        RuntimeSpec {
            backend: Backend::default(),
            n_target_chunks: NonZeroUsize::MIN,
            scan: CumulativeScan::default(),
        }
    }
}

impl RuntimeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// shorthand for a serial calculation with default parameters
    pub fn serial() -> Self {
        Self::default().with_backend(Backend::Serial)
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Split the target points of every source point into `n_target_chunks`
    /// contiguous chunks.
    ///
    /// The chunks are processed in parallel by the rayon backend, which helps
    /// when there are fewer source points than threads.
    pub fn with_n_target_chunks(mut self, n_target_chunks: NonZeroUsize) -> Self {
        self.n_target_chunks = n_target_chunks;
        self
    }

    pub fn with_scan(mut self, scan: CumulativeScan) -> Self {
        self.scan = scan;
        self
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn n_target_chunks(&self) -> NonZeroUsize {
        self.n_target_chunks
    }

    pub fn scan(&self) -> CumulativeScan {
        self.scan
    }
}
