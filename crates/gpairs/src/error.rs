// The `gpairs_nostd_internal` crate reports problems with `&'static str`.
// This crate defines a single opaque Error type that wraps those strings and
// adds the structured errors that come up while validating the arguments of
// the public entry points.
//
// All of the precondition checks happen before any computation begins, so a
// caller never observes a partially filled (or silently zeroed) histogram.

#[derive(Debug)]
pub struct Error {
    // I'm not so sure we want to directly expose this
    kind: ErrorKind,
}

/// The underlying internal error type
#[non_exhaustive]
#[derive(Clone, Debug)]
enum ErrorKind {
    /// An error that occurs when an array is too short
    ArrayLength(ArrayLengthError),
    /// An error that occurs when the number of bins is invalid or it doesn't
    /// match the number of bin edges
    BinCount(BinCountError),
    /// An error that occurs when a problematic bin edge is specified
    BinEdge(BinEdgeError),
    /// An error that occurs within `gpairs_nostd_internal`
    ///
    /// The idea is to wrap the stringly errors that are used throughout
    /// `gpairs_nostd_internal`.
    InternalLegacyAdHoc(InternalLegacyAdHocError),
    /// An error that occurs when the 2 point sets hold different numbers of
    /// points
    PointSetLength(PointSetLengthError),
    /// An error that occurs when a dedicated thread pool can't be built
    ThreadPool(ThreadPoolError),
}

// define constructor methods for Error
impl Error {
    /// produce an error indicating that an array holds fewer than `required`
    /// elements
    pub(crate) fn array_length(name: &'static str, required: usize, actual: usize) -> Self {
        Error {
            kind: ErrorKind::ArrayLength(ArrayLengthError {
                name,
                required,
                actual,
            }),
        }
    }

    /// produce an error indicating that `nbins` is invalid for the supplied
    /// bin edges
    pub(crate) fn bin_count(nbins: usize, n_edges: usize) -> Self {
        Error {
            kind: ErrorKind::BinCount(BinCountError { nbins, n_edges }),
        }
    }

    /// produce an error indicating that a problematic bin edge is specified
    pub(crate) fn bin_edge(who: &'static str, what: &'static str) -> Self {
        Error {
            kind: ErrorKind::BinEdge(BinEdgeError { who, what }),
        }
    }

    /// wraps a legacy internal error string
    pub(crate) fn internal_legacy_adhoc(message: &'static str) -> Self {
        Error {
            kind: ErrorKind::InternalLegacyAdHoc(InternalLegacyAdHocError(message)),
        }
    }

    /// produce an error indicating that the point sets have different lengths
    pub(crate) fn point_set_length(n_points_a: usize, n_points_b: usize) -> Self {
        Error {
            kind: ErrorKind::PointSetLength(PointSetLengthError {
                n_points_a,
                n_points_b,
            }),
        }
    }

    /// produce an error indicating that a thread pool couldn't be built
    pub(crate) fn thread_pool(n_threads: usize, err: rayon::ThreadPoolBuildError) -> Self {
        Error {
            kind: ErrorKind::ThreadPool(ThreadPoolError {
                n_threads,
                // ThreadPoolBuildError isn't Clone, so we hold onto the message
                what: err.to_string(),
            }),
        }
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for ErrorKind {}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            ErrorKind::ArrayLength(ref err) => err.fmt(f),
            ErrorKind::BinCount(ref err) => err.fmt(f),
            ErrorKind::BinEdge(ref err) => err.fmt(f),
            ErrorKind::InternalLegacyAdHoc(ref msg) => msg.fmt(f),
            ErrorKind::PointSetLength(ref err) => err.fmt(f),
            ErrorKind::ThreadPool(ref err) => err.fmt(f),
        }
    }
}

/// An error that occurs when an array is too short
#[derive(Clone, Debug)]
struct ArrayLengthError {
    name: &'static str,
    required: usize,
    actual: usize,
}

impl std::error::Error for ArrayLengthError {}

impl core::fmt::Display for ArrayLengthError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let ArrayLengthError {
            name,
            required,
            actual,
        } = self;
        write!(
            f,
            "{name} holds {actual} elements. It must hold at least {required}"
        )
    }
}

/// An error that occurs when the number of bins is invalid or it doesn't
/// match the number of bin edges
#[derive(Clone, Debug)]
struct BinCountError {
    nbins: usize,
    n_edges: usize,
}

impl std::error::Error for BinCountError {}

impl core::fmt::Display for BinCountError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.nbins == 0 {
            write!(f, "nbins must be at least 1")
        } else {
            write!(
                f,
                "nbins is {}, but {} squared bin edges were provided",
                self.nbins, self.n_edges
            )
        }
    }
}

/// An error that occurs when a problematic bin edge is specified
#[derive(Clone, Debug)]
struct BinEdgeError {
    who: &'static str,
    what: &'static str,
}

impl std::error::Error for BinEdgeError {}

impl core::fmt::Display for BinEdgeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let BinEdgeError { who, what } = self;
        write!(f, "problem with {who}: {what}")
    }
}

/// A type that wraps the string errors from `gpairs_nostd_internal`
#[derive(Clone)]
struct InternalLegacyAdHocError(&'static str);

impl std::error::Error for InternalLegacyAdHocError {}

impl core::fmt::Display for InternalLegacyAdHocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::fmt::Debug for InternalLegacyAdHocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.0, f)
    }
}

/// An error that occurs when the 2 point sets hold different numbers of points
#[derive(Clone, Debug)]
struct PointSetLengthError {
    n_points_a: usize,
    n_points_b: usize,
}

impl std::error::Error for PointSetLengthError {}

impl core::fmt::Display for PointSetLengthError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "points_a holds {} points while points_b holds {}. Both point \
             sets must hold the same number of points",
            self.n_points_a, self.n_points_b
        )
    }
}

/// An error that occurs when a dedicated thread pool can't be built
#[derive(Clone, Debug)]
struct ThreadPoolError {
    n_threads: usize,
    what: String,
}

impl std::error::Error for ThreadPoolError {}

impl core::fmt::Display for ThreadPoolError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unable to build a thread pool with {} threads: {}",
            self.n_threads, self.what
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = Error::array_length("x1", 4, 3);
        assert_eq!(err.to_string(), "x1 holds 3 elements. It must hold at least 4");

        let err = Error::bin_count(0, 3);
        assert_eq!(err.to_string(), "nbins must be at least 1");
        let err = Error::bin_count(2, 3);
        assert_eq!(
            err.to_string(),
            "nbins is 2, but 3 squared bin edges were provided"
        );

        let err = Error::bin_edge("rbins_squared", "squared radial edges must be finite");
        assert_eq!(
            err.to_string(),
            "problem with rbins_squared: squared radial edges must be finite"
        );

        let err = Error::internal_legacy_adhoc("something went wrong");
        assert_eq!(err.to_string(), "something went wrong");

        let err = Error::point_set_length(3, 2);
        assert!(err.to_string().starts_with("points_a holds 3 points"));
    }
}
