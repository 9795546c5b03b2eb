// the reason this is named mod.rs has to do with some complexities of how
// testing is handled
//
// we are following the advice of the rust book
// https://doc.rust-lang.org/book/ch11-03-test-organization.html#submodules-in-integration-tests

// based on numpy!
// https://numpy.org/doc/stable/reference/generated/numpy.isclose.html
pub fn isclose(actual: f64, ref_val: f64, rtol: f64, atol: f64) -> bool {
    let actual_nan = actual.is_nan();
    let ref_nan = ref_val.is_nan();
    if actual_nan || ref_nan {
        actual_nan && ref_nan
    } else {
        (actual - ref_val).abs() <= (atol + rtol * ref_val.abs())
    }
}

/// panics with a descriptive message if any pair of elements aren't close
#[allow(dead_code)] // not every test file uses this
pub fn assert_allclose(actual: &[f64], ref_vals: &[f64], rtol: f64, atol: f64) {
    assert_eq!(
        actual.len(),
        ref_vals.len(),
        "the arrays have different lengths"
    );
    for (i, (&a, &r)) in actual.iter().zip(ref_vals.iter()).enumerate() {
        assert!(
            isclose(a, r, rtol, atol),
            "element {i} doesn't match: actual = {a}, reference = {r}.\n\
             actual array: {actual:?}\n\
             reference array: {ref_vals:?}"
        );
    }
}
