//! The advisory switch is process-wide, so it is exercised in its own test
//! binary with a single test.

use std::collections::HashMap;

use sparse_semiring::advisory::{capture, performance_warnings_enabled, set_performance_warnings};
use sparse_semiring::matrix::{determinant, inverse};

#[test]
fn test_global_switch_silences_academic_routines() {
    let _ = env_logger::builder().is_test(true).try_init();

    let m = HashMap::from([
        (0, HashMap::from([(0, 4.0), (1, 7.0)])),
        (1, HashMap::from([(0, 2.0), (1, 6.0)])),
    ]);

    assert!(performance_warnings_enabled());
    let (det, warnings) = capture(|| determinant(&m));
    assert!((det - 10.0).abs() < 1e-12);
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].to_string(),
        "determinant() is O(N^3) and intended for academic demonstration only"
    );

    set_performance_warnings(false);
    let (inv, warnings) = capture(|| inverse(&m));
    assert!(inv.is_ok());
    assert!(warnings.is_empty());

    set_performance_warnings(true);
    let (_, warnings) = capture(|| inverse(&m));
    assert_eq!(warnings.len(), 1);
}
