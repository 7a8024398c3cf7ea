//! Discrete grade-fraction matching.
//!
//! The host stores answer weights as one of a fixed set of fractions; any
//! computed ratio is snapped to the nearest supported value. The option
//! order and the first-wins tie-break mirror the host's matcher.

/// Supported grade fractions, positives first, then zero, then the negative
/// mirrors.
pub const GRADE_OPTIONS: [f64; 41] = [
    1.0, 0.9, 0.8333333, 0.8, 0.75, 0.7, 0.6666667, 0.6, 0.5, 0.4, 0.3333333, 0.3, 0.25, 0.2,
    0.1666667, 0.1428571, 0.125, 0.1111111, 0.1, 0.05, 0.0, -0.05, -0.1, -0.1111111, -0.125,
    -0.1428571, -0.1666667, -0.2, -0.25, -0.3, -0.3333333, -0.4, -0.5, -0.6, -0.6666667, -0.7,
    -0.75, -0.8, -0.8333333, -0.9, -1.0,
];

/// Snap an arbitrary fraction to the nearest supported grade option.
///
/// Ties go to the earlier option in [`GRADE_OPTIONS`].
#[must_use]
pub fn match_grade_option(fraction: f64) -> f64 {
    let mut best = GRADE_OPTIONS[0];
    let mut best_distance = (fraction - best).abs();
    for &option in &GRADE_OPTIONS[1..] {
        let distance = (fraction - option).abs();
        if distance < best_distance {
            best = option;
            best_distance = distance;
        }
    }
    best
}
