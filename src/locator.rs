//! Nearest point lookup by distance along the track

/// Index of the point whose cumulative distance is closest to `query`.
///
/// `cumulative` must be non-empty and non-decreasing. Equidistant
/// neighbours resolve to the lower index. Queries past the end land on the
/// last point.
pub fn nearest_index(cumulative: &[f64], query: f64) -> usize {
    debug_assert!(!cumulative.is_empty());

    let last = cumulative.len() - 1;
    let upper = cumulative.partition_point(|&d| d < query).min(last);
    let lower = upper.saturating_sub(1);

    if (cumulative[lower] - query).abs() <= (cumulative[upper] - query).abs() {
        lower
    } else {
        upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_hits() {
        let c = [0.0, 1.0, 2.5, 4.0];
        assert_eq!(nearest_index(&c, 0.0), 0);
        assert_eq!(nearest_index(&c, 2.5), 2);
        assert_eq!(nearest_index(&c, 4.0), 3);
    }

    #[test]
    fn test_between_points() {
        let c = [0.0, 1.0, 2.5, 4.0];
        assert_eq!(nearest_index(&c, 1.2), 1);
        assert_eq!(nearest_index(&c, 2.0), 2);
        assert_eq!(nearest_index(&c, 3.9), 3);
    }

    #[test]
    fn test_tie_goes_low() {
        let c = [0.0, 1.0, 2.0];
        assert_eq!(nearest_index(&c, 0.5), 0);
        assert_eq!(nearest_index(&c, 1.5), 1);
    }

    #[test]
    fn test_single_point() {
        assert_eq!(nearest_index(&[0.0], 0.0), 0);
    }

    #[test]
    fn test_past_end_clamps() {
        assert_eq!(nearest_index(&[0.0, 1.0], 7.0), 1);
    }

    #[test]
    fn test_repeated_distances() {
        // zero-length steps from duplicate fixes
        let c = [0.0, 1.0, 1.0, 1.0, 3.0];
        assert_eq!(nearest_index(&c, 1.0), 1);
        assert_eq!(nearest_index(&c, 1.1), 3);
        assert_eq!(nearest_index(&c, 2.5), 4);
    }
}
