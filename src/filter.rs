//! Noise rejection for the resistive touch samples.
//!
//! Single XPT2046 conversions are occasionally far off when the pen is moving
//! or bouncing. Out of three conversions of the same axis, the two closest
//! together are averaged and the outlier is dropped.

/// Returns the average of the two values that are closest together.
///
/// The pairs are checked in the order (a,b), (b,c), (c,a) and the first pair
/// with the smallest distance wins. The average truncates toward zero.
pub fn best_two_of_three(a: i32, b: i32, c: i32) -> i32 {
    let dab = (a - b).abs();
    let dbc = (b - c).abs();
    let dca = (c - a).abs();

    if dab <= dbc && dab <= dca {
        (a + b) / 2
    } else if dbc <= dab && dbc <= dca {
        (b + c) / 2
    } else {
        (c + a) / 2
    }
}

/// [`best_two_of_three`] over a raw triplet of 13-bit readings.
pub fn filter_triplet(samples: [u16; 3]) -> i32 {
    best_two_of_three(samples[0].into(), samples[1].into(), samples[2].into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_the_outlier() {
        assert_eq!(best_two_of_three(10, 10, 100), 10);
        assert_eq!(best_two_of_three(100, 10, 10), 10);
        assert_eq!(best_two_of_three(10, 100, 10), 10);
    }

    #[test]
    fn ties_prefer_ab_then_bc() {
        // |a-b| = |b-c| = 10, |c-a| = 20
        assert_eq!(best_two_of_three(10, 20, 30), 15);
        // |b-c| = |c-a| = 5, |a-b| = 10
        assert_eq!(best_two_of_three(300, 310, 305), 307);
        // only (c,a) is closest
        assert_eq!(best_two_of_three(2000, 2010, 1995), 1997);
    }

    #[test]
    fn equal_values() {
        assert_eq!(best_two_of_three(4095, 4095, 4095), 4095);
        assert_eq!(best_two_of_three(0, 0, 0), 0);
    }

    #[test]
    fn average_truncates_toward_zero() {
        assert_eq!(best_two_of_three(1, 2, 100), 1);
        assert_eq!(best_two_of_three(-1, -2, -100), -1);
    }

    #[test]
    fn triplet_of_raw_readings() {
        assert_eq!(filter_triplet([8191, 8190, 0]), 8190);
        assert_eq!(filter_triplet([200, 0, 210]), 205);
    }
}
