//! Rating accumulator arithmetic.
//!
//! Users and food listings both keep an incrementally maintained mean
//! (`average_rating`, `total_ratings`) instead of re-aggregating past
//! feedback. The repositories apply this fold as a single atomic
//! `UPDATE`; the function here is the same arithmetic in Rust.

/// Folds one rating into a running mean, returning the next
/// `(average, count)` pair.
pub fn fold_rating(average: f64, count: i64, rating: i16) -> (f64, i64) {
    let next_count = count + 1;
    let next_average = (average * count as f64 + f64::from(rating)) / next_count as f64;
    (next_average, next_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_rating_becomes_the_mean() {
        assert_eq!(fold_rating(0.0, 0, 4), (4.0, 1));
    }

    #[test]
    fn test_folded_sequence_equals_arithmetic_mean() {
        let ratings = [5i16, 3, 4, 1, 5, 2, 4, 5];
        let (mut average, mut count) = (0.0, 0i64);
        for rating in ratings {
            (average, count) = fold_rating(average, count, rating);
        }

        let expected = ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / ratings.len() as f64;
        assert_eq!(count, ratings.len() as i64);
        assert!((average - expected).abs() < 1e-9);
    }

    #[test]
    fn test_fold_stays_inside_rating_bounds() {
        let (mut average, mut count) = (0.0, 0i64);
        for rating in [1i16, 5, 1, 5, 1, 5] {
            (average, count) = fold_rating(average, count, rating);
            assert!((1.0..=5.0).contains(&average));
        }
        assert_eq!(count, 6);
    }
}
