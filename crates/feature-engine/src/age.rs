//! Age Bucketing
//!
//! The training data records age as 13 ordinal bands rather than years.

/// `(exclusive upper bound, bucket)` pairs in ascending order
pub const AGE_BUCKETS: [(u32, u8); 12] = [
    (25, 1),
    (30, 2),
    (35, 3),
    (40, 4),
    (45, 5),
    (50, 6),
    (55, 7),
    (60, 8),
    (65, 9),
    (70, 10),
    (75, 11),
    (80, 12),
];

/// Bucket for every age at or above the last bound
pub const OPEN_AGE_BUCKET: u8 = 13;

/// Map an age in years to its band in `[1, 13]`.
///
/// Total over `u32`: ages below 25 land in bucket 1, ages of 80 and above in
/// bucket 13. A boundary age belongs to the higher band (25 → 2).
pub fn age_bucket(age: u32) -> u8 {
    AGE_BUCKETS
        .iter()
        .find(|&&(upper, _)| age < upper)
        .map_or(OPEN_AGE_BUCKET, |&(_, bucket)| bucket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(age_bucket(0), 1);
        assert_eq!(age_bucket(18), 1);
        assert_eq!(age_bucket(24), 1);
        assert_eq!(age_bucket(25), 2);
        assert_eq!(age_bucket(29), 2);
        assert_eq!(age_bucket(30), 3);
        assert_eq!(age_bucket(79), 12);
        assert_eq!(age_bucket(80), 13);
        assert_eq!(age_bucket(200), 13);
        assert_eq!(age_bucket(u32::MAX), 13);
    }

    #[test]
    fn test_table_is_contiguous_five_year_bands() {
        for (i, &(upper, bucket)) in AGE_BUCKETS.iter().enumerate() {
            assert_eq!(upper, 25 + 5 * i as u32);
            assert_eq!(bucket as usize, i + 1);
        }
        assert_eq!(OPEN_AGE_BUCKET as usize, AGE_BUCKETS.len() + 1);
    }

    #[test]
    fn test_every_band_start() {
        for &(upper, bucket) in &AGE_BUCKETS {
            assert_eq!(age_bucket(upper - 1), bucket);
            assert_eq!(age_bucket(upper), bucket + 1);
        }
    }

    proptest! {
        #[test]
        fn prop_bucket_in_range(age in any::<u32>()) {
            let bucket = age_bucket(age);
            prop_assert!((1..=13).contains(&bucket));
        }

        #[test]
        fn prop_bucket_monotonic(a in 0u32..500, b in 0u32..500) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(age_bucket(lo) <= age_bucket(hi));
        }
    }
}
