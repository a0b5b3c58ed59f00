//! Random operands for the exercises.
//!
//! Some numbers never show up since they are too easy to calculate with:
//! * 0 and 1 for 1-digit integers.
//! * Anything ending in 0, i.e. divisible by 10.
//! * The all-ones numbers, 11, 111, etc.

use crate::error::DrillError;
use rand::Rng;

/// Largest digit count that still fits an `i64`.
pub const MAX_DIGITS: u32 = 18;

// Ranges at least this wide always hold an acceptable number; narrower ones get enumerated.
const ENUMERATE_BELOW: i64 = 16;

fn all_ones(digits: u32) -> i64 {
    (1..digits).fold(1, |acc, _| acc * 10 + 1)
}

fn is_ok(n: i64, ones: i64) -> bool {
    n % 10 != 0 && n != ones
}

/// Get an integer with `digits` digits for math exercises, optionally narrowed to
/// `[min, max]`. The bounds are ignored for a single digit, which is always in `[2, 9]`.
pub fn gen_math_int<R: Rng + ?Sized>(
    rng: &mut R,
    digits: u32,
    min: Option<i64>,
    max: Option<i64>,
) -> Result<i64, DrillError> {
    if digits == 0 || digits > MAX_DIGITS {
        return Err(DrillError::InvalidDigits(digits));
    }
    if digits == 1 {
        return Ok(rng.gen_range(2..=9));
    }

    let mut low = 10i64.pow(digits - 1);
    let mut high = low * 10 - 1;
    if let Some(min) = min {
        low = low.max(min);
    }
    if let Some(max) = max {
        high = high.min(max);
    }
    let empty = DrillError::EmptyRange { digits, low, high };
    if low > high {
        return Err(empty);
    }

    let ones = all_ones(digits);
    if high - low < ENUMERATE_BELOW {
        let candidates = (low..=high)
            .filter(|n| is_ok(*n, ones))
            .collect::<Vec<_>>();
        if candidates.is_empty() {
            return Err(empty);
        }
        return Ok(candidates[rng.gen_range(0..candidates.len())]);
    }

    loop {
        let n = rng.gen_range(low..=high);
        if is_ok(n, ones) {
            return Ok(n);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn digit_count(n: i64) -> u32 {
        n.to_string().len() as u32
    }

    #[test]
    fn test_digits_and_exclusions() {
        let mut rng = StdRng::seed_from_u64(1);
        for digits in 1..=6 {
            for _ in 0..500 {
                let n = gen_math_int(&mut rng, digits, None, None).unwrap();
                assert_eq!(digit_count(n), digits, "{n} for {digits} digits");
                assert_ne!(n % 10, 0);
                if digits == 1 {
                    assert!((2..=9).contains(&n));
                } else {
                    assert_ne!(n, all_ones(digits));
                }
            }
        }
    }

    #[test]
    fn test_bounded() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..1000 {
            let n = gen_math_int(&mut rng, 2, None, Some(29)).unwrap();
            assert!((12..=29).contains(&n), "{n}");
            assert_ne!(n, 20);
        }
        for _ in 0..1000 {
            let n = gen_math_int(&mut rng, 3, Some(990), None).unwrap();
            assert!((991..=999).contains(&n), "{n}");
        }
    }

    #[test]
    fn test_single_digit_ignores_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let n = gen_math_int(&mut rng, 1, Some(100), Some(0)).unwrap();
            assert!((2..=9).contains(&n));
        }
    }

    #[test]
    fn test_empty_ranges() {
        let mut rng = StdRng::seed_from_u64(4);
        assert!(matches!(
            gen_math_int(&mut rng, 2, Some(50), Some(40)),
            Err(DrillError::EmptyRange { low: 50, high: 40, .. })
        ));
        // Non-empty, but only holds excluded numbers.
        assert!(matches!(
            gen_math_int(&mut rng, 2, Some(20), Some(20)),
            Err(DrillError::EmptyRange { .. })
        ));
        assert!(matches!(
            gen_math_int(&mut rng, 2, Some(10), Some(11)),
            Err(DrillError::EmptyRange { .. })
        ));
        assert_eq!(gen_math_int(&mut rng, 2, Some(10), Some(12)).unwrap(), 12);
    }

    #[test]
    fn test_invalid_digits() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            gen_math_int(&mut rng, 0, None, None),
            Err(DrillError::InvalidDigits(0))
        ));
        assert!(matches!(
            gen_math_int(&mut rng, 19, None, None),
            Err(DrillError::InvalidDigits(19))
        ));
        let n = gen_math_int(&mut rng, MAX_DIGITS, None, None).unwrap();
        assert_eq!(digit_count(n), MAX_DIGITS);
    }
}
