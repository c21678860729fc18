//! Secure Random Source
//!
//! Uniform integer draws backed by the operating system CSPRNG.

use rand::rngs::OsRng;
use rand::RngCore;

/// Supplies uniformly distributed integers from an unpredictable source.
pub trait RandomSource: Send + Sync {
    /// Returns an integer in the inclusive range `[low, high]`.
    fn random_in_range(&self, low: u64, high: u64) -> Result<u64, rand::Error>;
}

/// Draws from [`OsRng`], surfacing entropy failures instead of panicking.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn random_in_range(&self, low: u64, high: u64) -> Result<u64, rand::Error> {
        debug_assert!(low <= high);
        let span = high - low;
        if span == u64::MAX {
            return next_u64(&mut OsRng);
        }

        // Hand-rolled because `gen_range` panics instead of returning entropy errors.
        // Accept only draws below the largest multiple of the range width
        let width = span + 1;
        let zone = u64::MAX - (u64::MAX % width);
        loop {
            let draw = next_u64(&mut OsRng)?;
            if draw < zone {
                return Ok(low + draw % width);
            }
        }
    }
}

fn next_u64<R: RngCore>(rng: &mut R) -> Result<u64, rand::Error> {
    let mut buf = [0u8; 8];
    rng.try_fill_bytes(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_stay_in_range() {
        let source = OsRandom;
        for _ in 0..1_000 {
            let n = source.random_in_range(100_000, 999_999).unwrap();
            assert!((100_000..=999_999).contains(&n));
        }
    }

    #[test]
    fn test_single_value_range() {
        assert_eq!(OsRandom.random_in_range(7, 7).unwrap(), 7);
    }

    #[test]
    fn test_small_range_hits_every_value() {
        let mut seen = [false; 9];
        for _ in 0..2_000 {
            let n = OsRandom.random_in_range(1, 9).unwrap();
            seen[(n - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn test_full_width_range() {
        OsRandom.random_in_range(0, u64::MAX).unwrap();
    }
}
