//! Random number sources
//!
//! Path generation and synthetic telemetry draw from a [`RandomSource`].
//! [`SecureRng`] reads OS entropy through `getrandom`; [`SeededRng`] is a
//! deterministic xorshift64 generator for reproducible runs and tests.

use crate::types::*;

/// Source of uniformly distributed random values
pub trait RandomSource {
    /// Generate a random u64
    fn next_u64(&mut self) -> Result<u64>;

    /// Generate a random f64 in range [0.0, 1.0)
    fn next_f64(&mut self) -> Result<f64> {
        let val = self.next_u64()?;
        // Upper 53 bits fill the mantissa
        Ok((val >> 11) as f64 * (1.0 / 9_007_199_254_740_992.0))
    }

    /// Generate a random f64 in range [min, max)
    fn next_f64_range(&mut self, min: f64, max: f64) -> Result<f64> {
        let t = self.next_f64()?;
        Ok(min + t * (max - min))
    }

    /// Generate a symmetric offset in range [-bound, bound)
    fn next_offset(&mut self, bound: f64) -> Result<f64> {
        self.next_f64_range(-bound, bound)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> Result<u64> {
        (**self).next_u64()
    }
}

/// OS-backed random number generator
pub struct SecureRng;

impl SecureRng {
    /// Create a new instance, verifying that entropy is available
    pub fn new() -> Result<Self> {
        let mut check = [0u8; 1];
        getrandom::getrandom(&mut check).map_err(|_| NavError::RandomSourceError)?;
        Ok(Self)
    }
}

impl RandomSource for SecureRng {
    fn next_u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        getrandom::getrandom(&mut buf).map_err(|_| NavError::RandomSourceError)?;
        Ok(u64::from_le_bytes(buf))
    }
}

/// Deterministic xorshift64 generator
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a generator from a seed (zero is remapped to a fixed constant)
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }
}

impl RandomSource for SeededRng {
    fn next_u64(&mut self) -> Result<u64> {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        Ok(x)
    }
}
