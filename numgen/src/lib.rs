//! Bounded random numbers for the streaming call.
//! 1. Values are drawn from the half-open range `[min, max)`.
//! 2. The generator is seeded once, either from OS entropy or from an explicit seed.
//! a. A fixed seed yields the same sequence on every run.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("empty number range: min ({min}) must be lower than max ({max})")]
pub struct RangeError {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug)]
pub struct NumberSource {
    range: Range<i64>,
    rng: StdRng,
}

impl NumberSource {
    pub fn new(min: i64, max: i64) -> Result<Self, RangeError> {
        Self::with_rng(min, max, StdRng::from_entropy())
    }

    pub fn seeded(min: i64, max: i64, seed: u64) -> Result<Self, RangeError> {
        Self::with_rng(min, max, StdRng::seed_from_u64(seed))
    }

    fn with_rng(min: i64, max: i64, rng: StdRng) -> Result<Self, RangeError> {
        if min >= max {
            return Err(RangeError { min, max });
        }
        Ok(Self {
            range: min..max,
            rng,
        })
    }

    pub fn range(&self) -> &Range<i64> {
        &self.range
    }

    pub fn next_number(&mut self) -> i64 {
        self.rng.gen_range(self.range.clone())
    }
}

impl Iterator for NumberSource {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        Some(self.next_number())
    }
}
