//! Chance oracle for deterministic probability rolls.
//!
//! Every probabilistic step of an enhancement (main roll, durability escape,
//! bonus roll, enchant draw, drill upgrade) goes through [`ChanceOracle`].
//!
//! # Determinism
//!
//! Implementations map a seed to a value without internal state, so replaying
//! a region with the same world seed and request order reproduces every
//! outcome. Each roll of a request derives its own seed through
//! [`compute_seed`].
use crate::config::Odds;

/// Chance oracle: independent Bernoulli trials and uniform draws.
pub trait ChanceOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Succeeds with the given percentage; 0 never succeeds, 100 always does.
    fn chance(&self, seed: u64, percent: u32) -> bool {
        match percent {
            0 => false,
            p if p >= 100 => true,
            p => self.roll_d100(seed) <= p,
        }
    }

    /// Succeeds with `numerator` in `denominator` odds.
    fn odds(&self, seed: u64, odds: Odds) -> bool {
        if odds.is_never() {
            return false;
        }
        if odds.is_certain() {
            return true;
        }
        self.next_u32(seed) % odds.denominator < odds.numerator
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG-XSH-RR generator evaluated statelessly on the derived seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgChance;

impl PcgChance {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl ChanceOracle for PcgChance {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Derives the seed of one roll.
///
/// * `world_seed` - base seed of the region state
/// * `nonce` - number of requests committed before this one
/// * `item` - target item of the request
/// * `context` - index of the roll within the request (0 for the first)
pub fn compute_seed(world_seed: u64, nonce: u64, item: u32, context: u32) -> u64 {
    let mut hash = world_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (item as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic() {
        let seed = compute_seed(42, 3, 1001, 0);
        assert_eq!(PcgChance.next_u32(seed), PcgChance.next_u32(seed));
        assert_ne!(seed, compute_seed(42, 3, 1001, 1));
    }

    #[test]
    fn chance_bounds() {
        for seed in 0..64 {
            assert!(!PcgChance.chance(seed, 0));
            assert!(PcgChance.chance(seed, 100));
            assert!(!PcgChance.odds(seed, Odds::NEVER));
            let draw = PcgChance.range(seed, 60, 109);
            assert!((60..=109).contains(&draw));
        }
    }
}
