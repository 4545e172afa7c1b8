//! Seed expansion for reproducible generator streams.
//!
//! Seeds are expanded with SplitMix64 into the full generator state so each
//! `u64` maps to exactly one stream, and ensemble members derive their own
//! seeds from a base seed and their index.

use rand::{SeedableRng, rngs::SmallRng};

/// SplitMix64 increment (the 64-bit golden ratio), also used as the spacing
/// between ensemble member seeds.
const MEMBER_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

/// Derives the seed of ensemble member `member` from `base_seed`.
///
/// # Examples
/// ```
/// use geosurr_core::mix_member_seed;
///
/// assert_ne!(mix_member_seed(7, 0), mix_member_seed(7, 1));
/// assert_eq!(mix_member_seed(7, 3), mix_member_seed(7, 3));
/// ```
#[inline]
#[must_use]
pub fn mix_member_seed(base_seed: u64, member: usize) -> u64 {
    splitmix64(base_seed ^ ((member as u64 + 1).wrapping_mul(MEMBER_SEED_SPACING)))
}

#[inline]
fn splitmix64_next(state: &mut u64) -> u64 {
    *state = state.wrapping_add(MEMBER_SEED_SPACING);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    z ^ (z >> 31)
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    splitmix64_next(&mut state)
}

/// Builds the generator for `seed`.
///
/// The generator state is filled with consecutive SplitMix64 outputs
/// written little-endian, then handed to [`SeedableRng::from_seed`]. A seed
/// names one stream per pointer width: `SmallRng` is Xoshiro256++ on 64-bit
/// targets and Xoshiro128++ on 32-bit ones.
#[must_use]
pub fn seeded_rng(seed: u64) -> SmallRng {
    let mut state = seed;
    let mut bytes = <SmallRng as SeedableRng>::Seed::default();
    for chunk in bytes.as_mut().chunks_exact_mut(8) {
        chunk.copy_from_slice(&splitmix64_next(&mut state).to_le_bytes());
    }
    SmallRng::from_seed(bytes)
}

/// Builds a generator seeded from the given seed or, when absent, from
/// operating-system entropy.
#[must_use]
pub fn rng_for(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => seeded_rng(seed),
        None => SmallRng::from_entropy(),
    }
}
