//! Pair values for a level.

use super::shuffle::shuffle;
use crate::core::rng::RandomSource;

/// Values `1..=pairs`, each twice, in shuffled order.
pub fn generate_values<R: RandomSource + ?Sized>(pairs: u32, rng: &mut R) -> Vec<u32> {
    let mut values: Vec<u32> = (1..=pairs).chain(1..=pairs).collect();
    shuffle(&mut values, rng);
    values
}
