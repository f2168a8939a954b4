//! Fisher–Yates shuffle.

use crate::core::rng::RandomSource;

/// Shuffle `values` in place.
///
/// Sweeps from the last index down to 1, swapping each position with an
/// index drawn uniformly from `0..=i`. Every permutation is equally likely
/// when `rng` is uniform.
pub fn shuffle<T, R: RandomSource + ?Sized>(values: &mut [T], rng: &mut R) {
    for i in (1..values.len()).rev() {
        let j = rng.index_up_to(i);
        values.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;

    /// Replays a fixed list of indices.
    struct Scripted {
        picks: Vec<usize>,
        calls: Vec<usize>,
    }

    impl RandomSource for Scripted {
        fn index_up_to(&mut self, upper: usize) -> usize {
            self.calls.push(upper);
            let pick = self.picks.remove(0);
            assert!(pick <= upper);
            pick
        }
    }

    #[test]
    fn test_sweep_order() {
        let mut rng = Scripted {
            picks: vec![0, 0, 0],
            calls: Vec::new(),
        };
        let mut data = vec!['a', 'b', 'c', 'd'];

        shuffle(&mut data, &mut rng);

        // i=3 swaps with 0, i=2 swaps with 0, i=1 swaps with 0
        assert_eq!(rng.calls, vec![3, 2, 1]);
        assert_eq!(data, vec!['b', 'c', 'd', 'a']);
    }

    #[test]
    fn test_identity_picks_keep_order() {
        let mut rng = Scripted {
            picks: vec![4, 3, 2, 1],
            calls: Vec::new(),
        };
        let mut data = vec![1, 2, 3, 4, 5];
        shuffle(&mut data, &mut rng);
        assert_eq!(data, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_short_inputs_draw_nothing() {
        let mut rng = Scripted {
            picks: Vec::new(),
            calls: Vec::new(),
        };
        let mut empty: Vec<u32> = Vec::new();
        shuffle(&mut empty, &mut rng);

        let mut one = vec![9];
        shuffle(&mut one, &mut rng);

        assert!(rng.calls.is_empty());
        assert_eq!(one, vec![9]);
    }

    #[test]
    fn test_seeded_shuffle() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (1..=10).collect();
        shuffle(&mut data, &mut rng);

        // Should be same elements, different order (very likely)
        assert_ne!(data, (1..=10).collect::<Vec<_>>());
        data.sort_unstable();
        assert_eq!(data, (1..=10).collect::<Vec<_>>());
    }
}
