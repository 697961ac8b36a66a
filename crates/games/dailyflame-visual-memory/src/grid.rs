use rand::Rng;
use rand::seq::index;

/// Side length of the grid at the start of `level`: 3, growing by one every
/// four levels (5, 9, 13, ...).
pub fn grid_size(level: u32) -> u32 {
    3 + level.saturating_sub(1) / 4
}

pub fn cell_count(level: u32) -> u32 {
    let side = grid_size(level);
    side * side
}

/// `min(level, cells)` distinct cell indices, sorted.
pub fn pick_targets<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Vec<u32> {
    let cells = cell_count(level) as usize;
    let wanted = (level as usize).min(cells);
    let mut targets: Vec<u32> = index::sample(rng, cells, wanted)
        .into_iter()
        .map(|i| i as u32)
        .collect();
    targets.sort_unstable();
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn grid_grows_every_four_levels() {
        assert_eq!(grid_size(1), 3);
        assert_eq!(grid_size(4), 3);
        assert_eq!(grid_size(5), 4);
        assert_eq!(grid_size(8), 4);
        assert_eq!(grid_size(9), 5);
        assert_eq!(cell_count(5), 16);
    }

    #[test]
    fn targets_match_level() {
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(pick_targets(1, &mut rng).len(), 1);
        assert_eq!(pick_targets(5, &mut rng).len(), 5);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn grid_size_formula(level in 1u32..200) {
                prop_assert_eq!(grid_size(level), 3 + (level - 1) / 4);
                prop_assert!(grid_size(level + 1) >= grid_size(level));
            }

            #[test]
            fn targets_distinct_and_in_range(level in 1u32..60, seed in any::<u64>()) {
                let mut rng = StdRng::seed_from_u64(seed);
                let targets = pick_targets(level, &mut rng);
                let cells = cell_count(level);
                prop_assert_eq!(targets.len() as u32, level.min(cells));
                prop_assert!(targets.iter().all(|&t| t < cells));
                prop_assert!(targets.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
