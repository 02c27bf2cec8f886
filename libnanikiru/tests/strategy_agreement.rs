//! Randomized cross-checks of the suit-wise evaluator against the exhaustive
//! decomposition oracle, plus the determinism guarantees of the ranking.

use nanikiru::algo::shanten::{calc_exhaustive, calc_suitwise};
use nanikiru::hand::counts_to_string;
use nanikiru::tile::{MAX_COPIES, NUM_TILE_KINDS};
use nanikiru::Analyzer;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Draw `len` tiles from a full 136-tile wall without replacement.
fn random_counts(rng: &mut ChaCha8Rng, len: usize) -> [u8; NUM_TILE_KINDS] {
    let mut wall: Vec<u8> = (0..NUM_TILE_KINDS as u8)
        .flat_map(|kind| std::iter::repeat_n(kind, MAX_COPIES as usize))
        .collect();
    let (drawn, _) = wall.partial_shuffle(rng, len);
    let mut counts = [0; NUM_TILE_KINDS];
    for &kind in drawn.iter() {
        counts[kind as usize] += 1;
    }
    counts
}

#[test]
fn strategies_agree_on_random_hands() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED_0001);
    for round in 0..400 {
        for len in [13, 14] {
            let counts = random_counts(&mut rng, len);
            let fast = calc_suitwise(&counts, 0);
            let slow = calc_exhaustive(&counts, 0);
            assert_eq!(
                fast,
                slow,
                "round {round}: strategies disagree on {}",
                counts_to_string(&counts),
            );
        }
    }
}

#[test]
fn strategies_agree_on_clustered_hands() {
    // Uniform draws rarely produce flush-like shapes, so also sample hands
    // biased into at most two suits, where triplet/run overlaps concentrate.
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED_0002);
    for round in 0..200 {
        let suits = [rng.random_range(0..4usize), rng.random_range(0..4usize)];
        let mut wall: Vec<u8> = (0..NUM_TILE_KINDS as u8)
            .filter(|&kind| {
                let suit = kind as usize / 9;
                suits.contains(&suit.min(3))
            })
            .flat_map(|kind| std::iter::repeat_n(kind, MAX_COPIES as usize))
            .collect();
        let (drawn, _) = wall.partial_shuffle(&mut rng, 13);
        let mut counts = [0; NUM_TILE_KINDS];
        for &kind in drawn.iter() {
            counts[kind as usize] += 1;
        }
        let fast = calc_suitwise(&counts, 0);
        let slow = calc_exhaustive(&counts, 0);
        assert_eq!(
            fast,
            slow,
            "round {round}: strategies disagree on {}",
            counts_to_string(&counts),
        );
    }
}

#[test]
fn required_tiles_lower_shanten_by_exactly_one() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED_0003);
    let analyzer = Analyzer::default();
    for _ in 0..200 {
        let counts = random_counts(&mut rng, 13);
        let shanten = analyzer.shanten_of(&counts, 0);
        for required in analyzer.required_tiles(&counts, shanten) {
            let mut drawn = counts;
            drawn[required.tile.as_usize()] += 1;
            assert_eq!(
                calc_suitwise(&drawn, 0),
                shanten - 1,
                "drawing {} from {}",
                required.tile,
                counts_to_string(&counts),
            );
            assert_eq!(required.count, MAX_COPIES - counts[required.tile.as_usize()]);
        }
    }
}

#[test]
fn ranking_is_reproducible() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED_0004);
    let analyzer = Analyzer::default();
    for _ in 0..50 {
        let counts = random_counts(&mut rng, 14);
        let hand_str = counts_to_string(&counts);
        let first = analyzer.analyze_discards(&hand_str).unwrap();
        let second = analyzer.analyze_discards(&hand_str).unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.tile, b.tile);
            assert_eq!(a.shanten, b.shanten);
            assert_eq!(a.num_required_tiles, b.num_required_tiles);
        }
        let recommended = analyzer.recommend_discard(&hand_str).unwrap();
        assert_eq!(recommended.tile, first[0].tile, "{hand_str}");
    }
}
