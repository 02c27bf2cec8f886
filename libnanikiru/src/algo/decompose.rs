//! Exhaustive enumeration of the ways a hand splits into blocks.
//!
//! Every maximal partition into kotsu, shuntsu, toitsu and partial runs is
//! visited, including overlapping and redundant ones; callers keep whatever
//! minimum they are after. An isolation pre-pass splits off complete sets no
//! surrounding tile can interact with, which cuts the branching factor
//! without losing any optimum.

use super::block::{Block, BlockKind};
use crate::tile::{JIHAI_START, NUM_TILE_KINDS, Tile};
use tinyvec::ArrayVec;

/// A block holds at least two tiles, so a 14-tile hand splits into at most 7.
pub const MAX_BLOCKS: usize = 7;

/// One way to split a hand: the blocks taken plus the tiles left over.
#[derive(Debug, Clone, Copy)]
pub struct Decomposition {
    pub blocks: ArrayVec<[Block; MAX_BLOCKS]>,
    pub rest: [u8; NUM_TILE_KINDS],
}

impl Default for Decomposition {
    fn default() -> Self {
        Self {
            blocks: ArrayVec::default(),
            rest: [0; NUM_TILE_KINDS],
        }
    }
}

impl Decomposition {
    /// (mentsu, tatsu, toitsu) carried by the blocks.
    #[must_use]
    pub fn tally(&self) -> (u8, u8, u8) {
        let mut mentsu = 0;
        let mut tatsu = 0;
        let mut toitsu = 0;
        for block in &self.blocks {
            if block.kind.is_mentsu() {
                mentsu += 1;
            } else if block.kind.is_toitsu() {
                toitsu += 1;
            } else {
                tatsu += 1;
            }
        }
        (mentsu, tatsu, toitsu)
    }

    /// Histogram of everything this decomposition accounts for.
    #[must_use]
    pub fn consumed(&self) -> [u8; NUM_TILE_KINDS] {
        let mut counts = self.rest;
        for block in &self.blocks {
            block.count_into(&mut counts);
        }
        counts
    }
}

/// Split off complete sets that nothing within two ranks can touch. An
/// isolated kotsu or 1-1-1 shuntsu can never serve a better purpose split up,
/// and honors have no neighbors at all.
fn extract_isolated(counts: &mut [u8; NUM_TILE_KINDS], blocks: &mut ArrayVec<[Block; MAX_BLOCKS]>) {
    for suit_start in [0, 9, 18] {
        for i in 0..9 {
            let idx = suit_start + i;
            if counts[idx] >= 3 {
                let isolated =
                    (i.saturating_sub(2)..(i + 3).min(9)).all(|j| j == i || counts[suit_start + j] == 0);
                if isolated {
                    counts[idx] -= 3;
                    blocks.push(Block::new(BlockKind::Kotsu, Tile::must(idx)));
                }
            }
            if i <= 6 && counts[idx] == 1 && counts[idx + 1] == 1 && counts[idx + 2] == 1 {
                let isolated = (i.saturating_sub(2)..(i + 5).min(9))
                    .all(|j| (i..=i + 2).contains(&j) || counts[suit_start + j] == 0);
                if isolated {
                    counts[idx] -= 1;
                    counts[idx + 1] -= 1;
                    counts[idx + 2] -= 1;
                    blocks.push(Block::new(BlockKind::Shuntsu, Tile::must(idx)));
                }
            }
        }
    }
    for idx in JIHAI_START..NUM_TILE_KINDS {
        if counts[idx] >= 3 {
            counts[idx] -= 3;
            blocks.push(Block::new(BlockKind::Kotsu, Tile::must(idx)));
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Node {
    counts: [u8; NUM_TILE_KINDS],
    blocks: ArrayVec<[Block; MAX_BLOCKS]>,
    rest: [u8; NUM_TILE_KINDS],
}

impl Default for Node {
    fn default() -> Self {
        Self {
            counts: [0; NUM_TILE_KINDS],
            blocks: ArrayVec::default(),
            rest: [0; NUM_TILE_KINDS],
        }
    }
}

/// Visit every decomposition of `counts`. The search branches at the lowest
/// positive tile index on each block shape anchored there, plus leaving the
/// tile unconsumed; an explicit work stack keeps the depth independent of the
/// branching.
pub fn decompose(counts: &[u8; NUM_TILE_KINDS], mut emit: impl FnMut(&Decomposition)) {
    debug_assert!(counts.iter().map(|&c| c as usize).sum::<usize>() <= 14);

    let mut seed = Node {
        counts: *counts,
        ..Node::default()
    };
    extract_isolated(&mut seed.counts, &mut seed.blocks);

    let mut stack = vec![seed];
    while let Some(node) = stack.pop() {
        let Some(first) = node.counts.iter().position(|&c| c > 0) else {
            emit(&Decomposition {
                blocks: node.blocks,
                rest: node.rest,
            });
            continue;
        };

        let c = node.counts[first];
        let tile = Tile::must(first);
        let suited = first < JIHAI_START;
        let pos = first % 9;

        let mut take = |kind: BlockKind, spans: &[usize]| {
            let mut next = node;
            for &idx in spans {
                next.counts[idx] -= 1;
            }
            next.blocks.push(Block::new(kind, tile));
            stack.push(next);
        };

        if c >= 2 {
            take(BlockKind::Toitsu, &[first, first]);
        }
        if c >= 3 {
            take(BlockKind::Kotsu, &[first, first, first]);
        }
        if suited && pos <= 6 && node.counts[first + 1] > 0 && node.counts[first + 2] > 0 {
            take(BlockKind::Shuntsu, &[first, first + 1, first + 2]);
        }
        if suited && pos <= 7 && node.counts[first + 1] > 0 {
            let kind = if pos == 0 || pos == 7 {
                BlockKind::Penchan
            } else {
                BlockKind::Ryanmen
            };
            take(kind, &[first, first + 1]);
        }
        if suited && pos <= 6 && node.counts[first + 2] > 0 {
            take(BlockKind::Kanchan, &[first, first + 2]);
        }

        let mut skipped = node;
        skipped.counts[first] -= 1;
        skipped.rest[first] += 1;
        stack.push(skipped);
    }
}

/// Materialized variant, mostly for tests and inspection.
#[must_use]
pub fn decompositions(counts: &[u8; NUM_TILE_KINDS]) -> Vec<Decomposition> {
    let mut out = vec![];
    decompose(counts, |d| out.push(*d));
    out
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::hand::hand;

    #[test]
    pub fn conservation() {
        for s in [
            "112233456m568p12s",
            "1122334455667m",
            "123456789m1123p",
            "1234567z123456m",
            "",
        ] {
            let counts = hand(s).unwrap();
            let all = decompositions(&counts);
            assert!(!all.is_empty());
            for d in &all {
                assert_eq!(d.consumed(), counts, "leaky decomposition of {s:?}");
            }
        }
    }

    #[test]
    pub fn empty_hand_decomposes_trivially() {
        let all = decompositions(&[0; NUM_TILE_KINDS]);
        assert_eq!(all.len(), 1);
        assert!(all[0].blocks.is_empty());
    }

    #[test]
    pub fn isolated_sets_are_forced() {
        // 999m and 777z sit alone, so every decomposition carries both kotsu.
        let counts = hand("999m34568p777z").unwrap();
        for d in decompositions(&counts) {
            let kotsu: Vec<_> = d
                .blocks
                .iter()
                .filter(|b| b.kind == BlockKind::Kotsu)
                .map(|b| b.tile.to_string())
                .collect();
            assert!(kotsu.contains(&"9m".to_owned()));
            assert!(kotsu.contains(&"7z".to_owned()));
        }
    }

    #[test]
    pub fn partial_runs_are_classified_by_edge() {
        let counts = hand("12m45p89s").unwrap();
        let any_with = |kind: BlockKind, tile: &str| {
            decompositions(&counts).iter().any(|d| {
                d.blocks
                    .iter()
                    .any(|b| b.kind == kind && b.tile.to_string() == tile)
            })
        };
        assert!(any_with(BlockKind::Penchan, "1m"));
        assert!(any_with(BlockKind::Ryanmen, "4p"));
        assert!(any_with(BlockKind::Penchan, "8s"));
    }
}
