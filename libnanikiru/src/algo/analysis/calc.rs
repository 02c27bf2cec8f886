//! Discard recommendation: run every candidate discard of a full hand
//! through shanten and acceptance analysis, then rank.

use super::candidate::{DiscardCandidate, RequiredTile, TenpaiCheck};
use crate::algo::cache::MemoCache;
use crate::algo::shanten::ShantenBackend;
use crate::errors::{HandError, HandResult};
use crate::hand;
use crate::tile::{MAX_COPIES, NUM_TILE_KINDS, Tile};
use std::cmp::Ordering;
use std::sync::Arc;
use tinyvec::ArrayVec;

pub const TENPAI_HAND_SIZE: usize = 13;
pub const FULL_HAND_SIZE: usize = 14;

/// Stateless driver over the shanten engine. Cheap to clone; every clone
/// shares the same memo tables, and distinct hands may be analyzed from any
/// number of threads concurrently.
#[derive(Debug, Clone)]
pub struct Analyzer {
    backend: ShantenBackend,
    cache: Arc<MemoCache>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(ShantenBackend::default(), Arc::new(MemoCache::default()))
    }
}

impl Analyzer {
    #[must_use]
    pub fn new(backend: ShantenBackend, cache: Arc<MemoCache>) -> Self {
        Self { backend, cache }
    }

    #[must_use]
    pub fn backend(&self) -> ShantenBackend {
        self.backend
    }

    #[must_use]
    pub fn cache(&self) -> &MemoCache {
        &self.cache
    }

    /// Memoized shanten of an arbitrary count histogram. `meld_offset` adds
    /// sets already fixed outside the concealed hand.
    #[must_use]
    pub fn shanten_of(&self, counts: &[u8; NUM_TILE_KINDS], meld_offset: u8) -> i8 {
        let key = (*counts, meld_offset);
        if let Some(shanten) = self.cache.shanten.get(&key) {
            return shanten;
        }
        let shanten = self.backend.evaluate(counts, meld_offset);
        self.cache.shanten.insert(key, shanten);
        shanten
    }

    /// Tile kinds whose draw strictly improves on `current` shanten. The scan
    /// order is fixed, so the result is deterministic.
    #[must_use]
    pub fn required_tiles(
        &self,
        counts: &[u8; NUM_TILE_KINDS],
        current: i8,
    ) -> ArrayVec<[RequiredTile; NUM_TILE_KINDS]> {
        let mut out = ArrayVec::default();
        for id in 0..NUM_TILE_KINDS {
            if counts[id] >= MAX_COPIES {
                continue;
            }
            let mut trial = *counts;
            trial[id] += 1;
            if self.shanten_of(&trial, 0) < current {
                out.push(RequiredTile {
                    tile: Tile::must(id),
                    count: MAX_COPIES - counts[id],
                });
            }
        }
        out
    }

    /// Rank every distinct discard of a 14-tile hand, best first.
    pub fn analyze_discards(&self, hand_str: &str) -> HandResult<Vec<DiscardCandidate>> {
        let counts = self.counts_for(hand_str, FULL_HAND_SIZE)?;
        let mut candidates = Vec::with_capacity(FULL_HAND_SIZE);
        for id in 0..NUM_TILE_KINDS {
            if counts[id] == 0 {
                continue;
            }
            candidates.push(self.evaluate_discard(&counts, id));
        }
        candidates.sort_by(DiscardCandidate::cmp_ranking);
        if let Some(best) = candidates.first() {
            log::debug!(
                "ranked {} discards for {hand_str}: best {} at shanten {}",
                candidates.len(),
                best.tile,
                best.shanten,
            );
        }
        Ok(candidates)
    }

    /// The single best discard of a 14-tile hand. Runs its own scan rather
    /// than delegating, but the ranking predicate is shared, so the result
    /// always matches the head of [`Self::analyze_discards`].
    pub fn recommend_discard(&self, hand_str: &str) -> HandResult<DiscardCandidate> {
        let counts = self.counts_for(hand_str, FULL_HAND_SIZE)?;
        let mut best: Option<DiscardCandidate> = None;
        for id in 0..NUM_TILE_KINDS {
            if counts[id] == 0 {
                continue;
            }
            if let Some(best) = &best {
                // Shanten is the primary key; a worse candidate cannot win,
                // so skip its acceptance scan.
                let mut rest = counts;
                rest[id] -= 1;
                if self.shanten_of(&rest, 0) > best.shanten {
                    continue;
                }
            }
            let candidate = self.evaluate_discard(&counts, id);
            if best
                .as_ref()
                .is_none_or(|best| candidate.cmp_ranking(best) == Ordering::Less)
            {
                best = Some(candidate);
            }
        }
        let Some(best) = best else {
            unreachable!("a validated 14-tile hand always yields a candidate");
        };
        Ok(best)
    }

    /// Shanten of a 13-tile hand, plus its winning tiles when it is tenpai.
    pub fn check_tenpai(&self, hand_str: &str) -> HandResult<TenpaiCheck> {
        let counts = self.counts_for(hand_str, TENPAI_HAND_SIZE)?;
        let shanten = self.shanten_of(&counts, 0);
        let winning_tiles = if shanten == 0 {
            self.required_tiles(&counts, shanten)
        } else {
            ArrayVec::default()
        };
        Ok(TenpaiCheck {
            is_tenpai: shanten == 0,
            shanten,
            winning_tiles,
        })
    }

    fn evaluate_discard(&self, counts: &[u8; NUM_TILE_KINDS], id: usize) -> DiscardCandidate {
        let mut rest = *counts;
        rest[id] -= 1;
        let shanten = self.shanten_of(&rest, 0);
        let required_tiles = self.required_tiles(&rest, shanten);
        let num_required_tiles = required_tiles.iter().map(|r| r.count).sum();
        DiscardCandidate {
            tile: Tile::must(id),
            shanten,
            num_required_tiles,
            required_tiles,
            held: counts[id],
        }
    }

    fn counts_for(&self, hand_str: &str, expected: usize) -> HandResult<[u8; NUM_TILE_KINDS]> {
        let counts = match self.cache.counts.get(hand_str) {
            Some(counts) => counts,
            None => {
                let counts = hand::hand(hand_str)?;
                self.cache.counts.insert(hand_str.to_owned(), counts);
                counts
            }
        };
        let found = counts.iter().map(|&c| c as usize).sum();
        if found != expected {
            return Err(HandError::InvalidSize { expected, found });
        }
        Ok(counts)
    }
}
