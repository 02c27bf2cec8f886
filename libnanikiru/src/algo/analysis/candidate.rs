use crate::tile::{NUM_TILE_KINDS, Tile};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use tinyvec::ArrayVec;

/// A tile kind whose draw strictly lowers shanten, and how many copies of it
/// are still unseen from this hand's point of view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequiredTile {
    pub tile: Tile,
    pub count: u8,
}

/// Evaluation of discarding one tile kind from a full hand.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct DiscardCandidate {
    #[serde(rename = "discardTile")]
    pub tile: Tile,
    pub shanten: i8,
    /// Sum of the remaining copies over all required tiles.
    #[serde(rename = "effectiveTileCount")]
    pub num_required_tiles: u8,
    #[serde(rename = "effectiveTiles")]
    pub required_tiles: ArrayVec<[RequiredTile; NUM_TILE_KINDS]>,
    /// Copies held before the discard; a ranking input, not part of the
    /// reported payload.
    #[serde(skip)]
    pub held: u8,
}

impl DiscardCandidate {
    /// Ranking order: shanten first, then widest acceptance, then the
    /// source's frequency-then-identity tie-break. Total over distinct
    /// candidate tiles, so the ranking is reproducible.
    #[must_use]
    pub fn cmp_ranking(&self, other: &Self) -> Ordering {
        self.shanten
            .cmp(&other.shanten)
            .then_with(|| other.num_required_tiles.cmp(&self.num_required_tiles))
            .then_with(|| other.held.cmp(&self.held))
            .then_with(|| self.tile.cmp(&other.tile))
    }
}

/// Outcome of a 13-tile tenpai query.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct TenpaiCheck {
    #[serde(rename = "isTenpai")]
    pub is_tenpai: bool,
    pub shanten: i8,
    /// Non-empty exactly when tenpai; reported as bare tile notation.
    #[serde(rename = "winningTiles", serialize_with = "tiles_as_notation")]
    pub winning_tiles: ArrayVec<[RequiredTile; NUM_TILE_KINDS]>,
}

fn tiles_as_notation<S: Serializer>(
    tiles: &ArrayVec<[RequiredTile; NUM_TILE_KINDS]>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(tiles.iter().map(|required| required.tile.to_string()))
}
