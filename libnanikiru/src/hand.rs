//! Hand notation codec: `"112233456m568p112s"` style strings to tile
//! sequences and 34-slot count histograms and back.

use crate::errors::{HandError, HandResult};
use crate::tile::{JIHAI_START, MANZU_START, NUM_TILE_KINDS, PINZU_START, SOUZU_START, Tile};

/// Parse a hand string into the tile sequence it denotes.
///
/// The grammar is strict: one or more groups, each one or more ASCII digits
/// followed by a single suit letter out of `m p s z`. Anything else,
/// whitespace included, is an error, as is a rank outside 1..=9 (1..=7 for
/// `z`).
pub fn parse(s: &str) -> HandResult<Vec<Tile>> {
    let malformed = |reason: String| HandError::Malformed {
        input: s.to_owned(),
        reason,
    };
    let mut tiles = Vec::with_capacity(14);
    let mut pending: Vec<u32> = Vec::with_capacity(14);
    for ch in s.chars() {
        match ch {
            '0'..='9' => pending.push(ch as u32 - '0' as u32),
            'm' | 'p' | 's' | 'z' => {
                if pending.is_empty() {
                    return Err(malformed(format!("suit '{ch}' is not preceded by any digit")));
                }
                let (start, max_rank) = match ch {
                    'm' => (MANZU_START, 9),
                    'p' => (PINZU_START, 9),
                    's' => (SOUZU_START, 9),
                    _ => (JIHAI_START, 7),
                };
                for rank in pending.drain(..) {
                    if rank == 0 || rank > max_rank {
                        return Err(malformed(format!("rank {rank} is out of range for suit '{ch}'")));
                    }
                    tiles.push(Tile::must(start + rank as usize - 1));
                }
            }
            _ => return Err(malformed(format!("unexpected character '{ch}'"))),
        }
    }
    if !pending.is_empty() {
        return Err(malformed("trailing digits without a suit letter".to_owned()));
    }
    Ok(tiles)
}

/// Fold a tile sequence into its count histogram. Purely a projection; copy
/// limits are the caller's concern.
#[must_use]
pub fn to_counts(tiles: &[Tile]) -> [u8; NUM_TILE_KINDS] {
    let mut counts = [0; NUM_TILE_KINDS];
    for tile in tiles {
        counts[tile.as_usize()] += 1;
    }
    counts
}

/// Parse straight to counts.
pub fn hand(s: &str) -> HandResult<[u8; NUM_TILE_KINDS]> {
    Ok(to_counts(&parse(s)?))
}

/// Render counts back into notation, suits in `m p s z` order.
#[must_use]
pub fn counts_to_string(counts: &[u8; NUM_TILE_KINDS]) -> String {
    let mut out = String::with_capacity(16);
    for (start, end, suit) in [
        (MANZU_START, PINZU_START, 'm'),
        (PINZU_START, SOUZU_START, 'p'),
        (SOUZU_START, JIHAI_START, 's'),
        (JIHAI_START, NUM_TILE_KINDS, 'z'),
    ] {
        let mut any = false;
        for id in start..end {
            for _ in 0..counts[id] {
                out.push((b'1' + (id - start) as u8) as char);
                any = true;
            }
        }
        if any {
            out.push(suit);
        }
    }
    out
}
