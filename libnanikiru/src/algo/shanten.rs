//! Shanten evaluation for ordinary (4 mentsu + 1 toitsu) hands.
//!
//! Two interchangeable strategies sit behind [`ShantenBackend`]: a suit-wise
//! evaluator used in production, and the exhaustive decomposition fold kept
//! as its verification oracle. Chiitoitsu and kokushi shapes are not modeled.

use super::decompose;
use crate::tile::{JIHAI_START, NUM_TILE_KINDS};

/// Distance formula over one block tally.
///
/// Only four mentsu slots count; surplus blocks are waste, and the head bonus
/// applies exactly when blocks overflow the slots while a toitsu exists. The
/// toitsu feeding the bonus may itself sit among the capped blocks; that is
/// intentional and both strategies share the behavior.
#[must_use]
pub fn block_shanten(mentsu: u8, tatsu: u8, toitsu: u8, meld_offset: u8) -> i8 {
    let mentsu = i32::from(mentsu) + i32::from(meld_offset);
    let tatsu_blocks = i32::from(tatsu) + i32::from(toitsu);
    let usable = if mentsu + tatsu_blocks > 4 {
        tatsu_blocks.min(4 - mentsu)
    } else {
        tatsu_blocks
    };
    let head = i32::from(mentsu + tatsu_blocks > 4 && toitsu > 0);
    (8 - mentsu * 2 - usable - head) as i8
}

/// Fold the formula over every decomposition and keep the minimum. Slow and
/// certain; the oracle the fast path is checked against.
#[must_use]
pub fn calc_exhaustive(counts: &[u8; NUM_TILE_KINDS], meld_offset: u8) -> i8 {
    let mut best = i8::MAX;
    decompose::decompose(counts, |d| {
        let (mentsu, tatsu, toitsu) = d.tally();
        best = best.min(block_shanten(mentsu, tatsu, toitsu, meld_offset));
    });
    best
}

/// A (mentsu, tatsu, toitsu) extraction achievable within one suit.
type Pattern = (u8, u8, u8);

fn suit_patterns(counts: &mut [u8], suited: bool, acc: Pattern, out: &mut Vec<Pattern>) {
    let Some(first) = counts.iter().position(|&c| c > 0) else {
        out.push(acc);
        return;
    };
    let (mentsu, tatsu, toitsu) = acc;
    let len = counts.len();

    if counts[first] >= 3 {
        counts[first] -= 3;
        suit_patterns(counts, suited, (mentsu + 1, tatsu, toitsu), out);
        counts[first] += 3;
    }
    if counts[first] >= 2 {
        counts[first] -= 2;
        suit_patterns(counts, suited, (mentsu, tatsu, toitsu + 1), out);
        counts[first] += 2;
    }
    if suited && first + 2 < len && counts[first + 1] > 0 && counts[first + 2] > 0 {
        counts[first] -= 1;
        counts[first + 1] -= 1;
        counts[first + 2] -= 1;
        suit_patterns(counts, suited, (mentsu + 1, tatsu, toitsu), out);
        counts[first] += 1;
        counts[first + 1] += 1;
        counts[first + 2] += 1;
    }
    if suited && first + 1 < len && counts[first + 1] > 0 {
        counts[first] -= 1;
        counts[first + 1] -= 1;
        suit_patterns(counts, suited, (mentsu, tatsu + 1, toitsu), out);
        counts[first] += 1;
        counts[first + 1] += 1;
    }
    if suited && first + 2 < len && counts[first + 2] > 0 {
        counts[first] -= 1;
        counts[first + 2] -= 1;
        suit_patterns(counts, suited, (mentsu, tatsu + 1, toitsu), out);
        counts[first] += 1;
        counts[first + 2] += 1;
    }

    counts[first] -= 1;
    suit_patterns(counts, suited, acc, out);
    counts[first] += 1;
}

/// Drop tallies another one beats on every axis. The formula never improves
/// when any component shrinks, so dominated tallies cannot carry the optimum.
fn prune(patterns: &mut Vec<Pattern>) {
    patterns.sort_unstable();
    patterns.dedup();
    let snapshot = patterns.clone();
    patterns.retain(|p| {
        !snapshot
            .iter()
            .any(|q| q != p && q.0 >= p.0 && q.1 >= p.1 && q.2 >= p.2)
    });
}

fn merge(a: &[Pattern], b: &[Pattern]) -> Vec<Pattern> {
    let mut out = Vec::with_capacity(a.len() * b.len());
    for &(m1, t1, p1) in a {
        for &(m2, t2, p2) in b {
            out.push((m1 + m2, t1 + t2, p1 + p2));
        }
    }
    prune(&mut out);
    out
}

/// Suit-wise evaluation: blocks never cross suit borders, so each suit's
/// achievable tallies are enumerated independently (honors with runs
/// disabled), combined, and run through the shared formula. With four or more
/// mentsu the cap degenerates the formula to -1 with a toitsu and 0 without,
/// which classifies complete and bare-tenpai hands.
#[must_use]
pub fn calc_suitwise(counts: &[u8; NUM_TILE_KINDS], meld_offset: u8) -> i8 {
    let mut combined: Vec<Pattern> = vec![(0, 0, 0)];
    for (start, end, suited) in [
        (0, 9, true),
        (9, 18, true),
        (18, JIHAI_START, true),
        (JIHAI_START, NUM_TILE_KINDS, false),
    ] {
        let mut suit = [0u8; 9];
        let len = end - start;
        suit[..len].copy_from_slice(&counts[start..end]);
        let mut patterns = Vec::with_capacity(16);
        suit_patterns(&mut suit[..len], suited, (0, 0, 0), &mut patterns);
        prune(&mut patterns);
        combined = merge(&combined, &patterns);
    }

    combined
        .iter()
        .map(|&(m, t, p)| block_shanten(m, t, p, meld_offset))
        .min()
        .unwrap_or(8)
}

/// Strategy selector exposed to callers; both variants agree on every valid
/// hand, differing only in cost.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ShantenBackend {
    /// Suit-wise evaluation, the production default.
    #[default]
    SuitWise,
    /// Full decomposition search, retained as the oracle.
    Exhaustive,
}

impl ShantenBackend {
    #[must_use]
    pub fn evaluate(self, counts: &[u8; NUM_TILE_KINDS], meld_offset: u8) -> i8 {
        match self {
            Self::SuitWise => calc_suitwise(counts, meld_offset),
            Self::Exhaustive => calc_exhaustive(counts, meld_offset),
        }
    }
}
