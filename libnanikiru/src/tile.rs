use crate::errors::HandError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const MANZU_START: usize = 0;
pub const PINZU_START: usize = 9;
pub const SOUZU_START: usize = 18;
pub const JIHAI_START: usize = 27;
/// Number of distinct tile kinds.
pub const NUM_TILE_KINDS: usize = 34;
/// Physical copies of each kind in the set.
pub const MAX_COPIES: u8 = 4;

/// One of the 34 tile kinds as a dense index: 0..9 manzu, 9..18 pinzu,
/// 18..27 souzu, 27..34 jihai.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(u8);

impl Tile {
    #[inline]
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        if (id as usize) < NUM_TILE_KINDS {
            Some(Self(id))
        } else {
            None
        }
    }

    /// The index must already be known to be in range.
    #[inline]
    #[must_use]
    pub fn must(id: usize) -> Self {
        debug_assert!(id < NUM_TILE_KINDS);
        Self(id as u8)
    }

    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_jihai(self) -> bool {
        self.0 as usize >= JIHAI_START
    }

    /// 1-based rank within the suit: 1..=9 for number suits, 1..=7 for jihai.
    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        if self.is_jihai() {
            self.0 - JIHAI_START as u8 + 1
        } else {
            self.0 % 9 + 1
        }
    }

    #[inline]
    #[must_use]
    pub const fn suit_char(self) -> char {
        match self.0 as usize {
            MANZU_START..PINZU_START => 'm',
            PINZU_START..SOUZU_START => 'p',
            SOUZU_START..JIHAI_START => 's',
            _ => 'z',
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit_char())
    }
}

impl FromStr for Tile {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: String| HandError::Malformed {
            input: s.to_owned(),
            reason,
        };
        let mut chars = s.chars();
        let (Some(rank_char), Some(suit_char), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(malformed("expected a rank digit followed by a suit letter".to_owned()));
        };
        let Some(rank) = rank_char.to_digit(10) else {
            return Err(malformed(format!("invalid rank '{rank_char}'")));
        };
        let (start, max_rank) = match suit_char {
            'm' => (MANZU_START, 9),
            'p' => (PINZU_START, 9),
            's' => (SOUZU_START, 9),
            'z' => (JIHAI_START, 7),
            _ => return Err(malformed(format!("invalid suit '{suit_char}'"))),
        };
        if rank == 0 || rank > max_rank {
            return Err(malformed(format!("rank {rank} is out of range for suit '{suit_char}'")));
        }
        Ok(Self::must(start + rank as usize - 1))
    }
}

impl Serialize for Tile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|err| D::Error::custom(format!("{err}")))
    }
}
