mod calc;
mod candidate;

pub use calc::{Analyzer, FULL_HAND_SIZE, TENPAI_HAND_SIZE};
pub use candidate::{DiscardCandidate, RequiredTile, TenpaiCheck};
