//! Seam to the external point calculator.
//!
//! Scoring a completed hand (yaku, fu, points) is delegated wholesale to an
//! out-of-process collaborator; this module only fixes the interface and the
//! JSON envelope it speaks. The engine never assumes an implementation is
//! present, and collaborator failures (timeouts, malformed replies) stay on
//! the caller's side of the trait.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Options forwarded verbatim to the calculator.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreOptions {
    pub dora: Vec<String>,
    pub extra: Option<String>,
    pub wind: Option<String>,
    pub disable_wyakuman: bool,
    pub disable_kuitan: bool,
    pub disable_aka: bool,
    pub enable_local_yaku: Vec<String>,
    pub disable_yaku: Vec<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreResult {
    pub han: u8,
    pub fu: u8,
    pub ten: i32,
    pub yaku: Vec<String>,
    /// Calculator-specific fields passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

pub trait ScoreService: Send + Sync {
    fn calculate(&self, hand: &str, options: &ScoreOptions) -> Result<ScoreResult>;
}
