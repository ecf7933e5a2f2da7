//! Player records produced by a scrape run

use crate::config::Board;
use serde::Serialize;
use std::collections::BTreeMap;

/// Position code for draft-pick / inactive entries
pub const PICK_POSITION: &str = "PI";

/// One board's numbers for a player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Valuation {
    pub value: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_rank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    /// Signed movement, `"+3"`, `"-1"` or `"0"`
    pub trend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
}

impl Default for Valuation {
    fn default() -> Self {
        Self {
            value: 0,
            position_rank: None,
            rank: None,
            trend: "0".to_string(),
            tier: None,
        }
    }
}

/// A player's state within one run. `name` is the join key between the
/// dynasty pull and the redraft merge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub name: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub is_rookie: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    pub valuations: BTreeMap<Board, Valuation>,
}

impl PlayerRecord {
    pub fn valuation(&self, board: Board) -> Option<&Valuation> {
        self.valuations.get(&board)
    }

    /// Value on `board`, 0 when the board never saw this player
    pub fn value(&self, board: Board) -> i64 {
        self.valuation(board).map(|v| v.value).unwrap_or(0)
    }
}
