//! Outcome event parsing.

use serde_json::Value;

use super::{value_as_u64, LedgerEvent};
use crate::state::Outcome;

/// Type name of the outcome event, matched as a substring of the full type.
pub const OUTCOME_EVENT_TYPE: &str = "GamePlayedEvent";

/// Decoded outcome event payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamePlayedEvent {
    pub won: bool,
    /// Minor units won or lost
    pub amount_changed: u64,
    pub winning_number: u64,
}

impl GamePlayedEvent {
    /// Decode the event's `data` object.
    pub fn from_data(data: &Value) -> Result<Self, String> {
        let won = data
            .get("won")
            .and_then(Value::as_bool)
            .ok_or_else(|| "missing or non-boolean `won`".to_string())?;
        let amount_changed = data
            .get("amount_changed")
            .and_then(value_as_u64)
            .ok_or_else(|| "missing or non-integer `amount_changed`".to_string())?;
        let winning_number = data
            .get("winning_number")
            .and_then(value_as_u64)
            .ok_or_else(|| "missing or non-integer `winning_number`".to_string())?;

        Ok(Self {
            won,
            amount_changed,
            winning_number,
        })
    }

    /// Convert to an outcome; the winning number must index the grid.
    pub fn to_outcome(&self, total_cells: usize) -> Result<Outcome, String> {
        let cell = usize::try_from(self.winning_number)
            .ok()
            .filter(|cell| *cell < total_cells)
            .ok_or_else(|| {
                format!(
                    "winning_number {} outside grid of {} cells",
                    self.winning_number, total_cells
                )
            })?;
        Outcome::from_ledger(self.won, self.amount_changed, cell)
            .ok_or_else(|| format!("amount_changed {} out of range", self.amount_changed))
    }
}

/// First outcome event among a transaction's events.
pub fn find_outcome_event(events: &[LedgerEvent]) -> Option<&LedgerEvent> {
    events
        .iter()
        .find(|e| e.event_type.contains(OUTCOME_EVENT_TYPE))
}
