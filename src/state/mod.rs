//! Local game state for the Chart Prediction game.
//!
//! This module provides the core state types:
//!
//! - `grid` - Grid dimensions per difficulty level
//! - `selection` - Selected cells and their legality rules
//! - `payout` - Risk/reward preview
//! - `amount` - Minor-unit currency amounts
//! - `session` - Session state machine
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                            GameSession                               │
//! │                                                                      │
//! │  ┌──────────────┐   ┌─────────────────┐   ┌──────────────────┐       │
//! │  │  GridConfig  │──▶│  SelectionSet   │──▶│      Payout      │       │
//! │  │              │   │                 │   │                  │       │
//! │  │ level →      │   │ cells ⊆ [0, n)  │   │ win  = s(1-k/n)² │       │
//! │  │  cols × rows │   │ ≤ 85%, 1/column │   │ lose = s(k/n)²   │       │
//! │  └──────────────┘   └─────────────────┘   └──────────────────┘       │
//! │                                                                      │
//! │  ┌────────────────────────────────────────────────────────────┐      │
//! │  │                     SessionState                           │      │
//! │  │                                                            │      │
//! │  │      Betting ──▶ Playing ──▶ Finished                      │      │
//! │  │         ▲           │            │                         │      │
//! │  │         └───────────┴────────────┘                         │      │
//! │  └────────────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use chartpredict_state::state::{Amount, GameSession, GridConfig, SessionEvent};
//!
//! let mut session = GameSession::new(GridConfig::for_level(0));
//! for column in 0..6 {
//!     session.toggle(column);
//! }
//! session.set_stake(Amount::parse_major("0.01")?)?;
//! session.apply_mut(SessionEvent::Start { balance: Amount::parse_major("1")? })?;
//! ```

pub mod amount;
pub mod grid;
pub mod payout;
pub mod selection;
pub mod session;

// Re-export commonly used types
pub use amount::{Amount, AmountError, MINOR_UNITS_PER_MAJOR};
pub use grid::{GridConfig, DIFFICULTY_PRESETS};
pub use payout::Payout;
pub use selection::{SelectionIssue, SelectionSet};
pub use session::{
    GameSession, InvalidTransition, Outcome, SessionError, SessionEvent, SessionState,
    StartBlocker, TransactionRef,
};
