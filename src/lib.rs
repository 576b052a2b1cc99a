//! Chart Prediction State Library
//!
//! Session controller for the Chart Prediction staking game: a player picks
//! cells on a grid, stakes funds, and an external ledger settles the bet and
//! reports which cell won.
//!
//! # Overview
//!
//! - **Session State Machine** - `Betting -> Playing -> Finished` with guarded,
//!   validated transitions.
//!
//! - **Selection Rules** - At most 85% of the grid and at least one cell in
//!   every column.
//!
//! - **Payout Preview** - Win/loss amounts computed locally for instant feedback.
//!
//! - **Settlement** - Submits the bet to the ledger, runs the countdown while
//!   awaiting finality, and reads the outcome event from the finalized
//!   transaction.
//!
//! # Design Principles
//!
//! 1. **The ledger is authoritative** - Local validation and payout figures are
//!    for display; the outcome always comes from the ledger's event.
//!
//! 2. **State machines validate transitions** - Invalid state changes are
//!    rejected with clear errors and leave the session untouched.
//!
//! 3. **Never stuck playing** - Every failure returns the session to the
//!    nearest consistent state.
//!
//! 4. **Serialization-ready** - State can be converted to JSON for clients.
//!
//! # Example
//!
//! ```rust
//! use chartpredict_state::state::{
//!     Amount, GameSession, GridConfig, SessionEvent, SessionState,
//! };
//!
//! let mut session = GameSession::new(GridConfig::for_level(0));
//!
//! // One cell in each of the 6 columns
//! for column in 0..6 {
//!     session.toggle(column);
//! }
//! session.set_stake(Amount::parse_major("0.01").unwrap()).unwrap();
//!
//! let payout = session.payout();
//! assert!(payout.win > payout.lose);
//!
//! session
//!     .apply_mut(SessionEvent::Start { balance: Amount::parse_major("1").unwrap() })
//!     .unwrap();
//! assert!(matches!(session.state(), SessionState::Playing { .. }));
//! ```

pub mod config;
pub mod controller;
pub mod ledger;
pub mod settlement;
pub mod state;

pub use config::{ConfigError, ControllerConfig};
pub use controller::GameController;
pub use ledger::{Ledger, LedgerError, LedgerEvent};
pub use settlement::{BalanceView, SettlementError, SettlementEvent, SettlementOrchestrator};

// Re-export everything from state module at crate root
pub use state::*;
