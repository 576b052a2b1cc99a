//! Game session state machine.
//!
//! One session is one bet-to-resolution cycle on a fixed grid.
//!
//! # State Diagram
//!
//! ```text
//!                    start (selection valid, stake > 0, balance >= stake)
//! ┌───────────┐ ───────────────────────────────────────────▶ ┌───────────┐
//! │  Betting  │                                              │  Playing  │◀─┐ submitted
//! │           │ ◀─────────────────────────────────────────── │           │──┘ tick
//! └───────────┘   submission_failed (selection kept)         └─────┬─────┘
//!   ▲     ▲                                                        │
//!   │     │       resolution_failed | abandon (session dropped)    │
//!   │     └────────────────────────────────────────────────────────┤
//!   │                                                              │ resolved
//!   │ play_again                                                   ▼
//!   │                                                        ┌───────────┐
//!   └─────────────────────────────────────────────────────── │ Finished  │
//!                                                            └───────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::amount::{minor_to_major, Amount, AmountError};
use super::grid::GridConfig;
use super::payout::Payout;
use super::selection::{SelectionIssue, SelectionSet};

/// Countdown length, in ticks, started when a session begins playing.
pub const DEFAULT_COUNTDOWN_TICKS: u8 = 5;

/// Opaque ledger transaction identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionRef(String);

impl TransactionRef {
    /// Wrap a ledger transaction hash.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw hash.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a settled session, as reported by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub won: bool,
    /// Signed change in minor units (negative on a loss)
    pub amount_delta: i64,
    pub winning_cell: usize,
}

impl Outcome {
    /// Build from the ledger's unsigned `amount_changed`.
    ///
    /// Returns `None` when the amount does not fit a signed delta.
    pub fn from_ledger(won: bool, amount_changed: u64, winning_cell: usize) -> Option<Self> {
        let magnitude = i64::try_from(amount_changed).ok()?;
        Some(Self {
            won,
            amount_delta: if won { magnitude } else { -magnitude },
            winning_cell,
        })
    }

    /// Signed change in major units.
    pub fn amount_delta_major(&self) -> f64 {
        minor_to_major(self.amount_delta as i128)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "won": self.won,
            "amount_delta": self.amount_delta_major(),
            "winning_cell": self.winning_cell
        })
    }
}

/// Session lifecycle states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Selection and stake are editable
    #[default]
    Betting,

    /// Stake submitted or being submitted; selection frozen
    Playing {
        settlement: Option<TransactionRef>,
        countdown: Option<u8>,
    },

    /// Ledger reported an outcome
    Finished { outcome: Outcome },
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Betting => "betting",
            Self::Playing { .. } => "playing",
            Self::Finished { .. } => "finished",
        }
    }

    pub fn is_betting(&self) -> bool {
        matches!(self, Self::Betting)
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing { .. })
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Betting => write!(f, "Betting"),
            Self::Playing {
                settlement: Some(tx),
                ..
            } => write!(f, "Playing({})", tx),
            Self::Playing {
                settlement: None, ..
            } => write!(f, "Playing(unsubmitted)"),
            Self::Finished { outcome } => {
                write!(f, "Finished({})", if outcome.won { "won" } else { "lost" })
            }
        }
    }
}

/// State transition events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Commit the bet; `balance` is the cached spendable balance
    Start { balance: Amount },
    Submitted { settlement: TransactionRef },
    SubmissionFailed,
    Tick,
    Resolved { outcome: Outcome },
    ResolutionFailed,
    /// Caller gave up on an in-flight settlement
    Abandon,
    PlayAgain,
}

/// Error when a state transition is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: SessionState,
    pub event: SessionEvent,
    pub reason: &'static str,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} via {:?}: {}",
            self.from, self.event, self.reason
        )
    }
}

impl std::error::Error for InvalidTransition {}

/// Reasons a bet cannot start yet. Checked in this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartBlocker {
    Selection(SelectionIssue),
    NonPositiveStake,
    InsufficientBalance { balance: Amount, stake: Amount },
}

impl StartBlocker {
    /// Short label for the start button.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Selection(SelectionIssue::TooManyCells { .. }) => "Too Many Squares",
            Self::Selection(SelectionIssue::MissingColumns { .. }) => "Need Square Per Column",
            Self::Selection(SelectionIssue::Empty) => "Select Squares",
            Self::NonPositiveStake => "Enter A Stake",
            Self::InsufficientBalance { .. } => "Insufficient Balance",
        }
    }
}

impl fmt::Display for StartBlocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selection(issue) => write!(f, "{}", issue),
            Self::NonPositiveStake => write!(f, "Stake must be greater than zero"),
            Self::InsufficientBalance { balance, stake } => write!(
                f,
                "Insufficient balance ({} < {}). Please deposit more first.",
                balance, stake
            ),
        }
    }
}

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Cannot start: {0}")]
    Blocked(StartBlocker),

    #[error("Session is {0}; selection and stake are frozen")]
    Frozen(&'static str),

    #[error("Invalid stake: {0}")]
    InvalidStake(#[from] AmountError),

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
}

/// A single bet-to-resolution session.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GridConfig,
    selection: SelectionSet,
    stake: Amount,
    state: SessionState,
    countdown_ticks: u8,

    /// When the session was created
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// When the bet was committed (Betting -> Playing)
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,

    /// When the ledger outcome arrived
    pub finished_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl GameSession {
    /// Fresh session with an empty selection and zero stake.
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            selection: SelectionSet::new(config),
            stake: Amount::ZERO,
            state: SessionState::Betting,
            countdown_ticks: DEFAULT_COUNTDOWN_TICKS,
            created_at: chrono::Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }

    /// Override the countdown length used on start.
    pub fn with_countdown_ticks(mut self, ticks: u8) -> Self {
        self.countdown_ticks = ticks;
        self
    }

    /// Get the grid this session plays on.
    pub fn config(&self) -> GridConfig {
        self.config
    }

    /// Get the selected cells.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Get the current stake.
    pub fn stake(&self) -> Amount {
        self.stake
    }

    /// Get the lifecycle state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Transaction being settled, once submitted.
    pub fn settlement_ref(&self) -> Option<&TransactionRef> {
        match &self.state {
            SessionState::Playing { settlement, .. } => settlement.as_ref(),
            _ => None,
        }
    }

    /// Ledger outcome, once finished.
    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.state {
            SessionState::Finished { outcome } => Some(outcome),
            _ => None,
        }
    }

    /// Ticks left on the countdown while playing.
    pub fn countdown(&self) -> Option<u8> {
        match &self.state {
            SessionState::Playing { countdown, .. } => *countdown,
            _ => None,
        }
    }

    /// Toggle a cell. No-op (returns false) outside Betting or at the cap.
    pub fn toggle(&mut self, index: usize) -> bool {
        if !self.state.is_betting() {
            return false;
        }
        self.selection.toggle(index)
    }

    /// Empty the selection. Betting only.
    pub fn clear_selection(&mut self) -> Result<(), SessionError> {
        self.ensure_betting()?;
        self.selection.clear();
        Ok(())
    }

    /// Set the stake. Betting only.
    pub fn set_stake(&mut self, stake: Amount) -> Result<(), SessionError> {
        self.ensure_betting()?;
        self.stake = stake;
        Ok(())
    }

    fn ensure_betting(&self) -> Result<(), SessionError> {
        if self.state.is_betting() {
            Ok(())
        } else {
            Err(SessionError::Frozen(self.state.as_str()))
        }
    }

    /// Risk/reward for the current selection and stake.
    pub fn payout(&self) -> Payout {
        Payout::for_stake(self.selection.len(), self.config.total_cells(), self.stake)
    }

    /// First reason the bet cannot start with the given balance.
    pub fn start_blocker(&self, balance: Amount) -> Option<StartBlocker> {
        if let Some(issue) = self.selection.issue() {
            return Some(StartBlocker::Selection(issue));
        }
        if self.stake.is_zero() {
            return Some(StartBlocker::NonPositiveStake);
        }
        if balance < self.stake {
            return Some(StartBlocker::InsufficientBalance {
                balance,
                stake: self.stake,
            });
        }
        None
    }

    /// Check if the bet can be committed with the given balance.
    pub fn can_start(&self, balance: Amount) -> bool {
        self.state.is_betting() && self.start_blocker(balance).is_none()
    }

    /// Apply an event in place. On error nothing changes.
    pub fn apply_mut(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        let next = self.transition(&event)?;
        let now = chrono::Utc::now();

        match (&self.state, &next) {
            (SessionState::Betting, SessionState::Playing { .. }) => {
                self.started_at = Some(now);
            }
            (SessionState::Playing { .. }, SessionState::Finished { .. }) => {
                self.finished_at = Some(now);
            }
            (SessionState::Playing { .. }, SessionState::Betting) => {
                self.started_at = None;
                if matches!(event, SessionEvent::ResolutionFailed | SessionEvent::Abandon) {
                    self.selection.clear();
                }
            }
            (SessionState::Finished { .. }, SessionState::Betting) => {
                self.selection.clear();
                self.started_at = None;
                self.finished_at = None;
            }
            _ => {}
        }

        self.state = next;
        Ok(())
    }

    /// Calculate the next state for an event.
    fn transition(&self, event: &SessionEvent) -> Result<SessionState, SessionError> {
        use SessionEvent::*;
        use SessionState::*;

        let invalid = |reason: &'static str| {
            SessionError::InvalidTransition(InvalidTransition {
                from: self.state.clone(),
                event: event.clone(),
                reason,
            })
        };

        match (&self.state, event) {
            // Start: Betting -> Playing, guarded
            (Betting, Start { balance }) => match self.start_blocker(*balance) {
                Some(blocker) => Err(SessionError::Blocked(blocker)),
                None => Ok(Playing {
                    settlement: None,
                    countdown: match self.countdown_ticks {
                        0 => None,
                        ticks => Some(ticks),
                    },
                }),
            },
            (_, Start { .. }) => Err(invalid("Session already started")),

            // Submitted: record the transaction once
            (
                Playing {
                    settlement: None,
                    countdown,
                },
                Submitted { settlement },
            ) => Ok(Playing {
                settlement: Some(settlement.clone()),
                countdown: *countdown,
            }),
            (Playing { .. }, Submitted { .. }) => Err(invalid("Already submitted")),
            (_, Submitted { .. }) => Err(invalid("Not playing")),

            // SubmissionFailed: Playing (unsubmitted) -> Betting
            (
                Playing {
                    settlement: None, ..
                },
                SubmissionFailed,
            ) => Ok(Betting),
            (Playing { .. }, SubmissionFailed) => {
                Err(invalid("Submission already succeeded"))
            }
            (_, SubmissionFailed) => Err(invalid("Not playing")),

            // Tick: count down while playing
            (
                Playing {
                    settlement,
                    countdown: Some(remaining),
                },
                Tick,
            ) => Ok(Playing {
                settlement: settlement.clone(),
                countdown: match remaining.saturating_sub(1) {
                    0 => None,
                    left => Some(left),
                },
            }),
            (Playing { .. }, Tick) => Err(invalid("Countdown not running")),
            (_, Tick) => Err(invalid("Not playing")),

            // Resolved: Playing (submitted) -> Finished
            (
                Playing {
                    settlement: Some(_),
                    ..
                },
                Resolved { outcome },
            ) => Ok(Finished { outcome: *outcome }),
            (Playing { .. }, Resolved { .. }) => Err(invalid("Not submitted")),
            (_, Resolved { .. }) => Err(invalid("Not playing")),

            // ResolutionFailed: Playing (submitted) -> Betting, abandoned
            (
                Playing {
                    settlement: Some(_),
                    ..
                },
                ResolutionFailed,
            ) => Ok(Betting),
            (Playing { .. }, ResolutionFailed) => Err(invalid("Not submitted")),
            (_, ResolutionFailed) => Err(invalid("Not playing")),

            // Abandon: any Playing -> Betting
            (Playing { .. }, Abandon) => Ok(Betting),
            (_, Abandon) => Err(invalid("Not playing")),

            // PlayAgain: Finished -> Betting
            (Finished { .. }, PlayAgain) => Ok(Betting),
            (_, PlayAgain) => Err(invalid("Session not finished")),
        }
    }

    /// Headline status for the session.
    pub fn status_text(&self) -> String {
        match &self.state {
            SessionState::Betting => "Place Your Bet".to_string(),
            SessionState::Playing { countdown, .. } => match countdown {
                Some(remaining) => format!("Chart Moving... {}s", remaining),
                None => "Chart Moving...".to_string(),
            },
            SessionState::Finished { outcome } if outcome.won => "You Won!".to_string(),
            SessionState::Finished { .. } => "You Lost!".to_string(),
        }
    }

    /// JSON snapshot for a UI layer.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "state": self.state.as_str(),
            "status": self.status_text(),
            "grid": self.config.to_json(),
            "selection": self.selection.to_json(),
            "stake": self.stake.to_major(),
            "payout": self.payout().to_json(),
            "countdown": self.countdown(),
            "settlement": self.settlement_ref().map(|tx| tx.as_str()),
            "outcome": self.outcome().map(|o| o.to_json()),
            "created_at": self.created_at,
            "started_at": self.started_at,
            "finished_at": self.finished_at
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn major(text: &str) -> Amount {
        Amount::parse_major(text).unwrap()
    }

    /// Session on the 6×3 grid with one cell per column and a 1.0 stake.
    fn ready_session() -> GameSession {
        let mut session = GameSession::new(GridConfig::new(6, 3));
        for column in 0..6 {
            assert!(session.toggle(column));
        }
        session.set_stake(major("1")).unwrap();
        session
    }

    fn playing_submitted() -> GameSession {
        let mut session = ready_session();
        session
            .apply_mut(SessionEvent::Start {
                balance: major("10"),
            })
            .unwrap();
        session
            .apply_mut(SessionEvent::Submitted {
                settlement: TransactionRef::new("0xabc"),
            })
            .unwrap();
        session
    }

    #[test]
    fn test_initial_state() {
        let session = GameSession::new(GridConfig::for_level(3));
        assert_eq!(*session.state(), SessionState::Betting);
        assert!(session.selection().is_empty());
        assert_eq!(session.stake(), Amount::ZERO);
        assert_eq!(session.outcome(), None);
        assert_eq!(session.status_text(), "Place Your Bet");
    }

    #[test]
    fn test_start_freezes_selection() {
        let mut session = ready_session();
        session
            .apply_mut(SessionEvent::Start {
                balance: major("10"),
            })
            .unwrap();

        assert!(session.state().is_playing());
        assert_eq!(session.countdown(), Some(DEFAULT_COUNTDOWN_TICKS));
        assert!(session.started_at.is_some());

        // Frozen
        assert!(!session.toggle(7));
        assert!(!session.toggle(0));
        assert_eq!(session.selection().len(), 6);
        assert_eq!(
            session.set_stake(major("2")),
            Err(SessionError::Frozen("playing"))
        );
        assert!(session.clear_selection().is_err());
    }

    #[test]
    fn test_start_refused_without_stake() {
        let mut session = ready_session();
        session.set_stake(Amount::ZERO).unwrap();

        let result = session.apply_mut(SessionEvent::Start {
            balance: major("10"),
        });
        assert_eq!(
            result,
            Err(SessionError::Blocked(StartBlocker::NonPositiveStake))
        );
        assert_eq!(*session.state(), SessionState::Betting);
    }

    #[test]
    fn test_start_refused_on_low_balance() {
        let mut session = ready_session();

        let result = session.apply_mut(SessionEvent::Start {
            balance: major("0.5"),
        });
        assert!(matches!(
            result,
            Err(SessionError::Blocked(StartBlocker::InsufficientBalance { .. }))
        ));
        assert_eq!(*session.state(), SessionState::Betting);
        assert!(session.started_at.is_none());
    }

    #[test]
    fn test_start_refused_on_invalid_selection() {
        let mut session = GameSession::new(GridConfig::new(6, 3));
        session.toggle(0);
        session.set_stake(major("1")).unwrap();

        let blocker = session.start_blocker(major("10")).unwrap();
        assert_eq!(blocker.label(), "Need Square Per Column");

        let result = session.apply_mut(SessionEvent::Start {
            balance: major("10"),
        });
        assert!(result.is_err());
        assert!(session.state().is_betting());
    }

    #[test]
    fn test_blocker_labels() {
        let session = GameSession::new(GridConfig::new(6, 3));
        assert_eq!(
            session.start_blocker(major("1")).unwrap().label(),
            "Select Squares"
        );

        let session = ready_session();
        assert_eq!(
            session.start_blocker(major("0.1")).unwrap().label(),
            "Insufficient Balance"
        );
        assert_eq!(session.start_blocker(major("1")), None);
        assert!(session.can_start(major("1")));
    }

    #[test]
    fn test_submission_failure_unfreezes() {
        let mut session = ready_session();
        session
            .apply_mut(SessionEvent::Start {
                balance: major("10"),
            })
            .unwrap();
        session.apply_mut(SessionEvent::SubmissionFailed).unwrap();

        assert!(session.state().is_betting());
        assert_eq!(session.countdown(), None);
        assert_eq!(session.selection().len(), 6);
        assert!(session.toggle(7));
    }

    #[test]
    fn test_countdown_ticks() {
        let mut session = playing_submitted();

        for expected in (1..DEFAULT_COUNTDOWN_TICKS).rev() {
            session.apply_mut(SessionEvent::Tick).unwrap();
            assert_eq!(session.countdown(), Some(expected));
        }
        assert_eq!(session.status_text(), "Chart Moving... 1s");

        session.apply_mut(SessionEvent::Tick).unwrap();
        assert_eq!(session.countdown(), None);
        assert!(session.apply_mut(SessionEvent::Tick).is_err());

        // Settlement reference survives ticking
        assert_eq!(session.settlement_ref(), Some(&TransactionRef::new("0xabc")));
    }

    #[test]
    fn test_resolved_finishes() {
        let mut session = playing_submitted();
        let outcome = Outcome::from_ledger(true, 500_000_000, 7).unwrap();

        session
            .apply_mut(SessionEvent::Resolved { outcome })
            .unwrap();

        assert!(session.state().is_finished());
        assert_eq!(session.outcome(), Some(&outcome));
        assert_eq!(session.outcome().unwrap().amount_delta_major(), 5.0);
        assert_eq!(session.status_text(), "You Won!");
        assert!(session.finished_at.is_some());
    }

    #[test]
    fn test_resolution_failure_abandons() {
        let mut session = playing_submitted();
        session.apply_mut(SessionEvent::ResolutionFailed).unwrap();

        assert!(session.state().is_betting());
        assert_eq!(session.outcome(), None);
        assert_eq!(session.settlement_ref(), None);
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_abandon_leaves_playing() {
        // Before and after submission
        let mut session = ready_session();
        session
            .apply_mut(SessionEvent::Start {
                balance: major("10"),
            })
            .unwrap();
        session.apply_mut(SessionEvent::Abandon).unwrap();
        assert!(session.state().is_betting());
        assert!(session.started_at.is_none());

        let mut session = playing_submitted();
        session.apply_mut(SessionEvent::Abandon).unwrap();
        assert!(session.state().is_betting());
        assert_eq!(session.settlement_ref(), None);
        assert!(session.selection().is_empty());
        assert_eq!(session.stake(), major("1"));

        // Only from Playing
        assert!(session.apply_mut(SessionEvent::Abandon).is_err());
    }

    #[test]
    fn test_play_again_resets() {
        let mut session = playing_submitted();
        session
            .apply_mut(SessionEvent::Resolved {
                outcome: Outcome::from_ledger(false, 25_000_000, 3).unwrap(),
            })
            .unwrap();
        assert_eq!(session.status_text(), "You Lost!");

        session.apply_mut(SessionEvent::PlayAgain).unwrap();

        assert!(session.state().is_betting());
        assert!(session.selection().is_empty());
        assert_eq!(session.outcome(), None);
        assert_eq!(session.countdown(), None);
        assert_eq!(session.settlement_ref(), None);
        // Stake carries over to the next round
        assert_eq!(session.stake(), major("1"));
    }

    #[test]
    fn test_invalid_transitions() {
        let mut session = ready_session();

        // Nothing but Start from Betting
        assert!(session.apply_mut(SessionEvent::Tick).is_err());
        assert!(session.apply_mut(SessionEvent::PlayAgain).is_err());
        assert!(session.apply_mut(SessionEvent::SubmissionFailed).is_err());
        assert!(session
            .apply_mut(SessionEvent::Resolved {
                outcome: Outcome::from_ledger(true, 1, 0).unwrap(),
            })
            .is_err());

        session
            .apply_mut(SessionEvent::Start {
                balance: major("10"),
            })
            .unwrap();

        // Cannot resolve before submission
        let err = session
            .apply_mut(SessionEvent::Resolved {
                outcome: Outcome::from_ledger(true, 1, 0).unwrap(),
            })
            .unwrap_err();
        match err {
            SessionError::InvalidTransition(t) => assert_eq!(t.reason, "Not submitted"),
            other => panic!("unexpected error: {}", other),
        }

        session
            .apply_mut(SessionEvent::Submitted {
                settlement: TransactionRef::new("0x1"),
            })
            .unwrap();

        // Submitted funds cannot bounce back through the submission-failure path
        assert!(session.apply_mut(SessionEvent::SubmissionFailed).is_err());
        assert!(session.state().is_playing());
    }

    #[test]
    fn test_outcome_sign() {
        let lost = Outcome::from_ledger(false, 12_500_000, 2).unwrap();
        assert_eq!(lost.amount_delta, -12_500_000);
        assert_eq!(lost.amount_delta_major(), -0.125);
        assert_eq!(Outcome::from_ledger(true, u64::MAX, 0), None);
    }

    #[test]
    fn test_display() {
        let session = playing_submitted();
        assert_eq!(format!("{}", session.state()), "Playing(0xabc)");
    }

    #[test]
    fn test_json_snapshot() {
        let session = playing_submitted();
        let json = session.to_json();
        assert_eq!(json["state"], "playing");
        assert_eq!(json["countdown"], 5);
        assert_eq!(json["settlement"], "0xabc");
        assert_eq!(json["selection"]["selected"], 6);
    }
}
