//! Game controller.
//!
//! The single owner of the active session. Combines the difficulty level,
//! the session state machine, and the settlement orchestrator, and is the
//! surface a UI layer drives.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::ControllerConfig;
use crate::ledger::Ledger;
use crate::settlement::{BalanceView, SettlementError, SettlementEvent, SettlementOrchestrator};
use crate::state::grid::{clamp_level, level_count};
use crate::state::{
    Amount, GameSession, GridConfig, Outcome, Payout, SessionError, SessionEvent, StartBlocker,
    TransactionRef,
};

/// Owns the active session and drives it through the ledger.
#[derive(Debug)]
pub struct GameController {
    level: usize,
    session: GameSession,
    orchestrator: SettlementOrchestrator,
}

impl GameController {
    /// Controller at level 0 for the connected player.
    pub fn new(
        ledger: Arc<dyn Ledger>,
        player: impl Into<String>,
        config: ControllerConfig,
    ) -> Self {
        let session = GameSession::new(GridConfig::for_level(0))
            .with_countdown_ticks(config.countdown_ticks);
        Self {
            level: 0,
            session,
            orchestrator: SettlementOrchestrator::new(ledger, player, config),
        }
    }

    /// Initial balance query. A failure leaves the balance at its last value.
    pub async fn connect(&mut self) -> Amount {
        log::info!("[Controller] Connected as {}", self.orchestrator.player());
        let _ = self.orchestrator.refresh_balance().await;
        self.orchestrator.balance()
    }

    /// Get the active session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Get the current difficulty level.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn level_count(&self) -> usize {
        level_count()
    }

    /// Get the active grid.
    pub fn grid(&self) -> GridConfig {
        self.session.config()
    }

    /// Change difficulty, replacing the session. Refused while playing.
    ///
    /// The stake carries over to the new session.
    pub fn set_level(&mut self, level: usize) -> Result<GridConfig, SessionError> {
        if self.session.state().is_playing() {
            return Err(SessionError::Frozen("playing"));
        }
        let level = clamp_level(level);
        let config = GridConfig::for_level(level);
        let stake = self.session.stake();

        let mut session = GameSession::new(config)
            .with_countdown_ticks(self.orchestrator.config().countdown_ticks);
        session.set_stake(stake)?;

        log::debug!(
            "[Controller] Level {} -> {} ({}x{})",
            self.level,
            level,
            config.columns,
            config.rows
        );
        self.level = level;
        self.session = session;
        Ok(config)
    }

    /// Toggle a cell; false when nothing changed.
    pub fn toggle(&mut self, index: usize) -> bool {
        self.session.toggle(index)
    }

    pub fn clear_selection(&mut self) -> Result<(), SessionError> {
        self.session.clear_selection()
    }

    pub fn set_stake(&mut self, stake: Amount) -> Result<(), SessionError> {
        self.session.set_stake(stake)
    }

    /// Set the stake from decimal text in major units.
    pub fn set_stake_text(&mut self, text: &str) -> Result<Amount, SessionError> {
        let stake = Amount::parse_major(text)?;
        self.session.set_stake(stake)?;
        Ok(stake)
    }

    /// Risk/reward preview for the current bet.
    pub fn payout(&self) -> Payout {
        self.session.payout()
    }

    /// Cached balance.
    pub fn balance(&self) -> Amount {
        self.orchestrator.balance()
    }

    pub fn balance_view(&self) -> BalanceView {
        self.orchestrator.balance_view()
    }

    /// Subscribe to settlement progress.
    pub fn subscribe(&self) -> broadcast::Receiver<SettlementEvent> {
        self.orchestrator.subscribe()
    }

    /// Why the start button is disabled, if it is.
    pub fn start_blocker(&self) -> Option<StartBlocker> {
        self.session.start_blocker(self.balance())
    }

    /// Label for the start button.
    pub fn start_label(&self) -> &'static str {
        match self.start_blocker() {
            Some(blocker) => blocker.label(),
            None => "Start Game",
        }
    }

    /// Commit the bet and wait for the ledger's outcome.
    pub async fn start(&mut self) -> Result<Outcome, SettlementError> {
        self.orchestrator.play(&mut self.session).await
    }

    /// Recover a session left in `Playing` by an interrupted [`start`](Self::start).
    pub async fn abandon(&mut self) -> Result<(), SettlementError> {
        self.orchestrator.abandon(&mut self.session).await
    }

    /// Back to betting after a finished round.
    pub fn play_again(&mut self) -> Result<(), SessionError> {
        self.session.apply_mut(SessionEvent::PlayAgain)
    }

    /// Deposit into the game balance. Betting only.
    pub async fn deposit(&mut self, amount: Amount) -> Result<TransactionRef, SettlementError> {
        if !self.session.state().is_betting() {
            return Err(SessionError::Frozen(self.session.state().as_str()).into());
        }
        self.orchestrator.deposit(amount).await
    }

    /// Deposit the amount currently entered as the stake.
    pub async fn deposit_stake(&mut self) -> Result<TransactionRef, SettlementError> {
        let amount = self.session.stake();
        self.deposit(amount).await
    }

    pub fn last_transaction(&self) -> Option<&TransactionRef> {
        self.orchestrator.last_transaction()
    }

    /// Explorer link for the last transaction.
    pub fn transaction_url(&self) -> Option<String> {
        self.last_transaction()
            .and_then(|tx| self.orchestrator.config().transaction_url(tx))
    }

    /// JSON snapshot for a UI layer.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "level": self.level,
            "level_count": self.level_count(),
            "balance": self.balance().to_major(),
            "session": self.session.to_json(),
            "start_label": self.start_label(),
            "can_start": self.start_blocker().is_none() && self.session.state().is_betting(),
            "last_transaction": self.last_transaction().map(|tx| tx.as_str()),
            "transaction_url": self.transaction_url()
        })
    }
}
