//! Settlement orchestration.
//!
//! Bridges a committed session to the ledger and back:
//!
//! 1. `Betting -> Playing` through the session guard, using the cached balance.
//! 2. Submit `play_game`. Failure here returns the session to `Betting`.
//! 3. Count down while awaiting finality concurrently. The countdown only
//!    decides when the outcome is read; finality is never cut short by it.
//! 4. Read the transaction's events and find the outcome event.
//! 5. `Playing -> Finished` on success, or abandon back to `Betting`.
//! 6. Refresh the cached balance after a short delay.
//!
//! Once `play_game` is submitted there is no cancellation.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::config::ControllerConfig;
use crate::ledger::contract::parse_balance;
use crate::ledger::{find_outcome_event, Contract, GamePlayedEvent, Ledger, LedgerError};
use crate::state::{Amount, GameSession, Outcome, SessionError, SessionEvent, TransactionRef};

/// Progress notifications for observers (UI, logs).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SettlementEvent {
    Submitted { settlement: TransactionRef },
    SubmissionFailed { reason: String },
    Countdown { remaining: u8 },
    Resolved { outcome: Outcome },
    Abandoned { reason: String },
    Deposited { settlement: TransactionRef },
    BalanceUpdated { balance: Amount },
}

/// Settlement errors.
#[derive(Debug, thiserror::Error)]
pub enum SettlementError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Deposit amount must be greater than zero")]
    NonPositiveDeposit,

    #[error("Transaction failed: {0}")]
    Submission(#[source] LedgerError),

    #[error("Waiting for transaction {tx} failed: {source}")]
    Finality {
        tx: TransactionRef,
        #[source]
        source: LedgerError,
    },

    #[error("Fetching events of transaction {tx} failed: {source}")]
    EventFetch {
        tx: TransactionRef,
        #[source]
        source: LedgerError,
    },

    #[error("Could not find GamePlayedEvent in transaction {tx}")]
    MissingOutcomeEvent { tx: TransactionRef },

    #[error("Malformed GamePlayedEvent in transaction {tx}: {reason}")]
    MalformedOutcomeEvent { tx: TransactionRef, reason: String },
}

impl SettlementError {
    /// Rejected locally before anything reached the ledger.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Session(_) | Self::NonPositiveDeposit)
    }

    /// Failed after submission; the session was abandoned.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::Finality { .. }
                | Self::EventFetch { .. }
                | Self::MissingOutcomeEvent { .. }
                | Self::MalformedOutcomeEvent { .. }
        )
    }
}

/// Read-only handle to the cached balance.
#[derive(Debug, Clone)]
pub struct BalanceView(Arc<RwLock<Amount>>);

impl BalanceView {
    pub fn get(&self) -> Amount {
        *self.0.read()
    }
}

/// Drives sessions through the ledger and owns the cached balance.
pub struct SettlementOrchestrator {
    ledger: Arc<dyn Ledger>,
    contract: Contract,
    config: ControllerConfig,

    /// Connected wallet address
    player: String,

    /// Advisory balance; written only here
    balance: Arc<RwLock<Amount>>,

    /// Most recent submitted transaction (game or deposit)
    last_transaction: Option<TransactionRef>,

    events: broadcast::Sender<SettlementEvent>,
}

impl SettlementOrchestrator {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        player: impl Into<String>,
        config: ControllerConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            ledger,
            contract: config.contract(),
            config,
            player: player.into(),
            balance: Arc::new(RwLock::new(Amount::ZERO)),
            last_transaction: None,
            events,
        }
    }

    /// Get the active configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Get the connected wallet address.
    pub fn player(&self) -> &str {
        &self.player
    }

    /// Last known balance.
    pub fn balance(&self) -> Amount {
        *self.balance.read()
    }

    /// Shareable read-only handle to the cached balance.
    pub fn balance_view(&self) -> BalanceView {
        BalanceView(Arc::clone(&self.balance))
    }

    /// Get the most recent transaction, game or deposit.
    pub fn last_transaction(&self) -> Option<&TransactionRef> {
        self.last_transaction.as_ref()
    }

    /// Subscribe to progress notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SettlementEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: SettlementEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Query the ledger balance. On failure the cached value is kept.
    pub async fn refresh_balance(&self) -> Result<Amount, LedgerError> {
        let request = self.contract.get_player_balance(&self.player);
        let result = self
            .ledger
            .view(&request)
            .await
            .and_then(|values| parse_balance(&values));

        match result {
            Ok(balance) => {
                *self.balance.write() = balance;
                log::debug!("[Settlement] Balance for {}: {}", self.player, balance);
                self.publish(SettlementEvent::BalanceUpdated { balance });
                Ok(balance)
            }
            Err(e) => {
                log::warn!(
                    "[Settlement] Balance refresh failed, keeping {}: {}",
                    self.balance(),
                    e
                );
                Err(e)
            }
        }
    }

    /// Move funds into the spendable game balance, then refresh once.
    pub async fn deposit(&mut self, amount: Amount) -> Result<TransactionRef, SettlementError> {
        if amount.is_zero() {
            return Err(SettlementError::NonPositiveDeposit);
        }

        let request = self.contract.deposit(amount);
        log::info!("[Settlement] Depositing {} via {}", amount, request.function);

        let tx = self.ledger.submit(&request).await.map_err(|e| {
            log::error!("[Settlement] Deposit failed: {}", e);
            SettlementError::Submission(e)
        })?;

        log::info!("[Settlement] Deposit transaction: {}", tx);
        self.last_transaction = Some(tx.clone());
        self.publish(SettlementEvent::Deposited {
            settlement: tx.clone(),
        });

        tokio::time::sleep(self.config.deposit_refresh_delay()).await;
        let _ = self.refresh_balance().await;

        Ok(tx)
    }

    /// Commit the session's bet and see it through to an outcome.
    ///
    /// Returns the ledger's outcome, or the error that sent the session back
    /// to `Betting`. Input errors leave the session untouched.
    pub async fn play(&mut self, session: &mut GameSession) -> Result<Outcome, SettlementError> {
        session.apply_mut(SessionEvent::Start {
            balance: self.balance(),
        })?;

        let grid = session.config();
        let request = self.contract.play_game(
            session.stake(),
            &session.selection().indices(),
            grid.total_cells(),
        );
        log::info!(
            "[Settlement] Submitting {}: stake {}, {} of {} cells",
            request.function,
            session.stake(),
            session.selection().len(),
            grid.total_cells()
        );

        let tx = match self.ledger.submit(&request).await {
            Ok(tx) => tx,
            Err(e) => {
                log::error!("[Settlement] Game transaction failed: {}", e);
                session.apply_mut(SessionEvent::SubmissionFailed)?;
                self.publish(SettlementEvent::SubmissionFailed {
                    reason: e.to_string(),
                });
                return Err(SettlementError::Submission(e));
            }
        };

        log::info!("[Settlement] Game transaction: {}", tx);
        session.apply_mut(SessionEvent::Submitted {
            settlement: tx.clone(),
        })?;
        self.last_transaction = Some(tx.clone());
        self.publish(SettlementEvent::Submitted {
            settlement: tx.clone(),
        });

        let result = match self.resolve(session, &tx).await {
            Ok(outcome) => {
                log::info!(
                    "[Settlement] {} resolved: won={} delta={} winning_cell={}",
                    tx,
                    outcome.won,
                    outcome.amount_delta_major(),
                    outcome.winning_cell
                );
                session.apply_mut(SessionEvent::Resolved { outcome })?;
                self.publish(SettlementEvent::Resolved { outcome });
                Ok(outcome)
            }
            Err(e) => {
                log::error!("[Settlement] Failed to resolve {}: {}", tx, e);
                session.apply_mut(SessionEvent::ResolutionFailed)?;
                self.publish(SettlementEvent::Abandoned {
                    reason: e.to_string(),
                });
                Err(e)
            }
        };

        // Eventually consistent with the ledger; may still lag
        tokio::time::sleep(self.config.resolution_refresh_delay()).await;
        let _ = self.refresh_balance().await;

        result
    }

    /// Give up on a session left in `Playing`, e.g. after the future
    /// returned by [`play`](Self::play) was dropped.
    ///
    /// The session goes back to `Betting` with its selection cleared. A
    /// submitted transaction may still settle, so the balance is re-read.
    pub async fn abandon(&mut self, session: &mut GameSession) -> Result<(), SettlementError> {
        let pending = session.settlement_ref().cloned();
        session.apply_mut(SessionEvent::Abandon)?;

        let reason = match &pending {
            Some(tx) => format!("Abandoned while waiting for {}", tx),
            None => "Abandoned before submission".to_string(),
        };
        log::warn!("[Settlement] {}", reason);
        self.publish(SettlementEvent::Abandoned { reason });

        let _ = self.refresh_balance().await;
        Ok(())
    }

    /// Run the countdown alongside finality, then read the outcome event.
    async fn resolve(
        &self,
        session: &mut GameSession,
        tx: &TransactionRef,
    ) -> Result<Outcome, SettlementError> {
        let ledger = Arc::clone(&self.ledger);
        let finality = ledger.wait_for_transaction(tx);
        tokio::pin!(finality);
        let mut finalized: Option<Result<(), LedgerError>> = None;

        while let Some(remaining) = session.countdown() {
            let tick = tokio::time::sleep(self.config.tick_interval());
            tokio::pin!(tick);

            loop {
                tokio::select! {
                    _ = &mut tick => break,
                    result = &mut finality, if finalized.is_none() => {
                        log::debug!("[Settlement] {} final with {} ticks left", tx, remaining);
                        finalized = Some(result);
                    }
                }
            }

            session.apply_mut(SessionEvent::Tick)?;
            self.publish(SettlementEvent::Countdown {
                remaining: session.countdown().unwrap_or(0),
            });
        }

        let finalized = match finalized {
            Some(result) => result,
            None => finality.await,
        };
        finalized.map_err(|source| SettlementError::Finality {
            tx: tx.clone(),
            source,
        })?;

        let events = self
            .ledger
            .transaction_events(tx)
            .await
            .map_err(|source| SettlementError::EventFetch {
                tx: tx.clone(),
                source,
            })?;

        let event = find_outcome_event(&events)
            .ok_or_else(|| SettlementError::MissingOutcomeEvent { tx: tx.clone() })?;

        GamePlayedEvent::from_data(&event.data)
            .and_then(|decoded| decoded.to_outcome(session.config().total_cells()))
            .map_err(|reason| SettlementError::MalformedOutcomeEvent {
                tx: tx.clone(),
                reason,
            })
    }
}

impl std::fmt::Debug for SettlementOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettlementOrchestrator")
            .field("contract", &self.contract)
            .field("player", &self.player)
            .field("balance", &self.balance())
            .field("last_transaction", &self.last_transaction)
            .finish()
    }
}
