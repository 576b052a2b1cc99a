//! Scripted in-memory ledger for tests.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::{CallArgument, EntryRequest, Ledger, LedgerError, LedgerEvent, ViewRequest};
use crate::state::{Amount, TransactionRef};

#[derive(Debug, Default)]
struct Script {
    balance: Amount,
    balance_error: Option<LedgerError>,
    /// Balance the ledger reports once a transaction finalizes
    balance_after_finality: Option<Amount>,
    submit_results: VecDeque<Result<TransactionRef, LedgerError>>,
    finality_error: Option<LedgerError>,
    finality_delay: Duration,
    events: HashMap<TransactionRef, Vec<LedgerEvent>>,
    submitted: Vec<EntryRequest>,
    views: usize,
    next_tx: u64,
}

/// Ledger whose answers are set up front by the test.
#[derive(Debug, Default)]
pub(crate) struct ScriptedLedger {
    script: Mutex<Script>,
}

impl ScriptedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(self, balance: Amount) -> Self {
        self.script.lock().balance = balance;
        self
    }

    pub fn fail_balance(&self, error: LedgerError) {
        self.script.lock().balance_error = Some(error);
    }

    pub fn balance_after_finality(&self, balance: Amount) {
        self.script.lock().balance_after_finality = Some(balance);
    }

    pub fn push_submit(&self, result: Result<TransactionRef, LedgerError>) {
        self.script.lock().submit_results.push_back(result);
    }

    pub fn fail_finality(&self, error: LedgerError) {
        self.script.lock().finality_error = Some(error);
    }

    pub fn finality_delay(&self, delay: Duration) {
        self.script.lock().finality_delay = delay;
    }

    pub fn set_events(&self, tx: &TransactionRef, events: Vec<LedgerEvent>) {
        self.script.lock().events.insert(tx.clone(), events);
    }

    pub fn submitted(&self) -> Vec<EntryRequest> {
        self.script.lock().submitted.clone()
    }

    pub fn view_count(&self) -> usize {
        self.script.lock().views
    }
}

#[async_trait]
impl Ledger for ScriptedLedger {
    async fn view(&self, _request: &ViewRequest) -> Result<Vec<Value>, LedgerError> {
        let mut script = self.script.lock();
        script.views += 1;
        if let Some(error) = &script.balance_error {
            return Err(error.clone());
        }
        Ok(vec![Value::String(script.balance.to_ledger_arg())])
    }

    async fn submit(&self, request: &EntryRequest) -> Result<TransactionRef, LedgerError> {
        let mut script = self.script.lock();
        let result = match script.submit_results.pop_front() {
            Some(result) => result,
            None => {
                script.next_tx += 1;
                Ok(TransactionRef::new(format!("0xtx{}", script.next_tx)))
            }
        };
        if result.is_ok() {
            script.submitted.push(request.clone());
            // Deposits land in the balance straight away
            if request.function_name() == "deposit" {
                if let Some(CallArgument::Scalar(amount)) = request.arguments.first() {
                    let minor: u64 = amount.parse().unwrap_or(0);
                    script.balance = Amount::from_minor(script.balance.minor() + minor);
                }
            }
        }
        result
    }

    async fn wait_for_transaction(&self, _tx: &TransactionRef) -> Result<(), LedgerError> {
        let delay = self.script.lock().finality_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let mut script = self.script.lock();
        if let Some(error) = &script.finality_error {
            return Err(error.clone());
        }
        if let Some(balance) = script.balance_after_finality.take() {
            script.balance = balance;
        }
        Ok(())
    }

    async fn transaction_events(
        &self,
        tx: &TransactionRef,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        Ok(self
            .script
            .lock()
            .events
            .get(tx)
            .cloned()
            .unwrap_or_default())
    }
}
