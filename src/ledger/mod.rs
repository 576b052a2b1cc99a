//! Settlement ledger interface.
//!
//! The ledger is an external, authoritative system: it holds player funds,
//! draws the winning cell, and reports the result as an event inside a
//! finalized transaction. This module defines the async seam the settlement
//! orchestrator talks through, the request payloads for the contract's
//! functions, and parsing of the outcome event.

pub mod contract;
pub mod event;

#[cfg(test)]
pub(crate) mod scripted;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::TransactionRef;

pub use contract::{normalize_address, Contract};
pub use event::{find_outcome_event, GamePlayedEvent, OUTCOME_EVENT_TYPE};

/// A function argument: scalar or list, both carried as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CallArgument {
    Scalar(String),
    List(Vec<String>),
}

impl From<String> for CallArgument {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<String>> for CallArgument {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Read-only view function call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRequest {
    /// Fully qualified `<address>::<module>::<function>`
    pub function: String,
    pub arguments: Vec<CallArgument>,
}

/// Signed entry function call that produces a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRequest {
    /// Fully qualified `<address>::<module>::<function>`
    pub function: String,
    pub arguments: Vec<CallArgument>,
}

impl EntryRequest {
    /// Bare function name (last path segment).
    pub fn function_name(&self) -> &str {
        self.function.rsplit("::").next().unwrap_or(&self.function)
    }
}

/// An event emitted by a finalized transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Fully qualified event type, e.g. `0x1::staking_game::GamePlayedEvent`
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: Value,
}

impl LedgerEvent {
    pub fn new(event_type: impl Into<String>, data: Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }
}

/// Ledger errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Transaction not found: {0}")]
    NotFound(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Connection to the settlement ledger.
///
/// Implementations wrap a node client plus the connected wallet's signer.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Run a view function; returns its result values.
    async fn view(&self, request: &ViewRequest) -> Result<Vec<Value>, LedgerError>;

    /// Sign and submit an entry function call.
    async fn submit(&self, request: &EntryRequest) -> Result<TransactionRef, LedgerError>;

    /// Resolve once the transaction is final.
    async fn wait_for_transaction(&self, tx: &TransactionRef) -> Result<(), LedgerError>;

    /// Events emitted by a finalized transaction.
    async fn transaction_events(
        &self,
        tx: &TransactionRef,
    ) -> Result<Vec<LedgerEvent>, LedgerError>;
}

/// Read an unsigned integer that may be encoded as a JSON number or string.
pub(crate) fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
