//! Request builders for the staking contract.
//!
//! Function names and argument order are fixed by the deployed contract.

use serde_json::Value;

use super::{value_as_u64, CallArgument, EntryRequest, LedgerError, ViewRequest};
use crate::state::Amount;

/// Default contract module name.
pub const DEFAULT_MODULE_NAME: &str = "staking_game";

/// Prefix an address with `0x` when missing.
pub fn normalize_address(address: &str) -> String {
    let address = address.trim();
    if address.starts_with("0x") {
        address.to_string()
    } else {
        format!("0x{}", address)
    }
}

/// Deployed staking contract location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    address: String,
    module: String,
}

impl Contract {
    pub fn new(address: &str, module: &str) -> Self {
        Self {
            address: normalize_address(address),
            module: module.to_string(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// `<address>::<module>::<function>`
    pub fn function_id(&self, function: &str) -> String {
        format!("{}::{}::{}", self.address, self.module, function)
    }

    /// `get_player_balance(address)`
    pub fn get_player_balance(&self, player: &str) -> ViewRequest {
        ViewRequest {
            function: self.function_id("get_player_balance"),
            arguments: vec![CallArgument::Scalar(player.to_string())],
        }
    }

    /// `deposit(amount)`
    pub fn deposit(&self, amount: Amount) -> EntryRequest {
        EntryRequest {
            function: self.function_id("deposit"),
            arguments: vec![CallArgument::Scalar(amount.to_ledger_arg())],
        }
    }

    /// `play_game(stake, guesses, total_cells)`; guesses in the given order.
    pub fn play_game(&self, stake: Amount, guesses: &[usize], total_cells: usize) -> EntryRequest {
        EntryRequest {
            function: self.function_id("play_game"),
            arguments: vec![
                CallArgument::Scalar(stake.to_ledger_arg()),
                CallArgument::List(guesses.iter().map(|g| g.to_string()).collect()),
                CallArgument::Scalar(total_cells.to_string()),
            ],
        }
    }
}

/// Decode the `get_player_balance` view result.
pub fn parse_balance(values: &[Value]) -> Result<Amount, LedgerError> {
    let first = values.first().ok_or_else(|| {
        LedgerError::UnexpectedResponse("empty balance view result".to_string())
    })?;
    value_as_u64(first).map(Amount::from_minor).ok_or_else(|| {
        LedgerError::UnexpectedResponse(format!("balance is not an integer: {}", first))
    })
}
