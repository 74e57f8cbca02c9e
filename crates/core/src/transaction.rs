//! Ledger transactions.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Sender recorded on mining reward transactions.
pub const REWARD_SENDER: &str = "0";

/// A transfer recorded on the ledger.
///
/// Nothing about a transaction is checked: there are no balances, so amounts
/// may be fractional, negative, or larger than anything the sender ever
/// received. The amount is kept as the JSON number it arrived as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sender identifier.
    pub sender: String,
    /// Recipient identifier.
    pub recipient: String,
    /// Amount transferred.
    pub amount: Number,
}

impl Transaction {
    /// Create a new transaction.
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Number>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }

    /// Create the reward paid to a node for forging a block.
    pub fn reward(node_id: impl Into<String>, amount: impl Into<Number>) -> Self {
        Self::new(REWARD_SENDER, node_id, amount)
    }

    /// Check if this transaction is a mining reward.
    pub fn is_reward(&self) -> bool {
        self.sender == REWARD_SENDER
    }
}
