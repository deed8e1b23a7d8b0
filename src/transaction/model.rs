use serde::{Deserialize, Serialize};

use crate::blockchain::{MINING_REWARD, REWARD_SENDER};

/// A transfer waiting in the pending pool or sealed inside a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    /// Not range-checked.
    pub amount: i64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: i64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }

    /// Reward credited to `miner` for sealing a block.
    pub fn reward(miner: &str) -> Self {
        Self::new(REWARD_SENDER, miner, MINING_REWARD)
    }
}

#[cfg(test)]
mod tests {
    use super::Transaction;

    #[test]
    fn reward_is_issued_by_the_system() {
        let tx = Transaction::reward("node-1");
        assert_eq!(tx.sender, "0");
        assert_eq!(tx.recipient, "node-1");
        assert_eq!(tx.amount, 1);
    }

    #[test]
    fn missing_field_fails_to_deserialize() {
        let res = serde_json::from_str::<Transaction>(r#"{"sender":"a","recipient":"b"}"#);
        assert!(res.is_err());
    }
}
