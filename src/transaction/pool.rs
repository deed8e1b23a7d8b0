use std::sync::Mutex;

use super::Transaction;

/// Transactions accepted but not sealed yet.
/// A simple wrapper over a `Vec` kept in submission order.
#[derive(Debug, Default)]
pub struct PendingPool {
    txs: Mutex<Vec<Transaction>>,
}

impl PendingPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, tx: Transaction) {
        self.txs.lock().expect("mutex poisoned").push(tx);
    }

    /// Move every pending transaction out, leaving the pool empty.
    pub fn drain(&self) -> Vec<Transaction> {
        std::mem::take(&mut *self.txs.lock().expect("mutex poisoned"))
    }

    /// Copy of the current contents (for observability).
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.txs.lock().expect("mutex poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.txs.lock().expect("mutex poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_moves_everything_out_in_order() {
        let pool = PendingPool::new();
        pool.push(Transaction::new("a", "b", 1));
        pool.push(Transaction::new("c", "d", 2));

        let drained = pool.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].sender, "a");
        assert_eq!(drained[1].sender, "c");
        assert_eq!(pool.len(), 0);
        assert!(pool.snapshot().is_empty());
    }
}
