//! Pending transaction pool.
//!
//! Transactions wait here, in arrival order, until the next block is forged.
//! The pool is drained in one step when a block is appended, so each block
//! captures exactly what was pending at that instant.

use powchain_core::Transaction;

/// Ordered pool of transactions awaiting inclusion in a block.
#[derive(Debug, Clone, Default)]
pub struct Mempool {
    transactions: Vec<Transaction>,
}

impl Mempool {
    /// Create an empty mempool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of transactions in the mempool.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Check if the mempool is empty.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Add a transaction behind everything already pending.
    pub fn add(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    /// Pending transactions in arrival order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Remove and return every pending transaction.
    pub fn take_all(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mempool_add_preserves_order() {
        let mut mempool = Mempool::new();
        mempool.add(Transaction::new("A", "B", 1));
        mempool.add(Transaction::new("C", "D", 2));

        assert_eq!(mempool.len(), 2);
        assert_eq!(mempool.transactions()[0].sender, "A");
        assert_eq!(mempool.transactions()[1].sender, "C");
    }

    #[test]
    fn test_mempool_allows_duplicates() {
        let mut mempool = Mempool::new();
        let tx = Transaction::new("A", "B", 1);
        mempool.add(tx.clone());
        mempool.add(tx);

        assert_eq!(mempool.len(), 2);
    }

    #[test]
    fn test_mempool_take_all_drains() {
        let mut mempool = Mempool::new();
        mempool.add(Transaction::new("A", "B", 1));

        let taken = mempool.take_all();
        assert_eq!(taken.len(), 1);
        assert!(mempool.is_empty());
        assert!(mempool.take_all().is_empty());
    }
}
