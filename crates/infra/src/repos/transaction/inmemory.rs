use super::ITransactionRepo;
use crate::repos::shared::inmemory_repo::*;
use rotina_domain::{Transaction, ID};

pub struct InMemoryTransactionRepo {
    transactions: std::sync::Mutex<Vec<Transaction>>,
}

impl InMemoryTransactionRepo {
    pub fn new() -> Self {
        Self {
            transactions: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ITransactionRepo for InMemoryTransactionRepo {
    async fn insert(&self, t: &Transaction) -> anyhow::Result<()> {
        insert(t, &self.transactions);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Transaction>> {
        let res = find_by(&self.transactions, |transaction| {
            transaction.user_id == *user_id
        });
        Ok(res)
    }

    async fn delete(&self, transaction_id: &ID) -> Option<Transaction> {
        delete(transaction_id, &self.transactions)
    }
}
