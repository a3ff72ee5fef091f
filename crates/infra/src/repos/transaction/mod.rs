mod hosted;
mod inmemory;

pub use hosted::HostedTransactionRepo;
pub use inmemory::InMemoryTransactionRepo;
use rotina_domain::{Transaction, ID};

#[async_trait::async_trait]
pub trait ITransactionRepo: Send + Sync {
    async fn insert(&self, t: &Transaction) -> anyhow::Result<()>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Transaction>>;
    async fn delete(&self, transaction_id: &ID) -> Option<Transaction>;
}
