use super::ITransactionRepo;
use crate::services::HostedDbApi;
use rotina_domain::{Transaction, TransactionStatus, TransactionType, ID};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const TABLE: &str = "transactions";

pub struct HostedTransactionRepo {
    db: Arc<HostedDbApi>,
}

impl HostedTransactionRepo {
    pub fn new(db: Arc<HostedDbApi>) -> Self {
        Self { db }
    }
}

#[derive(Debug, Serialize)]
struct TransactionRow<'a> {
    id: &'a ID,
    user_id: &'a ID,
    title: &'a str,
    amount: f64,
    transaction_type: TransactionType,
    category: &'a str,
    date_ts: i64,
    status: TransactionStatus,
    created: i64,
    updated: i64,
}

impl<'a> TransactionRow<'a> {
    fn new(t: &'a Transaction) -> Self {
        Self {
            id: &t.id,
            user_id: &t.user_id,
            title: &t.title,
            amount: t.amount,
            transaction_type: t.transaction_type,
            category: &t.category,
            date_ts: t.date_ts,
            status: t.status,
            created: t.created,
            updated: t.updated,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TransactionRaw {
    id: ID,
    user_id: ID,
    #[serde(default)]
    title: String,
    #[serde(default)]
    amount: f64,
    transaction_type: TransactionType,
    #[serde(default)]
    category: String,
    #[serde(default)]
    date_ts: i64,
    status: TransactionStatus,
    #[serde(default)]
    created: i64,
    #[serde(default)]
    updated: i64,
}

impl TransactionRaw {
    fn into_domain(self) -> Transaction {
        Transaction {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            amount: self.amount,
            transaction_type: self.transaction_type,
            category: self.category,
            date_ts: self.date_ts,
            status: self.status,
            created: self.created,
            updated: self.updated,
        }
    }
}

fn decode_transactions(rows: Vec<serde_json::Value>) -> Vec<Transaction> {
    HostedDbApi::decode_rows::<TransactionRaw>(TABLE, rows)
        .into_iter()
        .map(|raw| raw.into_domain())
        .collect()
}

#[async_trait::async_trait]
impl ITransactionRepo for HostedTransactionRepo {
    async fn insert(&self, t: &Transaction) -> anyhow::Result<()> {
        self.db.insert(TABLE, &TransactionRow::new(t)).await
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Transaction>> {
        let rows = self
            .db
            .select(TABLE, &[("user_id", format!("eq.{}", user_id))])
            .await?;
        Ok(decode_transactions(rows))
    }

    async fn delete(&self, transaction_id: &ID) -> Option<Transaction> {
        let rows = self
            .db
            .delete(TABLE, &[("id", format!("eq.{}", transaction_id))])
            .await
            .ok()?;
        decode_transactions(rows).into_iter().next()
    }
}
