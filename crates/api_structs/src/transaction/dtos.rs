use rotina_domain::{Transaction, TransactionStatus, TransactionType, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDTO {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub category: String,
    pub date_ts: i64,
    pub status: TransactionStatus,
    pub created: i64,
    pub updated: i64,
}

impl TransactionDTO {
    pub fn new(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            user_id: transaction.user_id,
            title: transaction.title,
            amount: transaction.amount,
            transaction_type: transaction.transaction_type,
            category: transaction.category,
            date_ts: transaction.date_ts,
            status: transaction.status,
            created: transaction.created,
            updated: transaction.updated,
        }
    }
}
