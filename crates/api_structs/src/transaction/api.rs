use crate::dtos::TransactionDTO;
use rotina_domain::{Transaction, TransactionStatus, TransactionType, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub transaction: TransactionDTO,
}

impl TransactionResponse {
    pub fn new(transaction: Transaction) -> Self {
        Self {
            transaction: TransactionDTO::new(transaction),
        }
    }
}

pub mod create_transaction {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        pub amount: f64,
        pub transaction_type: TransactionType,
        pub category: String,
        pub date_ts: i64,
        pub status: Option<TransactionStatus>,
    }

    pub type APIResponse = TransactionResponse;
}

pub mod get_user_transactions {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub transactions: Vec<TransactionDTO>,
    }

    impl APIResponse {
        pub fn new(transactions: Vec<Transaction>) -> Self {
            Self {
                transactions: transactions.into_iter().map(TransactionDTO::new).collect(),
            }
        }
    }
}
