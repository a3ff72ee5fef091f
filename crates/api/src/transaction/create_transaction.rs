use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use rotina_api_structs::create_transaction::*;
use rotina_domain::{Transaction, TransactionStatus, TransactionType, ID};
use rotina_infra::Context;

pub async fn create_transaction_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<Context>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = CreateTransactionUseCase {
        user_id: path_params.user_id.clone(),
        title: body.title,
        amount: body.amount,
        transaction_type: body.transaction_type,
        category: body.category,
        date_ts: body.date_ts,
        status: body.status.unwrap_or(TransactionStatus::Paid),
    };

    execute(usecase, &ctx)
        .await
        .map(|transaction| HttpResponse::Created().json(APIResponse::new(transaction)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct CreateTransactionUseCase {
    pub user_id: ID,
    pub title: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub category: String,
    pub date_ts: i64,
    pub status: TransactionStatus,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidAmount(String),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidAmount(amount) => {
                Self::BadClientData(format!("Invalid transaction amount: {}", amount))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateTransactionUseCase {
    type Response = Transaction;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateTransaction";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        if !self.amount.is_finite() {
            return Err(UseCaseError::InvalidAmount(self.amount.to_string()));
        }

        let transaction = Transaction {
            id: Default::default(),
            user_id: self.user_id.clone(),
            title: self.title.clone(),
            amount: self.amount,
            transaction_type: self.transaction_type,
            category: self.category.clone(),
            date_ts: self.date_ts,
            status: self.status,
            created: ctx.sys.get_timestamp_millis(),
            updated: ctx.sys.get_timestamp_millis(),
        };

        ctx.repos
            .transactions
            .insert(&transaction)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(transaction)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn creates_transaction() {
        let ctx = Context::create_inmemory();

        let mut usecase = CreateTransactionUseCase {
            user_id: Default::default(),
            title: "Mercado".into(),
            amount: 120.5,
            transaction_type: TransactionType::Expense,
            category: "Geral".into(),
            date_ts: 0,
            status: TransactionStatus::Paid,
        };

        let res = usecase.execute(&ctx).await;
        assert!(res.is_ok());

        let found = ctx
            .repos
            .transactions
            .find_by_user(&res.unwrap().user_id)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].amount, 120.5);
    }
}
