use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use rotina_api_structs::get_user_transactions::*;
use rotina_domain::{Transaction, ID};
use rotina_infra::Context;

pub async fn get_user_transactions_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<Context>,
) -> Result<HttpResponse, ApiError> {
    let usecase = GetUserTransactionsUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|transactions| HttpResponse::Ok().json(APIResponse::new(transactions)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct GetUserTransactionsUseCase {
    pub user_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUserTransactionsUseCase {
    type Response = Vec<Transaction>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUserTransactions";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .transactions
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
