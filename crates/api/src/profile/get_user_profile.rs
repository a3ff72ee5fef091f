use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use rotina_api_structs::get_user_profile::*;
use rotina_domain::{Profile, ID};
use rotina_infra::Context;

pub async fn get_user_profile_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<Context>,
) -> Result<HttpResponse, ApiError> {
    let usecase = GetUserProfileUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|profile| HttpResponse::Ok().json(APIResponse::new(profile)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct GetUserProfileUseCase {
    pub user_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(user_id) => Self::NotFound(format!(
                "A profile for the user with id: {}, was not found.",
                user_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUserProfileUseCase {
    type Response = Profile;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUserProfile";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .profiles
            .find_by_user(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.user_id.clone()))
    }
}
