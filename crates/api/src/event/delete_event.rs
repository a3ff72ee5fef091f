use crate::error::ApiError;
use crate::planning::SessionManager;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use rotina_api_structs::delete_event::*;
use rotina_domain::{CalendarEvent, ID};
use rotina_infra::Context;

pub async fn delete_event_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<Context>,
    sessions: web::Data<SessionManager>,
) -> Result<HttpResponse, ApiError> {
    let usecase = DeleteEventUseCase {
        event_id: path_params.event_id.clone(),
    };

    let event = execute(usecase, &ctx).await.map_err(ApiError::from)?;

    sessions.refresh_user(&event.user_id, &ctx).await;

    Ok(HttpResponse::Ok().json(APIResponse::new(event)))
}

#[derive(Debug)]
pub struct DeleteEventUseCase {
    pub event_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => {
                Self::NotFound(format!("The event with id: {}, was not found.", event_id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteEventUseCase {
    type Response = CalendarEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteEvent";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .events
            .delete(&self.event_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.event_id.clone()))
    }
}
