use crate::error::ApiError;
use crate::planning::SessionManager;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use rotina_api_structs::create_event::*;
use rotina_domain::{CalendarEvent, EventStatus, EventType, RepeatFrequency, ID};
use rotina_infra::Context;

pub async fn create_event_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<Context>,
    sessions: web::Data<SessionManager>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = CreateEventUseCase {
        user_id: path_params.user_id.clone(),
        title: body.title,
        start_ts: body.start_ts,
        end_ts: body.end_ts,
        all_day: body.all_day.unwrap_or(false),
        location: body.location,
        reminder_minutes: body.reminder_minutes.unwrap_or(0),
        repeat: body.repeat.unwrap_or_default(),
        event_type: body.event_type.unwrap_or_default(),
        status: body.status.unwrap_or_default(),
    };

    let event = execute(usecase, &ctx).await.map_err(ApiError::from)?;

    // Saving an event re-arms the owner's reminder scans right away
    sessions.refresh_user(&event.user_id, &ctx).await;

    Ok(HttpResponse::Created().json(APIResponse::new(event)))
}

#[derive(Debug)]
pub struct CreateEventUseCase {
    pub user_id: ID,
    pub title: String,
    pub start_ts: i64,
    pub end_ts: Option<i64>,
    pub all_day: bool,
    pub location: Option<String>,
    pub reminder_minutes: i64,
    pub repeat: RepeatFrequency,
    pub event_type: EventType,
    pub status: EventStatus,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidReminder(i64),
    InvalidTimespan,
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidReminder(minutes) => Self::BadClientData(format!(
                "Invalid reminder minutes: {}, it needs to be a non-negative number of minutes",
                minutes
            )),
            UseCaseError::InvalidTimespan => {
                Self::BadClientData("The event cannot end before it starts".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEventUseCase {
    type Response = CalendarEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        if self.reminder_minutes < 0 {
            return Err(UseCaseError::InvalidReminder(self.reminder_minutes));
        }
        let end_ts = self.end_ts.unwrap_or(self.start_ts);
        if end_ts < self.start_ts {
            return Err(UseCaseError::InvalidTimespan);
        }

        let e = CalendarEvent {
            id: Default::default(),
            user_id: self.user_id.clone(),
            title: self.title.clone(),
            start_ts: self.start_ts,
            end_ts,
            all_day: self.all_day,
            location: self.location.clone(),
            reminder_minutes: self.reminder_minutes,
            repeat: self.repeat,
            event_type: self.event_type,
            status: self.status,
            created: ctx.sys.get_timestamp_millis(),
            updated: ctx.sys.get_timestamp_millis(),
        };

        ctx.repos
            .events
            .insert(&e)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(e)
    }
}
