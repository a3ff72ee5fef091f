use crate::error::ApiError;
use crate::planning::SessionManager;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use rotina_api_structs::update_event::*;
use rotina_domain::{CalendarEvent, EventStatus, EventType, RepeatFrequency, ID};
use rotina_infra::Context;

pub async fn update_event_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<Context>,
    sessions: web::Data<SessionManager>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = UpdateEventUseCase {
        event_id: path_params.event_id.clone(),
        title: body.title,
        start_ts: body.start_ts,
        end_ts: body.end_ts,
        all_day: body.all_day,
        location: body.location,
        reminder_minutes: body.reminder_minutes,
        repeat: body.repeat,
        event_type: body.event_type,
        status: body.status,
    };

    let event = execute(usecase, &ctx).await.map_err(ApiError::from)?;

    sessions.refresh_user(&event.user_id, &ctx).await;

    Ok(HttpResponse::Ok().json(APIResponse::new(event)))
}

#[derive(Debug)]
pub struct UpdateEventUseCase {
    pub event_id: ID,
    pub title: Option<String>,
    pub start_ts: Option<i64>,
    pub end_ts: Option<i64>,
    pub all_day: Option<bool>,
    pub location: Option<String>,
    pub reminder_minutes: Option<i64>,
    pub repeat: Option<RepeatFrequency>,
    pub event_type: Option<EventType>,
    pub status: Option<EventStatus>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidReminder(i64),
    InvalidTimespan,
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => {
                Self::NotFound(format!("The event with id: {}, was not found.", event_id))
            }
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
impl UseCase for UpdateEventUseCase {
    type Response = CalendarEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateEvent";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        let mut event = match ctx.repos.events.find(&self.event_id).await {
            Some(event) => event,
            None => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };

        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(start_ts) = self.start_ts {
            event.start_ts = start_ts;
        }
        if let Some(end_ts) = self.end_ts {
            event.end_ts = end_ts;
        }
        if let Some(all_day) = self.all_day {
            event.all_day = all_day;
        }
        if let Some(location) = &self.location {
            event.location = Some(location.clone());
        }
        if let Some(reminder_minutes) = self.reminder_minutes {
            if reminder_minutes < 0 {
                return Err(UseCaseError::InvalidReminder(reminder_minutes));
            }
            event.reminder_minutes = reminder_minutes;
        }
        if let Some(repeat) = self.repeat {
            event.repeat = repeat;
        }
        if let Some(event_type) = self.event_type {
            event.event_type = event_type;
        }
        if let Some(status) = self.status {
            event.status = status;
        }

        if event.end_ts < event.start_ts {
            return Err(UseCaseError::InvalidTimespan);
        }
        event.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .events
            .save(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(event)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::create_event::CreateEventUseCase;

    async fn insert_event(ctx: &Context) -> CalendarEvent {
        let mut usecase = CreateEventUseCase {
            user_id: Default::default(),
            title: "Consulta".into(),
            start_ts: 500,
            end_ts: Some(800),
            all_day: false,
            location: None,
            reminder_minutes: 10,
            repeat: Default::default(),
            event_type: Default::default(),
            status: Default::default(),
        };
        usecase.execute(ctx).await.unwrap()
    }

    fn noop_update(event_id: ID) -> UpdateEventUseCase {
        UpdateEventUseCase {
            event_id,
            title: None,
            start_ts: None,
            end_ts: None,
            all_day: None,
            location: None,
            reminder_minutes: None,
            repeat: None,
            event_type: None,
            status: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn updates_reminder_minutes() {
        let ctx = Context::create_inmemory();
        let event = insert_event(&ctx).await;

        let mut usecase = noop_update(event.id.clone());
        usecase.reminder_minutes = Some(30);
        let updated = usecase.execute(&ctx).await.unwrap();

        assert_eq!(updated.reminder_minutes, 30);
        assert_eq!(
            ctx.repos
                .events
                .find(&event.id)
                .await
                .unwrap()
                .reminder_minutes,
            30
        );
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_event() {
        let ctx = Context::create_inmemory();

        let mut usecase = noop_update(ID::default());
        let res = usecase.execute(&ctx).await;

        assert!(matches!(res.unwrap_err(), UseCaseError::NotFound(_)));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_timespan_inverted_by_update() {
        let ctx = Context::create_inmemory();
        let event = insert_event(&ctx).await;

        let mut usecase = noop_update(event.id);
        usecase.start_ts = Some(1000);
        let res = usecase.execute(&ctx).await;

        assert_eq!(res.unwrap_err(), UseCaseError::InvalidTimespan);
    }
}
