mod session;

use crate::error::ApiError;
use actix_web::{web, HttpResponse};
use rotina_api_structs::{
    dismiss_reminder, get_session_reminders, refresh_planning_session, snooze_reminder,
    start_planning_session, stop_planning_session,
};
use rotina_infra::Context;
pub use session::SessionManager;

async fn start_planning_session_controller(
    body: web::Json<start_planning_session::RequestBody>,
    ctx: web::Data<Context>,
    sessions: web::Data<SessionManager>,
) -> HttpResponse {
    let session_id = sessions.start_session(body.0.user_id, ctx.get_ref().clone());
    HttpResponse::Created().json(start_planning_session::APIResponse { session_id })
}

async fn stop_planning_session_controller(
    path_params: web::Path<stop_planning_session::PathParams>,
    sessions: web::Data<SessionManager>,
) -> Result<HttpResponse, ApiError> {
    if sessions.stop_session(&path_params.session_id) {
        Ok(HttpResponse::Ok().finish())
    } else {
        Err(session_not_found(&path_params.session_id))
    }
}

async fn get_session_reminders_controller(
    path_params: web::Path<get_session_reminders::PathParams>,
    sessions: web::Data<SessionManager>,
) -> Result<HttpResponse, ApiError> {
    match sessions.reminders(&path_params.session_id) {
        Some((active, toasts)) => Ok(HttpResponse::Ok()
            .json(get_session_reminders::APIResponse::new(active, toasts))),
        None => Err(session_not_found(&path_params.session_id)),
    }
}

async fn dismiss_reminder_controller(
    path_params: web::Path<dismiss_reminder::PathParams>,
    sessions: web::Data<SessionManager>,
) -> Result<HttpResponse, ApiError> {
    if sessions.dismiss(&path_params.session_id, &path_params.event_id) {
        Ok(HttpResponse::Ok().finish())
    } else {
        Err(session_not_found(&path_params.session_id))
    }
}

async fn snooze_reminder_controller(
    path_params: web::Path<snooze_reminder::PathParams>,
    ctx: web::Data<Context>,
    sessions: web::Data<SessionManager>,
) -> Result<HttpResponse, ApiError> {
    let now = ctx.sys.get_timestamp_millis();
    if sessions.snooze(&path_params.session_id, &path_params.event_id, now) {
        Ok(HttpResponse::Ok().finish())
    } else {
        Err(session_not_found(&path_params.session_id))
    }
}

async fn refresh_planning_session_controller(
    path_params: web::Path<refresh_planning_session::PathParams>,
    ctx: web::Data<Context>,
    sessions: web::Data<SessionManager>,
) -> Result<HttpResponse, ApiError> {
    if sessions.refresh(&path_params.session_id, &ctx).await {
        Ok(HttpResponse::Ok().finish())
    } else {
        Err(session_not_found(&path_params.session_id))
    }
}

fn session_not_found(session_id: &rotina_domain::ID) -> ApiError {
    ApiError::NotFound(format!(
        "The planning session with id: {}, was not found.",
        session_id
    ))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/planning/sessions",
        web::post().to(start_planning_session_controller),
    );
    cfg.route(
        "/planning/sessions/{session_id}",
        web::delete().to(stop_planning_session_controller),
    );
    cfg.route(
        "/planning/sessions/{session_id}/reminders",
        web::get().to(get_session_reminders_controller),
    );
    cfg.route(
        "/planning/sessions/{session_id}/reminders/{event_id}/dismiss",
        web::post().to(dismiss_reminder_controller),
    );
    cfg.route(
        "/planning/sessions/{session_id}/reminders/{event_id}/snooze",
        web::post().to(snooze_reminder_controller),
    );
    cfg.route(
        "/planning/sessions/{session_id}/refresh",
        web::post().to(refresh_planning_session_controller),
    );
}
