use rotina_domain::{CalendarEvent, EventStatus, EventType, RepeatFrequency, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventDTO {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub start_ts: i64,
    pub end_ts: i64,
    pub all_day: bool,
    pub location: Option<String>,
    pub reminder_minutes: i64,
    pub repeat: RepeatFrequency,
    pub event_type: EventType,
    pub status: EventStatus,
    pub created: i64,
    pub updated: i64,
}

impl CalendarEventDTO {
    pub fn new(event: CalendarEvent) -> Self {
        Self {
            id: event.id,
            user_id: event.user_id,
            title: event.title,
            start_ts: event.start_ts,
            end_ts: event.end_ts,
            all_day: event.all_day,
            location: event.location,
            reminder_minutes: event.reminder_minutes,
            repeat: event.repeat,
            event_type: event.event_type,
            status: event.status,
            created: event.created,
            updated: event.updated,
        }
    }
}
