use rotina_domain::{ActiveReminder, EventType, Toast, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveReminderDTO {
    pub event_id: ID,
    pub title: String,
    pub start_ts: i64,
    pub minutes_until: i64,
    pub location: Option<String>,
    pub event_type: EventType,
}

impl ActiveReminderDTO {
    pub fn new(reminder: ActiveReminder) -> Self {
        Self {
            event_id: reminder.event_id,
            title: reminder.title,
            start_ts: reminder.start_ts,
            minutes_until: reminder.minutes_until,
            location: reminder.location,
            event_type: reminder.event_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastDTO {
    pub event_id: ID,
    pub title: String,
    pub minutes_until: i64,
}

impl ToastDTO {
    pub fn new(toast: Toast) -> Self {
        Self {
            event_id: toast.event_id,
            title: toast.title,
            minutes_until: toast.minutes_until,
        }
    }
}
