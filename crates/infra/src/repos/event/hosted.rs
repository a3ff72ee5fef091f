use super::IEventRepo;
use crate::services::HostedDbApi;
use rotina_domain::{CalendarEvent, EventStatus, EventType, RepeatFrequency, ID};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

const TABLE: &str = "calendar_events";

pub struct HostedEventRepo {
    db: Arc<HostedDbApi>,
}

impl HostedEventRepo {
    pub fn new(db: Arc<HostedDbApi>) -> Self {
        Self { db }
    }
}

#[derive(Debug, Serialize)]
struct CalendarEventRow<'a> {
    id: &'a ID,
    user_id: &'a ID,
    title: &'a str,
    start_ts: i64,
    end_ts: i64,
    all_day: bool,
    location: Option<&'a str>,
    reminder_minutes: i64,
    repeat: RepeatFrequency,
    event_type: EventType,
    status: EventStatus,
    created: i64,
    updated: i64,
}

impl<'a> CalendarEventRow<'a> {
    fn new(e: &'a CalendarEvent) -> Self {
        Self {
            id: &e.id,
            user_id: &e.user_id,
            title: &e.title,
            start_ts: e.start_ts,
            end_ts: e.end_ts,
            all_day: e.all_day,
            location: e.location.as_deref(),
            reminder_minutes: e.reminder_minutes,
            repeat: e.repeat,
            event_type: e.event_type,
            status: e.status,
            created: e.created,
            updated: e.updated,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CalendarEventRaw {
    id: ID,
    user_id: ID,
    #[serde(default)]
    title: String,
    start_ts: Option<i64>,
    end_ts: Option<i64>,
    #[serde(default)]
    all_day: bool,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    reminder_minutes: i64,
    #[serde(default)]
    repeat: RepeatFrequency,
    #[serde(default)]
    event_type: EventType,
    #[serde(default)]
    status: EventStatus,
    #[serde(default)]
    created: i64,
    #[serde(default)]
    updated: i64,
}

impl CalendarEventRaw {
    /// Rows without a start timestamp cannot take part in any scan and are
    /// dropped here instead of surfacing an error.
    fn into_domain(self) -> Option<CalendarEvent> {
        let start_ts = self.start_ts?;
        Some(CalendarEvent {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            start_ts,
            end_ts: self.end_ts.unwrap_or(start_ts),
            all_day: self.all_day,
            location: self.location,
            reminder_minutes: self.reminder_minutes,
            repeat: self.repeat,
            event_type: self.event_type,
            status: self.status,
            created: self.created,
            updated: self.updated,
        })
    }
}

fn decode_events(rows: Vec<serde_json::Value>) -> Vec<CalendarEvent> {
    HostedDbApi::decode_rows::<CalendarEventRaw>(TABLE, rows)
        .into_iter()
        .filter_map(|raw| {
            let id = raw.id.clone();
            match raw.into_domain() {
                Some(event) => Some(event),
                None => {
                    warn!("Skipping calendar event {} without a start timestamp", id);
                    None
                }
            }
        })
        .collect()
}

#[async_trait::async_trait]
impl IEventRepo for HostedEventRepo {
    async fn insert(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        self.db.insert(TABLE, &CalendarEventRow::new(e)).await
    }

    async fn save(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        self.db
            .update(
                TABLE,
                &[("id", format!("eq.{}", e.id))],
                &CalendarEventRow::new(e),
            )
            .await
    }

    async fn find(&self, event_id: &ID) -> Option<CalendarEvent> {
        let rows = self
            .db
            .select(TABLE, &[("id", format!("eq.{}", event_id))])
            .await
            .ok()?;
        decode_events(rows).into_iter().next()
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<CalendarEvent>> {
        let rows = self
            .db
            .select(TABLE, &[("user_id", format!("eq.{}", user_id))])
            .await?;
        Ok(decode_events(rows))
    }

    async fn delete(&self, event_id: &ID) -> Option<CalendarEvent> {
        let rows = self
            .db
            .delete(TABLE, &[("id", format!("eq.{}", event_id))])
            .await
            .ok()?;
        decode_events(rows).into_iter().next()
    }
}
