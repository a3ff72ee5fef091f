use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// A single entry in a user's planning calendar.
///
/// `repeat` is stored as configured by the user but never expanded into
/// additional occurrences: one record is one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub start_ts: i64,
    pub end_ts: i64,
    pub all_day: bool,
    pub location: Option<String>,
    /// How many minutes before `start_ts` the event becomes eligible for a
    /// reminder. Zero disables reminders for the event.
    pub reminder_minutes: i64,
    pub repeat: RepeatFrequency,
    pub event_type: EventType,
    pub status: EventStatus,
    pub created: i64,
    pub updated: i64,
}

impl Entity for CalendarEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl CalendarEvent {
    pub fn has_reminder(&self) -> bool {
        self.reminder_minutes > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatFrequency {
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Default for RepeatFrequency {
    fn default() -> Self {
        Self::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Work,
    Personal,
    Health,
    Leisure,
}

impl Default for EventType {
    fn default() -> Self {
        Self::Personal
    }
}

/// Whether the event blocks the timespan it covers. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Busy,
    Free,
}

impl Default for EventStatus {
    fn default() -> Self {
        Self::Busy
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serializes_enums_in_lowercase() {
        assert_eq!(
            serde_json::to_string(&RepeatFrequency::Weekly).unwrap(),
            "\"weekly\""
        );
        assert_eq!(serde_json::to_string(&EventType::Work).unwrap(), "\"work\"");
        assert_eq!(
            serde_json::to_string(&EventStatus::Free).unwrap(),
            "\"free\""
        );
    }

    #[test]
    fn reminder_is_disabled_at_zero_minutes() {
        let event = CalendarEvent {
            id: Default::default(),
            user_id: Default::default(),
            title: "Standup".into(),
            start_ts: 1000,
            end_ts: 2000,
            all_day: false,
            location: None,
            reminder_minutes: 0,
            repeat: Default::default(),
            event_type: Default::default(),
            status: Default::default(),
            created: 0,
            updated: 0,
        };
        assert!(!event.has_reminder());
    }
}
