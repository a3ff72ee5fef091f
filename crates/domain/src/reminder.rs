use crate::event::{CalendarEvent, EventType};
use crate::shared::entity::ID;
use std::collections::{HashMap, HashSet};

/// How long a snoozed event stays suppressed before it becomes eligible again
pub const SNOOZE_INTERVAL_MILLIS: i64 = 1000 * 60 * 10;
/// How long an emitted toast stays on display before it expires on its own
pub const TOAST_DURATION_MILLIS: i64 = 1000 * 8;

const MILLIS_PER_MINUTE: i64 = 1000 * 60;

/// An event currently inside its reminder window
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveReminder {
    pub event_id: ID,
    pub title: String,
    pub start_ts: i64,
    pub minutes_until: i64,
    pub location: Option<String>,
    pub event_type: EventType,
}

/// A one-shot notification. Emitted at most once per event per session.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub event_id: ID,
    pub title: String,
    pub minutes_until: i64,
}

/// Per-view reminder state for the planning screen.
///
/// The owning view session is the sole holder and the sole authority to
/// mutate; nothing here is persisted, so tearing the session down discards
/// every dismiss and snooze choice.
#[derive(Debug, Default)]
pub struct ReminderSession {
    dismissed: HashSet<ID>,
    snoozed_until: HashMap<ID, i64>,
    toasted: HashSet<ID>,
    active: Vec<ActiveReminder>,
}

impl ReminderSession {
    pub fn new() -> Self {
        Default::default()
    }

    /// Recomputes the active list from scratch against the full event set.
    ///
    /// An event is active when its reminder is enabled, it has not been
    /// dismissed or snoozed, and the current instant falls inside the
    /// half-open window `(0, reminder_minutes]` before its start. Events
    /// whose start has been reached or passed are not re-armed.
    ///
    /// Returns a toast for every event that became active for the first time
    /// this session; the active list itself keeps re-appearing on every call
    /// until the event is dismissed, snoozed or starts.
    pub fn check(&mut self, events: &[CalendarEvent], now: i64) -> Vec<Toast> {
        let mut active = Vec::new();
        let mut toasts = Vec::new();

        for event in events {
            if !event.has_reminder() {
                continue;
            }
            let minutes_until = (event.start_ts - now) / MILLIS_PER_MINUTE;
            if minutes_until <= 0 || minutes_until > event.reminder_minutes {
                continue;
            }
            if self.dismissed.contains(&event.id) {
                continue;
            }
            if let Some(snoozed_until) = self.snoozed_until.get(&event.id) {
                if *snoozed_until > now {
                    continue;
                }
            }

            if self.toasted.insert(event.id.clone()) {
                toasts.push(Toast {
                    event_id: event.id.clone(),
                    title: event.title.clone(),
                    minutes_until,
                });
            }
            active.push(ActiveReminder {
                event_id: event.id.clone(),
                title: event.title.clone(),
                start_ts: event.start_ts,
                minutes_until,
                location: event.location.clone(),
                event_type: event.event_type,
            });
        }

        self.active = active;
        toasts
    }

    /// Suppresses the event for the rest of the session
    pub fn dismiss(&mut self, event_id: &ID) {
        self.dismissed.insert(event_id.clone());
        self.active.retain(|reminder| &reminder.event_id != event_id);
    }

    /// Suppresses the event until `now + SNOOZE_INTERVAL_MILLIS`. Once the
    /// interval elapses the event becomes eligible again, provided its
    /// window still holds at the next check.
    pub fn snooze(&mut self, event_id: &ID, now: i64) {
        self.snoozed_until
            .insert(event_id.clone(), now + SNOOZE_INTERVAL_MILLIS);
        self.active.retain(|reminder| &reminder.event_id != event_id);
    }

    pub fn active(&self) -> &[ActiveReminder] {
        &self.active
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::{EventStatus, RepeatFrequency};

    const NOW: i64 = 1_600_000_000_000;

    fn event_starting_in(minutes: i64, reminder_minutes: i64) -> CalendarEvent {
        CalendarEvent {
            id: Default::default(),
            user_id: Default::default(),
            title: "Dentista".into(),
            start_ts: NOW + minutes * MILLIS_PER_MINUTE,
            end_ts: NOW + (minutes + 60) * MILLIS_PER_MINUTE,
            all_day: false,
            location: Some("Centro".into()),
            reminder_minutes,
            repeat: RepeatFrequency::None,
            event_type: EventType::Health,
            status: EventStatus::Busy,
            created: 0,
            updated: 0,
        }
    }

    #[test]
    fn event_without_reminder_is_never_active() {
        let mut session = ReminderSession::new();
        let event = event_starting_in(5, 0);

        session.check(&[event], NOW);

        assert!(session.active().is_empty());
    }

    #[test]
    fn event_inside_window_is_active() {
        let mut session = ReminderSession::new();
        let event = event_starting_in(10, 15);

        session.check(&[event.clone()], NOW);

        assert_eq!(session.active().len(), 1);
        assert_eq!(session.active()[0].event_id, event.id);
        assert_eq!(session.active()[0].minutes_until, 10);
    }

    #[test]
    fn event_outside_window_is_not_active() {
        let mut session = ReminderSession::new();
        let too_far = event_starting_in(30, 15);
        let started = event_starting_in(0, 15);
        let passed = event_starting_in(-5, 15);

        session.check(&[too_far, started, passed], NOW);

        assert!(session.active().is_empty());
    }

    #[test]
    fn active_list_is_replaced_in_input_order_on_every_check() {
        let mut session = ReminderSession::new();
        let first = event_starting_in(5, 15);
        let second = event_starting_in(10, 15);

        session.check(&[first.clone(), second.clone()], NOW);
        assert_eq!(session.active()[0].event_id, first.id);
        assert_eq!(session.active()[1].event_id, second.id);

        // Second check happens after `first` has started
        session.check(
            &[first, second.clone()],
            NOW + 6 * MILLIS_PER_MINUTE,
        );
        assert_eq!(session.active().len(), 1);
        assert_eq!(session.active()[0].event_id, second.id);
    }

    #[test]
    fn dismissed_event_stays_out_while_window_holds() {
        let mut session = ReminderSession::new();
        let event = event_starting_in(10, 15);

        session.check(&[event.clone()], NOW);
        assert_eq!(session.active().len(), 1);

        session.dismiss(&event.id);
        assert!(session.active().is_empty());

        session.check(&[event.clone()], NOW + MILLIS_PER_MINUTE);
        assert!(session.active().is_empty());
    }

    #[test]
    fn snoozed_event_comes_back_after_the_interval() {
        let mut session = ReminderSession::new();
        let event = event_starting_in(20, 30);

        session.check(&[event.clone()], NOW);
        session.snooze(&event.id, NOW);
        assert!(session.active().is_empty());

        // Still suppressed right before the snooze expires
        session.check(&[event.clone()], NOW + SNOOZE_INTERVAL_MILLIS - 1);
        assert!(session.active().is_empty());

        // Eligible again afterwards, window still holds
        session.check(&[event.clone()], NOW + SNOOZE_INTERVAL_MILLIS);
        assert_eq!(session.active().len(), 1);
        assert_eq!(session.active()[0].event_id, event.id);
    }

    #[test]
    fn snoozed_event_stays_out_when_window_no_longer_holds() {
        let mut session = ReminderSession::new();
        let event = event_starting_in(5, 15);

        session.check(&[event.clone()], NOW);
        session.snooze(&event.id, NOW);

        // By the time the snooze expires the event has already started
        session.check(&[event], NOW + SNOOZE_INTERVAL_MILLIS);
        assert!(session.active().is_empty());
    }

    #[test]
    fn toast_is_emitted_at_most_once_per_event() {
        let mut session = ReminderSession::new();
        let event = event_starting_in(10, 15);

        let toasts = session.check(&[event.clone()], NOW);
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].event_id, event.id);
        assert_eq!(toasts[0].minutes_until, 10);

        let toasts = session.check(&[event.clone()], NOW + MILLIS_PER_MINUTE);
        assert!(toasts.is_empty());
        // The event itself remains active though
        assert_eq!(session.active().len(), 1);
    }

    #[test]
    fn snoozed_event_does_not_toast_again_on_return() {
        let mut session = ReminderSession::new();
        let event = event_starting_in(20, 30);

        assert_eq!(session.check(&[event.clone()], NOW).len(), 1);
        session.snooze(&event.id, NOW);

        let toasts = session.check(&[event], NOW + SNOOZE_INTERVAL_MILLIS);
        assert!(toasts.is_empty());
    }
}
