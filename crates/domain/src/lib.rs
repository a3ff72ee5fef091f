mod event;
mod message;
mod profile;
mod reminder;
mod shared;
mod transaction;

pub use event::{CalendarEvent, EventStatus, EventType, RepeatFrequency};
pub use message::{
    is_help_request, parse_entry, plan_entry, CallbackPayload, EntryPlan, NewTransaction,
    ParsedEntry, CALLBACK_DELIMITER,
};
pub use profile::{Profile, UserAccount, UserCard};
pub use reminder::{
    ActiveReminder, ReminderSession, Toast, SNOOZE_INTERVAL_MILLIS, TOAST_DURATION_MILLIS,
};
pub use shared::entity::{Entity, ID};
pub use transaction::{Transaction, TransactionStatus, TransactionType};
