use super::IEventRepo;
use crate::repos::shared::inmemory_repo::*;
use rotina_domain::{CalendarEvent, ID};

pub struct InMemoryEventRepo {
    calendar_events: std::sync::Mutex<Vec<CalendarEvent>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            calendar_events: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        insert(e, &self.calendar_events);
        Ok(())
    }

    async fn save(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        save(e, &self.calendar_events);
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<CalendarEvent> {
        find(event_id, &self.calendar_events)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<CalendarEvent>> {
        let res = find_by(&self.calendar_events, |event| event.user_id == *user_id);
        Ok(res)
    }

    async fn delete(&self, event_id: &ID) -> Option<CalendarEvent> {
        delete(event_id, &self.calendar_events)
    }
}
