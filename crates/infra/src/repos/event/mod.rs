mod hosted;
mod inmemory;

pub use hosted::HostedEventRepo;
pub use inmemory::InMemoryEventRepo;
use rotina_domain::{CalendarEvent, ID};

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, e: &CalendarEvent) -> anyhow::Result<()>;
    async fn save(&self, e: &CalendarEvent) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> Option<CalendarEvent>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<CalendarEvent>>;
    async fn delete(&self, event_id: &ID) -> Option<CalendarEvent>;
}

#[cfg(test)]
mod tests {
    use crate::Context;
    use rotina_domain::{CalendarEvent, ID};

    fn generate_default_event() -> CalendarEvent {
        CalendarEvent {
            id: Default::default(),
            user_id: Default::default(),
            title: Default::default(),
            start_ts: Default::default(),
            end_ts: Default::default(),
            all_day: Default::default(),
            location: Default::default(),
            reminder_minutes: Default::default(),
            repeat: Default::default(),
            event_type: Default::default(),
            status: Default::default(),
            created: Default::default(),
            updated: Default::default(),
        }
    }

    #[tokio::test]
    async fn create_and_delete() {
        let ctx = Context::create_inmemory();
        let event = generate_default_event();

        // Insert
        assert!(ctx.repos.events.insert(&event).await.is_ok());

        // Find
        let get_event_res = ctx.repos.events.find(&event.id).await.unwrap();
        assert_eq!(get_event_res, event);

        // Delete
        let delete_res = ctx
            .repos
            .events
            .delete(&event.id)
            .await
            .expect("To delete event by id");
        assert_eq!(delete_res, event);

        // Find
        assert!(ctx.repos.events.find(&event.id).await.is_none());
    }

    #[tokio::test]
    async fn update() {
        let ctx = Context::create_inmemory();
        let mut event = generate_default_event();

        assert!(ctx.repos.events.insert(&event).await.is_ok());

        event.updated += 1;
        assert!(ctx.repos.events.save(&event).await.is_ok());

        assert_eq!(
            ctx.repos.events.find(&event.id).await.expect("To be event"),
            event
        );
    }

    #[tokio::test]
    async fn find_by_user() {
        let ctx = Context::create_inmemory();
        let user_id = ID::default();

        let mut mine = generate_default_event();
        mine.user_id = user_id.clone();
        let other = generate_default_event();

        ctx.repos.events.insert(&mine).await.unwrap();
        ctx.repos.events.insert(&other).await.unwrap();

        let found = ctx.repos.events.find_by_user(&user_id).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0], mine);
    }
}
