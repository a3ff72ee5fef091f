use super::IProfileRepo;
use crate::repos::shared::inmemory_repo::*;
use rotina_domain::{Profile, ID};

pub struct InMemoryProfileRepo {
    profiles: std::sync::Mutex<Vec<Profile>>,
}

impl InMemoryProfileRepo {
    pub fn new() -> Self {
        Self {
            profiles: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IProfileRepo for InMemoryProfileRepo {
    async fn insert(&self, p: &Profile) -> anyhow::Result<()> {
        insert(p, &self.profiles);
        Ok(())
    }

    async fn save(&self, p: &Profile) -> anyhow::Result<()> {
        save(p, &self.profiles);
        Ok(())
    }

    async fn find(&self, profile_id: &ID) -> Option<Profile> {
        find(profile_id, &self.profiles)
    }

    async fn find_by_user(&self, user_id: &ID) -> Option<Profile> {
        find_by(&self.profiles, |profile| profile.user_id == *user_id)
            .into_iter()
            .next()
    }

    async fn find_by_chat_id(&self, chat_id: i64) -> Option<Profile> {
        find_by(&self.profiles, |profile| profile.chat_id == Some(chat_id))
            .into_iter()
            .next()
    }
}
