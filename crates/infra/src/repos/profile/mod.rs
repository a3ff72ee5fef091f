mod hosted;
mod inmemory;

pub use hosted::HostedProfileRepo;
pub use inmemory::InMemoryProfileRepo;
use rotina_domain::{Profile, ID};

#[async_trait::async_trait]
pub trait IProfileRepo: Send + Sync {
    async fn insert(&self, p: &Profile) -> anyhow::Result<()>;
    async fn save(&self, p: &Profile) -> anyhow::Result<()>;
    async fn find(&self, profile_id: &ID) -> Option<Profile>;
    async fn find_by_user(&self, user_id: &ID) -> Option<Profile>;
    async fn find_by_chat_id(&self, chat_id: i64) -> Option<Profile>;
}
