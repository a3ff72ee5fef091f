use super::IProfileRepo;
use crate::services::HostedDbApi;
use rotina_domain::{Profile, UserAccount, UserCard, ID};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const TABLE: &str = "profiles";

pub struct HostedProfileRepo {
    db: Arc<HostedDbApi>,
}

impl HostedProfileRepo {
    pub fn new(db: Arc<HostedDbApi>) -> Self {
        Self { db }
    }
}

#[derive(Debug, Serialize)]
struct ProfileRow<'a> {
    id: &'a ID,
    user_id: &'a ID,
    chat_id: Option<i64>,
    user_cards: &'a [UserCard],
    user_accounts: &'a [UserAccount],
}

impl<'a> ProfileRow<'a> {
    fn new(p: &'a Profile) -> Self {
        Self {
            id: &p.id,
            user_id: &p.user_id,
            chat_id: p.chat_id,
            user_cards: &p.cards,
            user_accounts: &p.accounts,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProfileRaw {
    id: ID,
    user_id: ID,
    #[serde(default)]
    chat_id: Option<i64>,
    #[serde(default)]
    user_cards: Vec<UserCard>,
    #[serde(default)]
    user_accounts: Vec<UserAccount>,
}

impl ProfileRaw {
    fn into_domain(self) -> Profile {
        Profile {
            id: self.id,
            user_id: self.user_id,
            chat_id: self.chat_id,
            cards: self.user_cards,
            accounts: self.user_accounts,
        }
    }
}

fn decode_profiles(rows: Vec<serde_json::Value>) -> Vec<Profile> {
    HostedDbApi::decode_rows::<ProfileRaw>(TABLE, rows)
        .into_iter()
        .map(|raw| raw.into_domain())
        .collect()
}

#[async_trait::async_trait]
impl IProfileRepo for HostedProfileRepo {
    async fn insert(&self, p: &Profile) -> anyhow::Result<()> {
        self.db.insert(TABLE, &ProfileRow::new(p)).await
    }

    async fn save(&self, p: &Profile) -> anyhow::Result<()> {
        self.db
            .update(TABLE, &[("id", format!("eq.{}", p.id))], &ProfileRow::new(p))
            .await
    }

    async fn find(&self, profile_id: &ID) -> Option<Profile> {
        let rows = self
            .db
            .select(TABLE, &[("id", format!("eq.{}", profile_id))])
            .await
            .ok()?;
        decode_profiles(rows).into_iter().next()
    }

    async fn find_by_user(&self, user_id: &ID) -> Option<Profile> {
        let rows = self
            .db
            .select(TABLE, &[("user_id", format!("eq.{}", user_id))])
            .await
            .ok()?;
        decode_profiles(rows).into_iter().next()
    }

    async fn find_by_chat_id(&self, chat_id: i64) -> Option<Profile> {
        let rows = self
            .db
            .select(TABLE, &[("chat_id", format!("eq.{}", chat_id))])
            .await
            .ok()?;
        decode_profiles(rows).into_iter().next()
    }
}
