use rotina_domain::{Profile, UserAccount, UserCard, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDTO {
    pub id: ID,
    pub user_id: ID,
    pub chat_id: Option<i64>,
    pub user_cards: Vec<UserCard>,
    pub user_accounts: Vec<UserAccount>,
}

impl ProfileDTO {
    pub fn new(profile: Profile) -> Self {
        Self {
            id: profile.id,
            user_id: profile.user_id,
            chat_id: profile.chat_id,
            user_cards: profile.cards,
            user_accounts: profile.accounts,
        }
    }
}
