use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// A credit card configured by the user, referenced by name in chat replies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCard {
    pub name: String,
}

/// A bank account configured by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub name: String,
}

/// Per-user settings, including the chat identifier that links an external
/// messaging account to its owner. Cards and accounts keep the order the
/// user configured them in.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: ID,
    pub user_id: ID,
    pub chat_id: Option<i64>,
    pub cards: Vec<UserCard>,
    pub accounts: Vec<UserAccount>,
}

impl Entity for Profile {
    fn id(&self) -> &ID {
        &self.id
    }
}
