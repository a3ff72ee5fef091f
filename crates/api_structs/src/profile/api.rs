use crate::dtos::ProfileDTO;
use rotina_domain::{Profile, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub profile: ProfileDTO,
}

impl ProfileResponse {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile: ProfileDTO::new(profile),
        }
    }
}

pub mod get_user_profile {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    pub type APIResponse = ProfileResponse;
}
