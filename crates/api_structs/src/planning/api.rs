use crate::dtos::{ActiveReminderDTO, ToastDTO};
use rotina_domain::{ActiveReminder, Toast, ID};
use serde::{Deserialize, Serialize};

pub mod start_planning_session {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub session_id: ID,
    }
}

pub mod stop_planning_session {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub session_id: ID,
    }
}

pub mod get_session_reminders {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub session_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub active: Vec<ActiveReminderDTO>,
        pub toasts: Vec<ToastDTO>,
    }

    impl APIResponse {
        pub fn new(active: Vec<ActiveReminder>, toasts: Vec<Toast>) -> Self {
            Self {
                active: active.into_iter().map(ActiveReminderDTO::new).collect(),
                toasts: toasts.into_iter().map(ToastDTO::new).collect(),
            }
        }
    }
}

pub mod dismiss_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub session_id: ID,
        pub event_id: ID,
    }
}

pub mod snooze_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub session_id: ID,
        pub event_id: ID,
    }
}

pub mod refresh_planning_session {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub session_id: ID,
    }
}
