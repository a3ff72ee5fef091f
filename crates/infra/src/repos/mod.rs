mod event;
mod profile;
mod shared;
mod transaction;

use crate::services::HostedDbApi;
use event::{HostedEventRepo, IEventRepo, InMemoryEventRepo};
use profile::{HostedProfileRepo, IProfileRepo, InMemoryProfileRepo};
use std::sync::Arc;
use transaction::{HostedTransactionRepo, ITransactionRepo, InMemoryTransactionRepo};

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
    pub transactions: Arc<dyn ITransactionRepo>,
    pub profiles: Arc<dyn IProfileRepo>,
}

impl Repos {
    pub fn create_hosted(db: HostedDbApi) -> Self {
        let db = Arc::new(db);
        Self {
            events: Arc::new(HostedEventRepo::new(db.clone())),
            transactions: Arc::new(HostedTransactionRepo::new(db.clone())),
            profiles: Arc::new(HostedProfileRepo::new(db)),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            events: Arc::new(InMemoryEventRepo::new()),
            transactions: Arc::new(InMemoryTransactionRepo::new()),
            profiles: Arc::new(InMemoryProfileRepo::new()),
        }
    }
}
