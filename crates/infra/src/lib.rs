mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
use repos::Repos;
pub use services::*;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct Context {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub hosted_db_url: String,
    pub hosted_db_api_key: String,
}

impl Context {
    fn create(params: ContextParams) -> Self {
        let repos = Repos::create_hosted(HostedDbApi::new(
            params.hosted_db_url,
            params.hosted_db_api_key,
        ));
        Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> Context {
    Context::create(ContextParams {
        hosted_db_url: get_env_var("HOSTED_DB_URL"),
        hosted_db_api_key: get_env_var("HOSTED_DB_API_KEY"),
    })
}

fn get_env_var(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{} env var to be present.", name))
}
