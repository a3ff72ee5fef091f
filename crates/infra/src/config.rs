use rotina_utils::create_random_secret;
use tracing::{info, warn};

const WEBHOOK_SECRET_LEN: usize = 24;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Bot token used for outbound chat replies. When it is absent the
    /// webhook still accepts updates but every reply is skipped.
    pub telegram_bot_token: Option<String>,
    /// Secret expected in the `X-Telegram-Bot-Api-Secret-Token` header of
    /// inbound webhook calls. Pass the same value as `secret_token` when
    /// registering the webhook with the bot platform.
    pub telegram_webhook_secret: String,
}

impl Config {
    pub fn new() -> Self {
        let telegram_bot_token = match std::env::var("TELEGRAM_BOT_TOKEN") {
            Ok(token) => Some(token),
            Err(_) => {
                warn!("Did not find TELEGRAM_BOT_TOKEN environment variable. Chat replies will be skipped.");
                None
            }
        };
        let telegram_webhook_secret = match std::env::var("TELEGRAM_WEBHOOK_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find TELEGRAM_WEBHOOK_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(WEBHOOK_SECRET_LEN);
                info!(
                    "Secret token for the webhook was generated and set to: {}",
                    secret
                );
                secret
            }
        };
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };
        Self {
            port,
            telegram_bot_token,
            telegram_webhook_secret,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
