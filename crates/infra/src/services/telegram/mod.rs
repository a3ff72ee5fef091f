use reqwest::Client;
use serde::Serialize;
use tracing::error;

const TELEGRAM_API_BASE_URL: &str = "https://api.telegram.org";

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    /// Ordered rows of buttons, each row an ordered list
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a InlineKeyboardMarkup>,
}

/// Outbound client for the bot platform's `sendMessage` call
pub struct TelegramBotApi {
    client: Client,
    token: String,
}

impl TelegramBotApi {
    pub fn new(token: String) -> Self {
        let client = Client::new();

        Self { client, token }
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> anyhow::Result<()> {
        let body = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "HTML",
            reply_markup,
        };
        match self
            .client
            .post(&format!(
                "{}/bot{}/sendMessage",
                TELEGRAM_API_BASE_URL, self.token
            ))
            .json(&body)
            .send()
            .await
        {
            Ok(res) => match res.error_for_status() {
                Ok(_) => Ok(()),
                Err(e) => {
                    error!(
                        "[Unexpected Response] Telegram sendMessage error. Error message: {:?}",
                        e
                    );
                    Err(anyhow::Error::new(e))
                }
            },
            Err(e) => {
                error!(
                    "[Network Error] Telegram sendMessage error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }
}
