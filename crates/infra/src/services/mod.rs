mod hosted_db;
mod telegram;

pub use hosted_db::HostedDbApi;
pub use telegram::{InlineKeyboardButton, InlineKeyboardMarkup, TelegramBotApi};
