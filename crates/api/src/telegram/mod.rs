mod handle_update;

use crate::shared::usecase::execute;
use actix_web::{web, HttpRequest, HttpResponse};
use handle_update::{BotReply, HandleBotUpdateUseCase};
use rotina_api_structs::TelegramUpdate;
use rotina_infra::{Context, InlineKeyboardButton, InlineKeyboardMarkup, TelegramBotApi};
use tracing::warn;

const WEBHOOK_SECRET_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// The webhook contract is an unconditional `200 "ok"`: every internal
/// outcome, including failures, is acknowledged the same way so the bot
/// platform never retries into a half-processed update.
pub async fn telegram_webhook_controller(
    http_req: HttpRequest,
    body: web::Bytes,
    ctx: web::Data<Context>,
) -> HttpResponse {
    let provided_secret = http_req
        .headers()
        .get(WEBHOOK_SECRET_HEADER)
        .and_then(|value| value.to_str().ok());
    if provided_secret != Some(ctx.config.telegram_webhook_secret.as_str()) {
        warn!("Webhook call with a missing or invalid secret token was ignored");
        return ok_response();
    }

    let update = match serde_json::from_slice::<TelegramUpdate>(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!("Could not decode webhook body. Error message: {:?}", e);
            return ok_response();
        }
    };

    let usecase = HandleBotUpdateUseCase { update };
    match execute(usecase, &ctx).await {
        Ok(reply) => send_reply(reply, &ctx).await,
        // Already logged by the use case executor
        Err(_) => {}
    }

    ok_response()
}

fn ok_response() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

async fn send_reply(reply: BotReply, ctx: &Context) {
    let token = match &ctx.config.telegram_bot_token {
        Some(token) => token.clone(),
        None => {
            if !matches!(reply, BotReply::Silent) {
                warn!("Skipping chat reply because TELEGRAM_BOT_TOKEN is not configured");
            }
            return;
        }
    };
    let api = TelegramBotApi::new(token);

    match reply {
        BotReply::Silent => {}
        BotReply::Text { chat_id, text } => {
            // Send errors are logged by the client; the transport answer
            // stays "ok" regardless
            let _ = api.send_message(chat_id, &text, None).await;
        }
        BotReply::Choice {
            chat_id,
            text,
            options,
        } => {
            let markup = InlineKeyboardMarkup {
                inline_keyboard: options
                    .into_iter()
                    .map(|option| {
                        vec![InlineKeyboardButton {
                            text: option.label,
                            callback_data: option.payload,
                        }]
                    })
                    .collect(),
            };
            let _ = api.send_message(chat_id, &text, Some(&markup)).await;
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/telegram-webhook",
        web::post().to(telegram_webhook_controller),
    );
}
