use crate::shared::usecase::UseCase;
use chrono::{TimeZone, Utc};
use rotina_api_structs::{TelegramCallbackQuery, TelegramUpdate};
use rotina_domain::{
    is_help_request, parse_entry, plan_entry, CallbackPayload, EntryPlan, NewTransaction,
    Profile, Transaction,
};
use rotina_infra::Context;

pub const HELP_TEXT: &str = "Olá! Me envie um lançamento como <b>Mercado 120</b> e eu registro para você.\n\
Use <i>cartao</i>, <i>pix</i> ou <i>transferir</i> para mudar o tipo, <i>dia 10</i> para mudar a data e <i>pendente</i> para agendar o pagamento.";

const CARD_PROMPT: &str = "Em qual cartão?";
const ACCOUNT_PROMPT: &str = "Em qual conta?";

/// What the webhook should send back, if anything. The controller owns the
/// actual network call so this use case stays a pure repos-and-parsing
/// affair.
#[derive(Debug, PartialEq)]
pub enum BotReply {
    /// No reply at all. Unknown senders and unparseable input end here.
    Silent,
    Text {
        chat_id: i64,
        text: String,
    },
    /// A disambiguation prompt with one button per option; nothing has
    /// been persisted yet
    Choice {
        chat_id: i64,
        text: String,
        options: Vec<ChoiceOption>,
    },
}

#[derive(Debug, PartialEq)]
pub struct ChoiceOption {
    pub label: String,
    pub payload: String,
}

#[derive(Debug)]
pub struct HandleBotUpdateUseCase {
    pub update: TelegramUpdate,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for HandleBotUpdateUseCase {
    type Response = BotReply;

    type Error = UseCaseError;

    const NAME: &'static str = "HandleBotUpdate";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        if let Some(callback) = self.update.callback_query.clone() {
            return handle_callback(&callback, ctx).await;
        }
        if let Some(message) = self.update.message.clone() {
            if let Some(text) = &message.text {
                return handle_text(message.chat.id, text, ctx).await;
            }
        }
        Ok(BotReply::Silent)
    }
}

/// A button click completing an earlier disambiguation prompt. All state
/// travels inside the button payload; a payload that does not reparse is
/// dropped without a reply.
async fn handle_callback(
    callback: &TelegramCallbackQuery,
    ctx: &Context,
) -> Result<BotReply, UseCaseError> {
    let data = match &callback.data {
        Some(data) => data,
        None => return Ok(BotReply::Silent),
    };
    let payload = match CallbackPayload::parse(data) {
        Some(payload) => payload,
        None => return Ok(BotReply::Silent),
    };
    let profile = match ctx.repos.profiles.find_by_chat_id(callback.from.id).await {
        Some(profile) => profile,
        None => return Ok(BotReply::Silent),
    };

    let transaction = insert_transaction(payload.into_transaction(), &profile, ctx).await?;

    Ok(BotReply::Text {
        chat_id: callback.from.id,
        text: confirmation_text(&transaction),
    })
}

async fn handle_text(chat_id: i64, text: &str, ctx: &Context) -> Result<BotReply, UseCaseError> {
    if is_help_request(text) {
        return Ok(BotReply::Text {
            chat_id,
            text: HELP_TEXT.into(),
        });
    }

    // Unknown senders get no response at all, so the bot does not reveal
    // its existence to strangers
    let profile = match ctx.repos.profiles.find_by_chat_id(chat_id).await {
        Some(profile) => profile,
        None => return Ok(BotReply::Silent),
    };

    let now = Utc.timestamp_millis(ctx.sys.get_timestamp_millis());
    let entry = match parse_entry(text, now) {
        Some(entry) => entry,
        None => return Ok(BotReply::Silent),
    };

    match plan_entry(&entry, &profile) {
        EntryPlan::Insert(new_transaction) => {
            let transaction = insert_transaction(new_transaction, &profile, ctx).await?;
            Ok(BotReply::Text {
                chat_id,
                text: confirmation_text(&transaction),
            })
        }
        EntryPlan::PromptCards(payloads) => Ok(choice_reply(chat_id, CARD_PROMPT, payloads)),
        EntryPlan::PromptAccounts(payloads) => {
            Ok(choice_reply(chat_id, ACCOUNT_PROMPT, payloads))
        }
    }
}

async fn insert_transaction(
    new_transaction: NewTransaction,
    profile: &Profile,
    ctx: &Context,
) -> Result<Transaction, UseCaseError> {
    let now = ctx.sys.get_timestamp_millis();
    let transaction = Transaction {
        id: Default::default(),
        user_id: profile.user_id.clone(),
        title: new_transaction.title,
        amount: new_transaction.amount,
        transaction_type: new_transaction.transaction_type,
        category: new_transaction.category,
        date_ts: new_transaction.date.timestamp_millis(),
        status: new_transaction.status,
        created: now,
        updated: now,
    };

    ctx.repos
        .transactions
        .insert(&transaction)
        .await
        .map_err(|_| UseCaseError::StorageError)?;

    Ok(transaction)
}

fn confirmation_text(transaction: &Transaction) -> String {
    format!(
        "✅ <b>{}</b> registrado: R$ {:.2}",
        transaction.title, transaction.amount
    )
}

fn choice_reply(chat_id: i64, text: &str, payloads: Vec<CallbackPayload>) -> BotReply {
    BotReply::Choice {
        chat_id,
        text: text.into(),
        options: payloads
            .into_iter()
            .map(|payload| ChoiceOption {
                label: payload.item.clone(),
                payload: payload.encode(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rotina_api_structs::{TelegramChat, TelegramMessage, TelegramUser};
    use rotina_domain::{TransactionStatus, TransactionType, UserAccount, UserCard, ID};
    use rotina_infra::ISys;
    use std::sync::Arc;

    const NOW: i64 = 1_600_000_000_000;
    const CHAT_ID: i64 = 42;

    struct StaticTimeSys;
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            NOW
        }
    }

    fn setup_context() -> Context {
        let mut ctx = Context::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys {});
        ctx
    }

    async fn insert_profile(ctx: &Context, cards: Vec<&str>, accounts: Vec<&str>) -> Profile {
        let profile = Profile {
            id: Default::default(),
            user_id: ID::default(),
            chat_id: Some(CHAT_ID),
            cards: cards
                .into_iter()
                .map(|name| UserCard { name: name.into() })
                .collect(),
            accounts: accounts
                .into_iter()
                .map(|name| UserAccount { name: name.into() })
                .collect(),
        };
        ctx.repos.profiles.insert(&profile).await.unwrap();
        profile
    }

    fn text_update(text: &str) -> TelegramUpdate {
        TelegramUpdate {
            message: Some(TelegramMessage {
                text: Some(text.into()),
                chat: TelegramChat { id: CHAT_ID },
            }),
            callback_query: None,
        }
    }

    fn callback_update(data: &str) -> TelegramUpdate {
        TelegramUpdate {
            message: None,
            callback_query: Some(TelegramCallbackQuery {
                data: Some(data.into()),
                from: TelegramUser { id: CHAT_ID },
            }),
        }
    }

    async fn stored_transactions(ctx: &Context, profile: &Profile) -> Vec<Transaction> {
        ctx.repos
            .transactions
            .find_by_user(&profile.user_id)
            .await
            .unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn unknown_sender_is_silently_ignored() {
        let ctx = setup_context();

        let mut usecase = HandleBotUpdateUseCase {
            update: text_update("Almoço 35"),
        };
        let reply = usecase.execute(&ctx).await.unwrap();

        assert_eq!(reply, BotReply::Silent);
    }

    #[actix_web::main]
    #[test]
    async fn help_request_replies_without_inserting() {
        let ctx = setup_context();
        let profile = insert_profile(&ctx, vec![], vec![]).await;

        let mut usecase = HandleBotUpdateUseCase {
            update: text_update("/start"),
        };
        let reply = usecase.execute(&ctx).await.unwrap();

        match reply {
            BotReply::Text { chat_id, text } => {
                assert_eq!(chat_id, CHAT_ID);
                assert_eq!(text, HELP_TEXT);
            }
            other => panic!("Expected help text, got {:?}", other),
        }
        assert!(stored_transactions(&ctx, &profile).await.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn plain_expense_is_inserted_and_confirmed() {
        let ctx = setup_context();
        let profile = insert_profile(&ctx, vec![], vec![]).await;

        let mut usecase = HandleBotUpdateUseCase {
            update: text_update("Almoço 35"),
        };
        let reply = usecase.execute(&ctx).await.unwrap();

        let stored = stored_transactions(&ctx, &profile).await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Almoço");
        assert_eq!(stored[0].amount, 35.0);
        assert_eq!(stored[0].transaction_type, TransactionType::Expense);
        assert_eq!(stored[0].status, TransactionStatus::Paid);
        assert_eq!(stored[0].date_ts, NOW);

        match reply {
            BotReply::Text { text, .. } => assert!(text.contains("Almoço")),
            other => panic!("Expected confirmation, got {:?}", other),
        }
    }

    #[actix_web::main]
    #[test]
    async fn ambiguous_card_prompts_without_inserting() {
        let ctx = setup_context();
        let profile = insert_profile(&ctx, vec!["Nubank", "Inter"], vec![]).await;

        let mut usecase = HandleBotUpdateUseCase {
            update: text_update("Uber 20 cartao"),
        };
        let reply = usecase.execute(&ctx).await.unwrap();

        assert!(stored_transactions(&ctx, &profile).await.is_empty());

        match reply {
            BotReply::Choice { text, options, .. } => {
                assert_eq!(text, CARD_PROMPT);
                assert_eq!(options.len(), 2);
                for option in &options {
                    let payload = CallbackPayload::parse(&option.payload)
                        .expect("Button payload to reparse");
                    assert_eq!(payload.amount, 20.0);
                    assert_eq!(payload.transaction_type, TransactionType::Card);
                }
                assert_eq!(options[0].label, "Nubank");
                assert_eq!(options[1].label, "Inter");
            }
            other => panic!("Expected card prompt, got {:?}", other),
        }
    }

    #[actix_web::main]
    #[test]
    async fn callback_click_completes_the_round_trip() {
        let ctx = setup_context();
        let profile = insert_profile(&ctx, vec!["Nubank", "Inter"], vec![]).await;

        let mut usecase = HandleBotUpdateUseCase {
            update: callback_update("card|20|card|paid|2024-05-01T00:00:00.000Z|Uber|Nubank"),
        };
        let reply = usecase.execute(&ctx).await.unwrap();

        let stored = stored_transactions(&ctx, &profile).await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Uber (Nubank)");
        assert_eq!(stored[0].category, "Cartão");
        assert_eq!(stored[0].amount, 20.0);
        assert_eq!(stored[0].transaction_type, TransactionType::Card);

        match reply {
            BotReply::Text { text, .. } => assert!(text.contains("Uber (Nubank)")),
            other => panic!("Expected confirmation, got {:?}", other),
        }
    }

    #[actix_web::main]
    #[test]
    async fn malformed_callback_payload_is_dropped() {
        let ctx = setup_context();
        let profile = insert_profile(&ctx, vec!["Nubank"], vec![]).await;

        let mut usecase = HandleBotUpdateUseCase {
            update: callback_update("card|20|card"),
        };
        let reply = usecase.execute(&ctx).await.unwrap();

        assert_eq!(reply, BotReply::Silent);
        assert!(stored_transactions(&ctx, &profile).await.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn income_with_two_accounts_prompts_for_the_account() {
        let ctx = setup_context();
        let profile = insert_profile(&ctx, vec![], vec!["Itaú", "Caixa"]).await;

        let mut usecase = HandleBotUpdateUseCase {
            update: text_update("Salário 5000 recebi dia 10"),
        };
        let reply = usecase.execute(&ctx).await.unwrap();

        assert!(stored_transactions(&ctx, &profile).await.is_empty());

        match reply {
            BotReply::Choice { text, options, .. } => {
                assert_eq!(text, ACCOUNT_PROMPT);
                assert_eq!(options.len(), 2);
                let payload = CallbackPayload::parse(&options[0].payload).unwrap();
                assert_eq!(payload.action, TransactionType::Income);
                assert_eq!(payload.amount, 5000.0);
            }
            other => panic!("Expected account prompt, got {:?}", other),
        }
    }

    #[actix_web::main]
    #[test]
    async fn text_without_amount_is_ignored() {
        let ctx = setup_context();
        let profile = insert_profile(&ctx, vec![], vec![]).await;

        let mut usecase = HandleBotUpdateUseCase {
            update: text_update("bom dia"),
        };
        let reply = usecase.execute(&ctx).await.unwrap();

        assert_eq!(reply, BotReply::Silent);
        assert!(stored_transactions(&ctx, &profile).await.is_empty());
    }
}
