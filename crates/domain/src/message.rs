use crate::profile::Profile;
use crate::transaction::{TransactionStatus, TransactionType};
use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Delimiter of the callback payload tuple carried inside chat buttons
pub const CALLBACK_DELIMITER: char = '|';

const CALLBACK_FIELD_COUNT: usize = 7;

/// First integer or one/two-decimal number in the text, '.' or ',' separated
static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:[.,]\d{1,2})?").unwrap());

/// "dia 5" / "dia 28" style day-of-month override
static DAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"dia (\d{1,2})").unwrap());

const PENDING_KEYWORDS: &[&str] = &["pendente", "agendar", "depois"];

struct TypeRule {
    keywords: &'static [&'static str],
    transaction_type: TransactionType,
}

/// Keyword rules for the transaction type, evaluated top to bottom with the
/// first match winning. Order is part of the contract.
const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        keywords: &["cartao", "cartão", "credito"],
        transaction_type: TransactionType::Card,
    },
    TypeRule {
        keywords: &["transferencia", "transferir"],
        transaction_type: TransactionType::Transfer,
    },
    TypeRule {
        keywords: &["pix", "recebi", "venda"],
        transaction_type: TransactionType::Income,
    },
];

pub fn is_help_request(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    text == "/start" || text.contains("ajuda")
}

/// A finance entry extracted from one free-text chat message
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEntry {
    pub amount: f64,
    pub description: String,
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub date: DateTime<Utc>,
}

/// Extracts amount, description, type, status and date from a chat message.
/// Returns `None` when no amount-looking number is present.
pub fn parse_entry(text: &str, now: DateTime<Utc>) -> Option<ParsedEntry> {
    let amount_match = AMOUNT_RE.find(text)?;
    let amount: f64 = amount_match.as_str().replace(',', ".").parse().ok()?;

    let description = format!(
        "{}{}",
        &text[..amount_match.start()],
        &text[amount_match.end()..]
    )
    .trim()
    .to_string();

    let lowered = text.to_lowercase();

    let status = if PENDING_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
        TransactionStatus::Pending
    } else {
        TransactionStatus::Paid
    };

    let mut date = now;
    if let Some(caps) = DAY_RE.captures(&lowered) {
        if let Ok(day) = caps[1].parse::<u32>() {
            // A day that does not exist in the current month leaves the
            // date untouched
            if let Some(overridden) = date.with_day(day) {
                date = overridden;
            }
        }
    }

    let transaction_type = TYPE_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|rule| rule.transaction_type)
        .unwrap_or(TransactionType::Expense);

    Some(ParsedEntry {
        amount,
        description,
        transaction_type,
        status,
        date,
    })
}

/// Everything needed to resume a disambiguation round-trip, carried inside
/// the button itself: the webhook stays stateless between the prompt and
/// the follow-up click.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackPayload {
    pub action: TransactionType,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub date: DateTime<Utc>,
    pub description: String,
    pub item: String,
}

impl CallbackPayload {
    pub fn encode(&self) -> String {
        let amount = self.amount.to_string();
        let date = self.date.to_rfc3339_opts(SecondsFormat::Millis, true);
        [
            self.action.as_str(),
            amount.as_str(),
            self.transaction_type.as_str(),
            self.status.as_str(),
            date.as_str(),
            self.description.as_str(),
            self.item.as_str(),
        ]
        .join(&CALLBACK_DELIMITER.to_string())
    }

    /// Strict inverse of [`encode`](Self::encode): anything other than
    /// exactly seven well-formed fields yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let fields: Vec<&str> = raw.split(CALLBACK_DELIMITER).collect();
        if fields.len() != CALLBACK_FIELD_COUNT {
            return None;
        }
        Some(Self {
            action: fields[0].parse().ok()?,
            amount: fields[1].parse().ok()?,
            transaction_type: fields[2].parse().ok()?,
            status: fields[3].parse().ok()?,
            date: DateTime::parse_from_rfc3339(fields[4])
                .ok()?
                .with_timezone(&Utc),
            description: fields[5].to_string(),
            item: fields[6].to_string(),
        })
    }

    pub fn into_transaction(self) -> NewTransaction {
        let transaction_type = if self.action == TransactionType::Card {
            TransactionType::Card
        } else {
            self.transaction_type
        };
        NewTransaction {
            title: compose_title(self.action, &self.description, &self.item),
            amount: self.amount,
            transaction_type,
            category: category_for(self.action).to_string(),
            date: self.date,
            status: self.status,
        }
    }
}

/// A transaction ready to be persisted, before ownership and timestamps
/// are filled in
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub title: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub category: String,
    pub date: DateTime<Utc>,
    pub status: TransactionStatus,
}

/// Outcome of planning a parsed entry against the sender's profile
#[derive(Debug, Clone, PartialEq)]
pub enum EntryPlan {
    /// No ambiguity: persist right away
    Insert(NewTransaction),
    /// More than one card configured: ask which one, one payload per card
    PromptCards(Vec<CallbackPayload>),
    /// More than one account configured: ask which one
    PromptAccounts(Vec<CallbackPayload>),
}

/// Decides whether an entry can be written directly or needs the sender to
/// pick a card/account first.
pub fn plan_entry(entry: &ParsedEntry, profile: &Profile) -> EntryPlan {
    match entry.transaction_type {
        TransactionType::Card if profile.cards.len() > 1 => EntryPlan::PromptCards(
            profile
                .cards
                .iter()
                .map(|card| payload_for(entry, &card.name))
                .collect(),
        ),
        TransactionType::Transfer | TransactionType::Income if profile.accounts.len() > 1 => {
            EntryPlan::PromptAccounts(
                profile
                    .accounts
                    .iter()
                    .map(|account| payload_for(entry, &account.name))
                    .collect(),
            )
        }
        transaction_type => {
            let item = match transaction_type {
                TransactionType::Card => profile
                    .cards
                    .first()
                    .map(|card| card.name.clone())
                    .unwrap_or_else(|| "Crédito".to_string()),
                TransactionType::Transfer | TransactionType::Income => profile
                    .accounts
                    .first()
                    .map(|account| account.name.clone())
                    .unwrap_or_default(),
                TransactionType::Expense => String::new(),
            };
            EntryPlan::Insert(NewTransaction {
                title: compose_title(transaction_type, &entry.description, &item),
                amount: entry.amount,
                transaction_type,
                category: category_for(transaction_type).to_string(),
                date: entry.date,
                status: entry.status,
            })
        }
    }
}

fn payload_for(entry: &ParsedEntry, item: &str) -> CallbackPayload {
    CallbackPayload {
        action: entry.transaction_type,
        amount: entry.amount,
        transaction_type: entry.transaction_type,
        status: entry.status,
        date: entry.date,
        description: entry.description.clone(),
        item: item.to_string(),
    }
}

fn category_for(action: TransactionType) -> &'static str {
    match action {
        TransactionType::Card => "Cartão",
        TransactionType::Income => "Receitas",
        _ => "Geral",
    }
}

fn compose_title(action: TransactionType, description: &str, item: &str) -> String {
    if item.is_empty() {
        description.to_string()
    } else if action == TransactionType::Card {
        format!("{} ({})", description, item)
    } else {
        format!("{} [{}]", description, item)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::profile::{UserAccount, UserCard};
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.ymd(2024, 5, 20).and_hms(12, 0, 0)
    }

    fn profile_with(cards: Vec<&str>, accounts: Vec<&str>) -> Profile {
        Profile {
            id: Default::default(),
            user_id: Default::default(),
            chat_id: Some(42),
            cards: cards
                .into_iter()
                .map(|name| UserCard { name: name.into() })
                .collect(),
            accounts: accounts
                .into_iter()
                .map(|name| UserAccount { name: name.into() })
                .collect(),
        }
    }

    #[test]
    fn parses_plain_expense() {
        let entry = parse_entry("Almoço 35", noon()).unwrap();

        assert_eq!(entry.amount, 35.0);
        assert_eq!(entry.description, "Almoço");
        assert_eq!(entry.transaction_type, TransactionType::Expense);
        assert_eq!(entry.status, TransactionStatus::Paid);
        assert_eq!(entry.date, noon());
    }

    #[test]
    fn parses_comma_decimal_amount() {
        let entry = parse_entry("Padaria 12,50", noon()).unwrap();
        assert_eq!(entry.amount, 12.5);
        assert_eq!(entry.description, "Padaria");
    }

    #[test]
    fn text_without_amount_is_rejected() {
        assert!(parse_entry("Almoço com a equipe", noon()).is_none());
    }

    #[test]
    fn pending_keyword_sets_status() {
        let entry = parse_entry("Internet 99,90 agendar", noon()).unwrap();
        assert_eq!(entry.status, TransactionStatus::Pending);
    }

    #[test]
    fn income_with_day_override() {
        let entry = parse_entry("Salário 5000 recebi dia 10", noon()).unwrap();

        assert_eq!(entry.transaction_type, TransactionType::Income);
        assert_eq!(entry.status, TransactionStatus::Paid);
        assert_eq!(entry.amount, 5000.0);
        assert_eq!(entry.date, Utc.ymd(2024, 5, 10).and_hms(12, 0, 0));
    }

    #[test]
    fn invalid_day_override_keeps_the_date() {
        // May has 31 days; February does not
        let february = Utc.ymd(2024, 2, 15).and_hms(8, 0, 0);
        let entry = parse_entry("Aluguel 1200 dia 31", february).unwrap();
        assert_eq!(entry.date, february);
    }

    #[test]
    fn type_rules_win_in_declaration_order() {
        // Both a card keyword and an income keyword present: card rule is
        // declared first and must win
        let entry = parse_entry("Mercado 80 pix cartao", noon()).unwrap();
        assert_eq!(entry.transaction_type, TransactionType::Card);

        let entry = parse_entry("Mercado 80 transferir venda", noon()).unwrap();
        assert_eq!(entry.transaction_type, TransactionType::Transfer);
    }

    #[test]
    fn recognizes_help_requests() {
        assert!(is_help_request("/start"));
        assert!(is_help_request("preciso de ajuda"));
        assert!(!is_help_request("Almoço 35"));
    }

    #[test]
    fn single_card_inserts_directly() {
        let entry = parse_entry("Uber 20 cartao", noon()).unwrap();
        let plan = plan_entry(&entry, &profile_with(vec!["Nubank"], vec![]));

        match plan {
            EntryPlan::Insert(transaction) => {
                assert_eq!(transaction.title, "Uber  cartao (Nubank)");
                assert_eq!(transaction.transaction_type, TransactionType::Card);
                assert_eq!(transaction.category, "Cartão");
            }
            other => panic!("Expected direct insert, got {:?}", other),
        }
    }

    #[test]
    fn two_cards_prompt_instead_of_inserting() {
        let entry = parse_entry("Uber 20 cartao", noon()).unwrap();
        let plan = plan_entry(&entry, &profile_with(vec!["Nubank", "Inter"], vec![]));

        match plan {
            EntryPlan::PromptCards(payloads) => {
                assert_eq!(payloads.len(), 2);
                for payload in &payloads {
                    let reparsed = CallbackPayload::parse(&payload.encode()).unwrap();
                    assert_eq!(&reparsed, payload);
                    assert_eq!(reparsed.amount, 20.0);
                    assert_eq!(reparsed.transaction_type, TransactionType::Card);
                }
                assert_eq!(payloads[0].item, "Nubank");
                assert_eq!(payloads[1].item, "Inter");
            }
            other => panic!("Expected card prompt, got {:?}", other),
        }
    }

    #[test]
    fn two_accounts_prompt_for_income() {
        let entry = parse_entry("Venda 150", noon()).unwrap();
        assert_eq!(entry.transaction_type, TransactionType::Income);

        let plan = plan_entry(&entry, &profile_with(vec![], vec!["Itaú", "Caixa"]));
        match plan {
            EntryPlan::PromptAccounts(payloads) => {
                assert_eq!(payloads.len(), 2);
                assert_eq!(payloads[0].action, TransactionType::Income);
                assert_eq!(payloads[0].transaction_type, TransactionType::Income);
            }
            other => panic!("Expected account prompt, got {:?}", other),
        }
    }

    #[test]
    fn card_without_configured_cards_defaults_item_name() {
        let entry = parse_entry("Uber 20 credito", noon()).unwrap();
        let plan = plan_entry(&entry, &profile_with(vec![], vec![]));

        match plan {
            EntryPlan::Insert(transaction) => {
                assert_eq!(transaction.title, "Uber  credito (Crédito)");
            }
            other => panic!("Expected direct insert, got {:?}", other),
        }
    }

    #[test]
    fn expense_without_item_omits_the_suffix() {
        let entry = parse_entry("Almoço 35", noon()).unwrap();
        let plan = plan_entry(&entry, &profile_with(vec!["Nubank"], vec!["Itaú"]));

        match plan {
            EntryPlan::Insert(transaction) => {
                assert_eq!(transaction.title, "Almoço");
                assert_eq!(transaction.category, "Geral");
            }
            other => panic!("Expected direct insert, got {:?}", other),
        }
    }

    #[test]
    fn callback_payload_round_trips() {
        let payload = CallbackPayload::parse(
            "card|20|card|paid|2024-05-01T00:00:00.000Z|Uber|Nubank",
        )
        .unwrap();

        assert_eq!(payload.action, TransactionType::Card);
        assert_eq!(payload.amount, 20.0);
        assert_eq!(payload.status, TransactionStatus::Paid);
        assert_eq!(payload.description, "Uber");
        assert_eq!(payload.item, "Nubank");
        assert_eq!(
            payload.encode(),
            "card|20|card|paid|2024-05-01T00:00:00.000Z|Uber|Nubank"
        );

        let transaction = payload.into_transaction();
        assert_eq!(transaction.title, "Uber (Nubank)");
        assert_eq!(transaction.category, "Cartão");
        assert_eq!(transaction.amount, 20.0);
    }

    #[test]
    fn callback_title_uses_brackets_for_accounts() {
        let payload = CallbackPayload::parse(
            "income|150|income|paid|2024-05-01T00:00:00.000Z|Venda|Itaú",
        )
        .unwrap();

        let transaction = payload.into_transaction();
        assert_eq!(transaction.title, "Venda [Itaú]");
        assert_eq!(transaction.category, "Receitas");
        assert_eq!(transaction.transaction_type, TransactionType::Income);
    }

    #[test]
    fn malformed_callback_payloads_are_rejected() {
        // Wrong field count
        assert!(CallbackPayload::parse("card|20|card|paid").is_none());
        // Too many fields
        assert!(CallbackPayload::parse(
            "card|20|card|paid|2024-05-01T00:00:00.000Z|Uber|Nubank|extra"
        )
        .is_none());
        // Unknown status
        assert!(CallbackPayload::parse(
            "card|20|card|later|2024-05-01T00:00:00.000Z|Uber|Nubank"
        )
        .is_none());
        // Unparseable date
        assert!(
            CallbackPayload::parse("card|20|card|paid|yesterday|Uber|Nubank").is_none()
        );
    }
}
