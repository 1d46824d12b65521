//! In-memory collaborators for unit tests.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use api_types::{
    account::{SubscriptionType, Tokens},
    balance::Balance,
    tiering::TieringInfo,
};
use async_trait::async_trait;
use teloxide::{
    ApiError as TelegramApiError, RequestError,
    prelude::*,
    types::{CallbackQueryId, ChatId, MessageId},
};

use crate::{
    ConfigParameters,
    api::{AccountData, ApiError},
    session::{ActiveAccountContext, SessionService},
    snapshot::DisplayZone,
    transport::Transport,
    ui::Screen,
};

pub(crate) fn context(kind: SubscriptionType) -> ActiveAccountContext {
    ActiveAccountContext {
        number: "0812xxxx".to_string(),
        subscription_type: kind,
        tokens: Tokens {
            id_token: "id-token".to_string(),
            access_token: "access-token".to_string(),
            refresh_token: "refresh-token".to_string(),
        },
        api_key: "api-key".to_string(),
    }
}

pub(crate) fn params(sessions: FakeSessions, accounts: FakeAccounts) -> ConfigParameters {
    ConfigParameters {
        allowed_users: None,
        sessions: Arc::new(sessions),
        accounts: Arc::new(accounts),
        zone: DisplayZone::Named(chrono_tz::UTC),
    }
}

pub(crate) struct FakeSessions {
    active: Option<ActiveAccountContext>,
}

impl FakeSessions {
    pub(crate) fn empty() -> Self {
        Self { active: None }
    }

    pub(crate) fn with(kind: SubscriptionType) -> Self {
        Self {
            active: Some(context(kind)),
        }
    }
}

#[async_trait]
impl SessionService for FakeSessions {
    async fn active_account(&self) -> Option<ActiveAccountContext> {
        self.active.clone()
    }
}

/// Account-data fake with canned answers and call counters.
///
/// Clones share the counters, so a test can keep one handle and give the
/// other to the code under test.
#[derive(Clone)]
pub(crate) struct FakeAccounts {
    balance: Arc<Result<Balance, String>>,
    tiering: Arc<Result<TieringInfo, String>>,
    balance_calls: Arc<AtomicUsize>,
    tiering_calls: Arc<AtomicUsize>,
}

impl FakeAccounts {
    pub(crate) fn with(
        balance: Result<Balance, String>,
        tiering: Result<TieringInfo, String>,
    ) -> Self {
        Self {
            balance: Arc::new(balance),
            tiering: Arc::new(tiering),
            balance_calls: Arc::default(),
            tiering_calls: Arc::default(),
        }
    }

    pub(crate) fn prepaid_ok() -> Self {
        Self::with(
            Ok(Balance {
                remaining: Some(15_000),
                expired_at: Some(1_715_000_000),
            }),
            Ok(TieringInfo {
                tier: Some(2),
                current_point: Some(340),
            }),
        )
    }

    pub(crate) fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn tiering_calls(&self) -> usize {
        self.tiering_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountData for FakeAccounts {
    async fn balance(&self, _api_key: &str, _id_token: &str) -> Result<Balance, ApiError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        (*self.balance).clone().map_err(ApiError::Rejected)
    }

    async fn tiering_info(
        &self,
        _api_key: &str,
        _tokens: &Tokens,
    ) -> Result<TieringInfo, ApiError> {
        self.tiering_calls.fetch_add(1, Ordering::SeqCst);
        (*self.tiering).clone().map_err(ApiError::Rejected)
    }
}

#[derive(Debug)]
pub(crate) enum Call {
    Ack(String),
    Send(ChatId, Screen),
    Replace(ChatId, MessageId, Screen),
}

impl Call {
    pub(crate) fn is_send_to(&self, chat_id: ChatId) -> bool {
        matches!(self, Call::Send(chat, _) if *chat == chat_id)
    }

    pub(crate) fn is_replace_of(&self, chat_id: ChatId, message_id: MessageId) -> bool {
        matches!(self, Call::Replace(chat, msg, _) if *chat == chat_id && *msg == message_id)
    }
}

/// Transport that records every outbound call in order.
#[derive(Default)]
pub(crate) struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    fail_ack: bool,
}

impl RecordingTransport {
    pub(crate) fn failing_ack() -> Self {
        Self {
            calls: Mutex::default(),
            fail_ack: true,
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn acknowledge(&self, query_id: &CallbackQueryId) -> ResponseResult<()> {
        if self.fail_ack {
            return Err(RequestError::Api(TelegramApiError::Unknown(
                "query is too old".to_string(),
            )));
        }
        self.record(Call::Ack(query_id.0.clone()));
        Ok(())
    }

    async fn send(&self, chat_id: ChatId, screen: &Screen) -> ResponseResult<()> {
        self.record(Call::Send(chat_id, screen.clone()));
        Ok(())
    }

    async fn replace(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        screen: &Screen,
    ) -> ResponseResult<()> {
        self.record(Call::Replace(chat_id, message_id, screen.clone()));
        Ok(())
    }
}
