//! Telegram bot.
//!
//! The bot is a thin front end over the account session store and the
//! account-data API: it shows the active number's balance with the main menu
//! and routes button presses back to the menu or to feature handlers.

use std::{path::PathBuf, sync::Arc, time::Duration};

use chrono_tz::Tz;
use reqwest::Client;
use teloxide::prelude::*;

pub mod api;
mod commands;
mod handlers;
pub mod menu;
pub mod session;
pub mod snapshot;
mod transport;
mod ui;

#[cfg(test)]
mod testing;

pub use api::{AccountData, ApiError};
pub use session::{ActiveAccountContext, FileSessionStore, SessionService};
pub use snapshot::DisplayZone;

const DEFAULT_SESSION_PATH: &str = "config/accounts.json";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("telegram bot token is not set")]
    MissingToken,
    #[error("account api url is not set")]
    MissingApiUrl,
    #[error("unknown timezone: {0}")]
    InvalidTimezone(String),
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct ConfigParameters {
    allowed_users: Option<Vec<UserId>>,
    sessions: Arc<dyn SessionService>,
    accounts: Arc<dyn AccountData>,
    zone: DisplayZone,
}

pub struct Bot {
    token: String,
    allowed_users: Option<Vec<UserId>>,
    sessions: Arc<dyn SessionService>,
    accounts: Arc<dyn AccountData>,
    zone: DisplayZone,
}

impl Bot {
    pub fn new(
        token: &str,
        allowed_users: Option<Vec<UserId>>,
        sessions: Arc<dyn SessionService>,
        accounts: Arc<dyn AccountData>,
        zone: DisplayZone,
    ) -> Result<Self, BotError> {
        if token.trim().is_empty() {
            return Err(BotError::MissingToken);
        }

        Ok(Self {
            token: token.to_string(),
            allowed_users,
            sessions,
            accounts,
            zone,
        })
    }

    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);

        let parameters = ConfigParameters {
            allowed_users: self.allowed_users.clone(),
            sessions: self.sessions.clone(),
            accounts: self.accounts.clone(),
            zone: self.zone,
        };

        tracing::info!("Bot sedang berjalan...");
        Dispatcher::builder(bot, handlers::schema())
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::warn!("Unhandled update: {:?}", upd.id);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default, Debug)]
pub struct BotBuilder {
    token: String,
    allowed_users: Option<Vec<UserId>>,
    api_url: String,
    api_key: String,
    session_path: Option<PathBuf>,
    timezone: Option<String>,
    request_timeout: Option<Duration>,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    pub fn allowed_users(mut self, allowed_users: Vec<UserId>) -> BotBuilder {
        if !allowed_users.is_empty() {
            self.allowed_users = Some(allowed_users);
        }
        self
    }

    pub fn account_api(mut self, url: &str, api_key: &str) -> BotBuilder {
        self.api_url = url.to_string();
        self.api_key = api_key.to_string();
        self
    }

    pub fn session_path(mut self, path: impl Into<PathBuf>) -> BotBuilder {
        self.session_path = Some(path.into());
        self
    }

    /// IANA zone used for dates. Defaults to the host's local zone.
    pub fn timezone(mut self, timezone: &str) -> BotBuilder {
        self.timezone = Some(timezone.to_string());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> BotBuilder {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Bot, BotError> {
        tracing::info!("Initializing telegram bot...");
        if self.api_url.trim().is_empty() {
            return Err(BotError::MissingApiUrl);
        }

        let zone = match self.timezone.as_deref().map(str::trim) {
            None | Some("") => DisplayZone::Local,
            Some(name) => DisplayZone::Named(
                name.parse::<Tz>()
                    .map_err(|_| BotError::InvalidTimezone(name.to_string()))?,
            ),
        };

        let client = Client::builder()
            .timeout(self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
            .build()?;
        let accounts = api::ApiClient::new(client, self.api_url);

        let session_path = self
            .session_path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_PATH));
        let sessions = FileSessionStore::new(session_path, self.api_key);

        Bot::new(
            &self.token,
            self.allowed_users,
            Arc::new(sessions),
            Arc::new(accounts),
            zone,
        )
    }
}
