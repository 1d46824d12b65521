//! Active account lookup.
//!
//! The session service owns the single "currently active" number. The
//! selection is global to the process: every chat user talks to the same
//! account, whoever asks.

use std::{
    fs,
    path::{Path, PathBuf},
};

use api_types::account::{SessionFile, SubscriptionType, Tokens};
use async_trait::async_trait;

/// Everything the bot needs to query the account-data API on behalf of the
/// active number.
#[derive(Clone, Debug)]
pub struct ActiveAccountContext {
    pub number: String,
    pub subscription_type: SubscriptionType,
    pub tokens: Tokens,
    pub api_key: String,
}

#[async_trait]
pub trait SessionService: Send + Sync {
    /// Returns the active account, or `None` when nobody is logged in.
    async fn active_account(&self) -> Option<ActiveAccountContext>;
}

/// Resolves the account an interaction should act on.
///
/// `telegram_user_id` does not take part in the lookup.
pub(crate) async fn resolve(
    sessions: &dyn SessionService,
    telegram_user_id: u64,
) -> Option<ActiveAccountContext> {
    let active = sessions.active_account().await;
    match &active {
        Some(ctx) => tracing::debug!(
            "user {telegram_user_id} resolved to {} ({})",
            ctx.number,
            ctx.subscription_type
        ),
        None => tracing::info!("user {telegram_user_id}: no active account"),
    }
    active
}

/// Session service backed by the JSON file the login tooling writes.
///
/// The file is read again on every query so that switching the active number
/// on the server is picked up without restarting the bot.
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    api_key: String,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>, api_key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            api_key: api_key.into(),
        }
    }

    fn load(&self) -> Option<SessionFile> {
        match read_json_file(&self.path) {
            Ok(file) => Some(file),
            Err(err) => {
                tracing::warn!("session file {} unusable: {err}", self.path.display());
                None
            }
        }
    }
}

#[async_trait]
impl SessionService for FileSessionStore {
    async fn active_account(&self) -> Option<ActiveAccountContext> {
        let file = self.load()?;
        let record = file.active()?;
        Some(ActiveAccountContext {
            number: record.number.clone(),
            subscription_type: record.subscription_type,
            tokens: record.tokens.clone(),
            api_key: self.api_key.clone(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
enum SessionFileError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse failed: {0}")]
    Json(#[from] serde_json::Error),
}

fn read_json_file(path: &Path) -> Result<SessionFile, SessionFileError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
