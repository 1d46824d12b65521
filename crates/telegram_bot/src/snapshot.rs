//! Builds the account snapshot shown on the main menu.

use api_types::account::SubscriptionType;
use chrono::{DateTime, Local, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::{
    api::{AccountData, ApiError},
    session::ActiveAccountContext,
};

/// Time zone used to turn the balance expiry into a calendar date.
#[derive(Clone, Copy, Debug, Default)]
pub enum DisplayZone {
    /// Whatever the host is configured with.
    #[default]
    Local,
    Named(Tz),
}

impl DisplayZone {
    /// Calendar date of a Unix timestamp. Timestamps chrono cannot represent
    /// are treated as the epoch.
    pub fn date_of(self, epoch_secs: i64) -> NaiveDate {
        let utc = DateTime::<Utc>::from_timestamp(epoch_secs, 0).unwrap_or_default();
        match self {
            DisplayZone::Local => utc.with_timezone(&Local).date_naive(),
            DisplayZone::Named(tz) => utc.with_timezone(&tz).date_naive(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tiering {
    pub tier: i64,
    pub current_point: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub balance_remaining: i64,
    pub balance_expires_on: NaiveDate,
    /// Only fetched for prepaid numbers.
    pub tiering: Option<Tiering>,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    Balance(ApiError),
    #[error("{0}")]
    Tiering(ApiError),
}

/// Fetches balance and, for prepaid numbers, tiering.
///
/// The calls run one after the other; any failure aborts the snapshot.
pub async fn fetch(
    accounts: &dyn AccountData,
    ctx: &ActiveAccountContext,
    zone: DisplayZone,
) -> Result<AccountSnapshot, FetchError> {
    let balance = accounts
        .balance(&ctx.api_key, &ctx.tokens.id_token)
        .await
        .map_err(FetchError::Balance)?;

    let tiering = match ctx.subscription_type {
        SubscriptionType::Prepaid => {
            let info = accounts
                .tiering_info(&ctx.api_key, &ctx.tokens)
                .await
                .map_err(FetchError::Tiering)?;
            Some(Tiering {
                tier: info.tier.unwrap_or(0),
                current_point: info.current_point.unwrap_or(0),
            })
        }
        SubscriptionType::Postpaid | SubscriptionType::Priohybrid | SubscriptionType::Unknown => {
            None
        }
    };

    Ok(AccountSnapshot {
        balance_remaining: balance.remaining.unwrap_or(0),
        balance_expires_on: zone.date_of(balance.expired_at.unwrap_or(0)),
        tiering,
    })
}
