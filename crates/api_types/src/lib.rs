use serde::{Deserialize, Serialize};

/// Response envelope used by every account-data endpoint.
///
/// The gateway answers `200` even for rejected calls, so `status` has to be
/// checked before `data` is trusted.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub const SUCCESS: &'static str = "SUCCESS";

    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case(Self::SUCCESS)
    }
}

pub mod account {
    use super::*;

    /// Subscription family of a number.
    ///
    /// Only `Prepaid` numbers take part in the loyalty program, so the tiering
    /// endpoint is called for them alone. Tags the bot does not know about
    /// decode to `Unknown` instead of failing the whole session file.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum SubscriptionType {
        Prepaid,
        Postpaid,
        Priohybrid,
        #[default]
        #[serde(other)]
        Unknown,
    }

    impl SubscriptionType {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Prepaid => "PREPAID",
                Self::Postpaid => "POSTPAID",
                Self::Priohybrid => "PRIOHYBRID",
                Self::Unknown => "UNKNOWN",
            }
        }
    }

    impl core::fmt::Display for SubscriptionType {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str(self.as_str())
        }
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct Tokens {
        pub id_token: String,
        #[serde(default)]
        pub access_token: String,
        #[serde(default)]
        pub refresh_token: String,
    }

    /// One logged-in number as stored by the session service.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct AccountRecord {
        pub number: String,
        #[serde(default)]
        pub subscription_type: SubscriptionType,
        pub tokens: Tokens,
    }

    /// On-disk layout of the session service's account file.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SessionFile {
        pub active_number: Option<String>,
        #[serde(default)]
        pub accounts: Vec<AccountRecord>,
    }

    impl SessionFile {
        /// Returns the record selected as active, if any.
        pub fn active(&self) -> Option<&AccountRecord> {
            let number = self.active_number.as_deref()?;
            self.accounts.iter().find(|a| a.number == number)
        }
    }
}

pub mod balance {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountQuery {
        pub is_enterprise: bool,
        pub lang: String,
    }

    impl Default for AccountQuery {
        fn default() -> Self {
            Self {
                is_enterprise: false,
                lang: "en".to_string(),
            }
        }
    }

    /// `data` of the balance-and-credit endpoint.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct BalanceAndCredit {
        #[serde(default)]
        pub balance: Option<Balance>,
    }

    /// Main balance of the number.
    ///
    /// Both fields may be missing in partial responses; callers treat a
    /// missing value as zero.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Balance {
        #[serde(default)]
        pub remaining: Option<i64>,
        /// Unix timestamp (seconds).
        #[serde(default)]
        pub expired_at: Option<i64>,
    }
}

pub mod tiering {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TieringInfo {
        #[serde(default)]
        pub tier: Option<i64>,
        #[serde(default)]
        pub current_point: Option<i64>,
    }
}
