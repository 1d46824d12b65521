use api_types::{
    Envelope,
    account::Tokens,
    balance::{AccountQuery, Balance, BalanceAndCredit},
    tiering::TieringInfo,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

const BALANCE_PATH: &str = "/api/v8/packages/balance-and-credit";
const TIERING_PATH: &str = "/gamification/api/v8/loyalties/tiering/info";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Remote account-data calls the menu needs.
#[async_trait]
pub trait AccountData: Send + Sync {
    async fn balance(&self, api_key: &str, id_token: &str) -> Result<Balance, ApiError>;

    async fn tiering_info(&self, api_key: &str, tokens: &Tokens) -> Result<TieringInfo, ApiError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: String,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub(crate) fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn post_json<TReq: serde::Serialize + ?Sized, TResp: for<'de> serde::Deserialize<'de>>(
        &self,
        api_key: &str,
        bearer: &str,
        path: &str,
        body: &TReq,
    ) -> Result<TResp, ApiError> {
        let resp = self
            .client
            .post(self.url(path))
            .header("x-api-key", api_key)
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(err) => err.message,
                Err(_) => "server error".to_string(),
            };
            return Err(ApiError::Server { status, message });
        }

        let envelope: Envelope<TResp> = serde_json::from_str(&body)?;
        if !envelope.is_success() {
            let reason = envelope.message.unwrap_or(envelope.status);
            return Err(ApiError::Rejected(reason));
        }
        envelope
            .data
            .ok_or_else(|| ApiError::Rejected(format!("{path}: response without data")))
    }
}

#[async_trait]
impl AccountData for ApiClient {
    async fn balance(&self, api_key: &str, id_token: &str) -> Result<Balance, ApiError> {
        let data: BalanceAndCredit = self
            .post_json(api_key, id_token, BALANCE_PATH, &AccountQuery::default())
            .await?;
        Ok(data.balance.unwrap_or_default())
    }

    async fn tiering_info(&self, api_key: &str, tokens: &Tokens) -> Result<TieringInfo, ApiError> {
        self.post_json(api_key, &tokens.id_token, TIERING_PATH, &AccountQuery::default())
            .await
    }
}
