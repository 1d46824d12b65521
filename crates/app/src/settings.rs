//! Handles settings for the application.
//!
//! Sources, lowest priority first: `config/akun.toml` (or `--config`),
//! `AKUN__SECTION__KEY` environment variables, then `TELEGRAM_BOT_TOKEN`.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/akun";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("TELEGRAM_BOT_TOKEN is not set")]
    MissingToken,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Telegram {
    pub token: Option<String>,
    pub allowed_users: Vec<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Account {
    pub api_url: String,
    pub api_key: String,
    pub session_path: Option<String>,
    /// IANA name; host local zone when unset.
    pub timezone: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub telegram: Telegram,
    pub account: Account,
}

#[derive(Debug, Parser)]
#[command(name = "akun", version)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    level: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, SettingsError> {
        let args = Args::parse();
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix("AKUN")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("telegram.allowed_users"),
            )
            .set_override_option("telegram.token", std::env::var("TELEGRAM_BOT_TOKEN").ok())?
            .set_override_option("app.level", args.level)?
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()
    }

    fn validate(self) -> Result<Self, SettingsError> {
        match self.telegram.token.as_deref().map(str::trim) {
            None | Some("") => Err(SettingsError::MissingToken),
            Some(_) => Ok(self),
        }
    }

    pub fn token(&self) -> &str {
        self.telegram.token.as_deref().unwrap_or_default()
    }
}
