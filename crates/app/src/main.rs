use std::time::Duration;

use teloxide::types::UserId;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // A missing .env is fine: every value can come from the real environment.
    let _ = dotenvy::dotenv();
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "akun={level},telegram_bot={level}",
            level = settings.app.level
        ))
        .init();

    let account = &settings.account;
    let mut builder = telegram_bot::Bot::builder()
        .token(settings.token())
        .allowed_users(
            settings
                .telegram
                .allowed_users
                .iter()
                .copied()
                .map(UserId)
                .collect(),
        )
        .account_api(&account.api_url, &account.api_key);
    if let Some(path) = &account.session_path {
        builder = builder.session_path(path);
    }
    if let Some(tz) = &account.timezone {
        builder = builder.timezone(tz);
    }
    if let Some(secs) = account.request_timeout_secs {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }

    let bot = match builder.build() {
        Ok(bot) => bot,
        Err(err) => {
            tracing::error!("failed to initialize telegram bot: {err}");
            return Err(err.into());
        }
    };
    bot.run().await;

    Ok(())
}
