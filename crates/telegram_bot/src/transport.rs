//! Outbound side of the bot.
//!
//! Handlers only talk to [`Transport`], so the routing logic can be driven
//! without a Telegram connection.

use async_trait::async_trait;
use teloxide::{
    ApiError as TelegramApiError, RequestError,
    prelude::*,
    types::{CallbackQueryId, ChatId, MessageId, ParseMode},
};

use crate::ui::{self, Screen, TextFormat};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Answers a callback query so the client stops showing the spinner.
    async fn acknowledge(&self, query_id: &CallbackQueryId) -> ResponseResult<()>;

    /// Sends the screen as a new message.
    async fn send(&self, chat_id: ChatId, screen: &Screen) -> ResponseResult<()>;

    /// Overwrites an existing message with the screen.
    async fn replace(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        screen: &Screen,
    ) -> ResponseResult<()>;
}

pub(crate) struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub(crate) fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn parse_mode(format: TextFormat) -> Option<ParseMode> {
    match format {
        TextFormat::Plain => None,
        TextFormat::Html => Some(ParseMode::Html),
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn acknowledge(&self, query_id: &CallbackQueryId) -> ResponseResult<()> {
        self.bot.answer_callback_query(query_id.clone()).await?;
        Ok(())
    }

    async fn send(&self, chat_id: ChatId, screen: &Screen) -> ResponseResult<()> {
        match screen {
            Screen::Menu(view) => {
                self.bot
                    .send_message(chat_id, view.text.clone())
                    .parse_mode(ParseMode::Html)
                    .reply_markup(ui::keyboard(view.menu))
                    .await?;
            }
            Screen::Notice(reply) => {
                let mut req = self.bot.send_message(chat_id, reply.text.clone());
                if let Some(mode) = parse_mode(reply.format) {
                    req = req.parse_mode(mode);
                }
                req.await?;
            }
        }
        Ok(())
    }

    async fn replace(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        screen: &Screen,
    ) -> ResponseResult<()> {
        let sent = match screen {
            Screen::Menu(view) => {
                self.bot
                    .edit_message_text(chat_id, message_id, view.text.clone())
                    .parse_mode(ParseMode::Html)
                    .reply_markup(ui::keyboard(view.menu))
                    .await
            }
            // Editing without a markup drops the old keyboard.
            Screen::Notice(reply) => {
                let mut req = self
                    .bot
                    .edit_message_text(chat_id, message_id, reply.text.clone());
                if let Some(mode) = parse_mode(reply.format) {
                    req = req.parse_mode(mode);
                }
                req.await
            }
        };

        match sent {
            Ok(_) => Ok(()),
            Err(RequestError::Api(TelegramApiError::MessageNotModified)) => {
                tracing::debug!("refresh of {chat_id:?}/{message_id:?}: content unchanged");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}
