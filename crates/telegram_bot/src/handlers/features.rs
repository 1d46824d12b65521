//! Handlers behind the main menu buttons.
//!
//! None of the account operations run from the bot yet; each feature answers
//! with a notice in the chat the button was pressed in.

use teloxide::{prelude::*, types::ChatId};

use crate::{
    ConfigParameters,
    menu::Feature,
    transport::Transport,
    ui::{Reply, Screen},
};

pub(crate) async fn handle_feature(
    transport: &dyn Transport,
    _cfg: &ConfigParameters,
    chat_id: ChatId,
    feature: Feature,
) -> ResponseResult<()> {
    tracing::debug!("feature {feature:?} selected in {chat_id:?}");
    transport
        .send(chat_id, &Screen::Notice(notice(feature)))
        .await
}

fn notice(feature: Feature) -> Reply {
    match feature {
        Feature::SwitchAccount => Reply::plain("Fitur Ganti Akun belum diimplementasikan di Bot."),
        Feature::MyPackages => {
            Reply::html("📦 <b>Daftar Paket Anda:</b>\n(Fitur ini belum tersedia di Bot.)")
        }
        Feature::HotPackages => Reply::html("🔥 <b>Menu Hot</b> dipilih."),
        other => Reply::html(format!(
            "<b>{}</b> belum tersedia di Bot.",
            teloxide::utils::html::escape(other.label())
        )),
    }
}
