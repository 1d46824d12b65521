use teloxide::{
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
    utils::html,
};

use crate::{
    menu::{MAIN_MENU, MenuRow},
    session::ActiveAccountContext,
    snapshot::{AccountSnapshot, FetchError, Tiering},
};

const RULE: &str = "=========================================";
const POINTS_UNAVAILABLE: &str = "Points: N/A | Tier: N/A";

/// Main menu view: HTML text plus the full action catalog.
#[derive(Clone, Debug)]
pub struct ViewPayload {
    pub text: String,
    pub menu: &'static [MenuRow],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    Html,
}

/// A message without the menu attached.
#[derive(Clone, Debug)]
pub struct Reply {
    pub text: String,
    pub format: TextFormat,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Plain,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Html,
        }
    }
}

#[derive(Clone, Debug)]
pub enum Screen {
    Menu(ViewPayload),
    Notice(Reply),
}

pub(crate) fn render_menu(
    snapshot: Result<&AccountSnapshot, &FetchError>,
    ctx: &ActiveAccountContext,
) -> ViewPayload {
    let text = match snapshot {
        Ok(snapshot) => format!(
            "{RULE}\n\
             👤 <b>Nomor:</b> <code>{number}</code> | <b>Type:</b> {kind}\n\
             💰 <b>Pulsa:</b> Rp {balance}\n\
             📅 <b>Aktif sampai:</b> {expires}\n\
             💎 <b>{points}</b>\n\
             {RULE}",
            number = html::escape(&ctx.number),
            kind = ctx.subscription_type,
            balance = format_thousands(snapshot.balance_remaining),
            expires = snapshot.balance_expires_on.format("%Y-%m-%d"),
            points = points_line(snapshot.tiering),
        ),
        Err(err) => format!(
            "Error mengambil data akun: {}",
            html::escape(&err.to_string())
        ),
    };

    ViewPayload {
        text,
        menu: MAIN_MENU,
    }
}

pub(crate) fn no_active_account() -> Reply {
    Reply::plain("⚠️ Belum ada user yang login. Silakan set active user di server.")
}

pub(crate) fn unknown_action(data: &str) -> Reply {
    Reply::plain(format!("Anda memilih menu dengan data: {data}"))
}

pub(crate) fn keyboard(menu: &[MenuRow]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(menu.iter().map(|row| {
        row.iter()
            .map(|action| InlineKeyboardButton::callback(action.label, action.id))
    }))
}

fn points_line(tiering: Option<Tiering>) -> String {
    match tiering {
        Some(t) => format!("Points: {} | Tier: {}", t.current_point, t.tier),
        None => POINTS_UNAVAILABLE.to_string(),
    }
}

/// Formats an integer with `,` every three digits, e.g. `15000` → `15,000`.
pub(crate) fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
