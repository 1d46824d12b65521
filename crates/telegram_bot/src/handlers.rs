use teloxide::{
    RequestError,
    dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler},
    prelude::*,
    types::{CallbackQuery, CallbackQueryId, ChatId, MessageId},
    utils::command::BotCommands,
};

use crate::{
    ConfigParameters,
    commands::MenuCommands,
    menu::{self, Target},
    session, snapshot,
    transport::{TelegramTransport, Transport},
    ui::{self, Reply, Screen},
};

mod features;

/// Build the update schema: menu commands and button presses.
pub(crate) fn schema() -> UpdateHandler<RequestError> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<MenuCommands>()
                .endpoint(handle_command),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callback))
}

/// Where a rendered menu ends up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ShowMode {
    SendNew,
    ReplaceInPlace(MessageId),
}

/// A button press, stripped of the Telegram update around it.
#[derive(Clone, Debug)]
pub(crate) struct Selection {
    pub query_id: CallbackQueryId,
    pub user_id: u64,
    /// Chat and message the pressed keyboard belongs to.
    pub origin: Option<(ChatId, MessageId)>,
    pub data: Option<String>,
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: MenuCommands,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    let Some(from) = msg.from.as_ref().filter(|u| is_allowed(&cfg, u.id)) else {
        return Ok(());
    };
    let transport = TelegramTransport::new(bot);
    route_command(&transport, &cfg, msg.chat.id, from.id.0, cmd).await
}

async fn handle_callback(bot: Bot, q: CallbackQuery, cfg: ConfigParameters) -> ResponseResult<()> {
    if !is_allowed(&cfg, q.from.id) {
        return Ok(());
    }

    let selection = Selection {
        origin: q.message.as_ref().map(|m| (m.chat().id, m.id())),
        user_id: q.from.id.0,
        data: q.data,
        query_id: q.id,
    };
    let transport = TelegramTransport::new(bot);
    route_selection(&transport, &cfg, selection).await
}

pub(crate) async fn route_command(
    transport: &dyn Transport,
    cfg: &ConfigParameters,
    chat_id: ChatId,
    user_id: u64,
    cmd: MenuCommands,
) -> ResponseResult<()> {
    match cmd {
        MenuCommands::Start | MenuCommands::Menu => {
            show_menu(transport, cfg, chat_id, user_id, ShowMode::SendNew).await
        }
        MenuCommands::Help => {
            let help = Reply::plain(MenuCommands::descriptions().to_string());
            transport.send(chat_id, &Screen::Notice(help)).await
        }
    }
}

pub(crate) async fn route_selection(
    transport: &dyn Transport,
    cfg: &ConfigParameters,
    selection: Selection,
) -> ResponseResult<()> {
    // Nothing below runs for a selection Telegram has not been told about.
    transport.acknowledge(&selection.query_id).await?;

    let Some((chat_id, message_id)) = selection.origin else {
        tracing::debug!("selection {:?} has no reachable message", selection.data);
        return Ok(());
    };
    let Some(data) = selection.data.as_deref() else {
        tracing::debug!("selection on message {message_id:?} in {chat_id:?} carries no data");
        return Ok(());
    };

    match menu::lookup(data).map(|action| action.target) {
        Some(Target::Refresh) => {
            show_menu(
                transport,
                cfg,
                chat_id,
                selection.user_id,
                ShowMode::ReplaceInPlace(message_id),
            )
            .await
        }
        Some(Target::Feature(feature)) => {
            features::handle_feature(transport, cfg, chat_id, feature).await
        }
        None => {
            tracing::debug!("unknown menu selection {data:?}");
            transport
                .send(chat_id, &Screen::Notice(ui::unknown_action(data)))
                .await
        }
    }
}

/// Resolves the active account, fetches its snapshot and shows the menu.
pub(crate) async fn show_menu(
    transport: &dyn Transport,
    cfg: &ConfigParameters,
    chat_id: ChatId,
    user_id: u64,
    mode: ShowMode,
) -> ResponseResult<()> {
    let screen = match session::resolve(cfg.sessions.as_ref(), user_id).await {
        None => Screen::Notice(ui::no_active_account()),
        Some(ctx) => {
            let snapshot = snapshot::fetch(cfg.accounts.as_ref(), &ctx, cfg.zone).await;
            if let Err(err) = &snapshot {
                tracing::error!("Error fetching data for {}: {err}", ctx.number);
            }
            Screen::Menu(ui::render_menu(snapshot.as_ref(), &ctx))
        }
    };

    match mode {
        ShowMode::SendNew => transport.send(chat_id, &screen).await,
        ShowMode::ReplaceInPlace(message_id) => {
            transport.replace(chat_id, message_id, &screen).await
        }
    }
}

fn is_allowed(cfg: &ConfigParameters, user_id: UserId) -> bool {
    match &cfg.allowed_users {
        None => true,
        Some(ids) => ids.contains(&user_id),
    }
}
