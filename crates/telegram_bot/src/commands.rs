//! Command structs

use teloxide::utils::command::BotCommands;

/// Commands that open the main menu.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Perintah yang tersedia:")]
pub enum MenuCommands {
    #[command(description = "Tampilkan profil akun dan menu utama.")]
    Start,
    #[command(description = "Kirim ulang menu utama.")]
    Menu,
    #[command(description = "Tampilkan pesan ini.")]
    Help,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lowercase_commands() {
        assert_eq!(
            MenuCommands::parse("/start", "akun_bot").unwrap(),
            MenuCommands::Start
        );
        assert_eq!(
            MenuCommands::parse("/menu@akun_bot", "akun_bot").unwrap(),
            MenuCommands::Menu
        );
        assert!(MenuCommands::parse("/beli", "akun_bot").is_err());
    }

    #[test]
    fn help_lists_every_command() {
        let help = MenuCommands::descriptions().to_string();
        for cmd in ["/start", "/menu", "/help"] {
            assert!(help.contains(cmd), "{cmd} missing from:\n{help}");
        }
    }
}
