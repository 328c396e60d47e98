use statusmod_engine::{
    CommandError, PlayerSettings, SettingsStore, clear_status, set_brackets,
    set_position, set_status, set_word_count,
};

use crate::command::HostCommand;
use crate::errors::HostError;
use crate::scoreboard::Scoreboard;

const HELP: &str = "\
<player> status <text> [color]    set your status
<player> status clear             remove your status
<player> settings brackets <on|off>
<player> settings position <before|after>
<player> settings words <n>       words that make up the status
<player> show                     show your settings
list | modinfo | help | quit";

/// Outcome of a console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Reply {
    Message(String),
    Quit,
}

/// Run one command against the store and scoreboard.
pub(crate) fn execute(
    store: &SettingsStore,
    scoreboard: &mut Scoreboard,
    command: HostCommand,
) -> Result<Reply, HostError> {
    let message = match command {
        HostCommand::SetStatus { user, text, color } => {
            let view =
                set_status(store, scoreboard, &user, &text, color.as_deref())?;
            format!("Status set: {} ({})", view.status, view.color)
        },
        HostCommand::ClearStatus { user } => {
            clear_status(store, scoreboard, &user)?;
            String::from("Status cleared.")
        },
        HostCommand::Brackets { user, enabled } => {
            set_brackets(store, scoreboard, &user, enabled)?;
            format!("Brackets: {}", if enabled { "on" } else { "off" })
        },
        HostCommand::Position { user, before_name } => {
            set_position(store, scoreboard, &user, before_name)?;
            let position =
                if before_name { "before the name" } else { "after the name" };
            format!("Position: {position}")
        },
        HostCommand::Words { user, count } => {
            let settings = set_word_count(store, scoreboard, &user, count)?;
            format!("Status words: {}", settings.status_words())
        },
        HostCommand::Show { user } => {
            let settings =
                store.get_or_create(&user).map_err(CommandError::from)?;
            format!(
                "{}\n{}",
                scoreboard.display_name(&user),
                describe(&settings)
            )
        },
        HostCommand::List => list(store, scoreboard),
        HostCommand::ModInfo => mod_info(),
        HostCommand::Help => String::from(HELP),
        HostCommand::Quit => return Ok(Reply::Quit),
    };

    Ok(Reply::Message(message))
}

fn describe(settings: &PlayerSettings) -> String {
    let status = if settings.status().is_empty() {
        "<none>"
    } else {
        settings.status()
    };
    format!(
        "status: {status}, color: {} ({}), brackets: {}, before name: {}, words: {}",
        settings.color(),
        settings.resolved_color(),
        settings.brackets(),
        settings.before_name(),
        settings.status_words()
    )
}

fn list(store: &SettingsStore, scoreboard: &Scoreboard) -> String {
    let players = store.snapshot();
    if players.is_empty() {
        return String::from("No players stored.");
    }

    players
        .iter()
        .map(|(user, settings)| {
            format!("{}: {}", scoreboard.display_name(user), describe(settings))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn mod_info() -> String {
    format!(
        "{} {}: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION")
    )
}
