use statusmod_engine::{parse_position, parse_toggle};

use crate::errors::HostError;

/// One parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HostCommand {
    SetStatus {
        user: String,
        text: String,
        color: Option<String>,
    },
    ClearStatus {
        user: String,
    },
    Brackets {
        user: String,
        enabled: bool,
    },
    Position {
        user: String,
        before_name: bool,
    },
    Words {
        user: String,
        count: i64,
    },
    Show {
        user: String,
    },
    List,
    ModInfo,
    Help,
    Quit,
}

/// Parse a console line. Blank lines yield `None`.
///
/// Player commands start with the player id, e.g.
/// `steve status "hello there friend" blue`. A separate color argument is
/// only recognized after quoted, multi-word text; bare words are joined and
/// split by the player's word count.
pub(crate) fn parse_command_line(
    input: &str,
) -> Result<Option<HostCommand>, HostError> {
    let parts = shell_words::split(input)?;
    let Some((first, rest)) = parts.split_first() else {
        return Ok(None);
    };

    let global = match verb(first).as_str() {
        "modinfo" => Some(HostCommand::ModInfo),
        "list" => Some(HostCommand::List),
        "help" => Some(HostCommand::Help),
        "quit" | "exit" => Some(HostCommand::Quit),
        _ => None,
    };
    if let Some(command) = global {
        return Ok(Some(command));
    }

    let user = first.clone();
    let Some((command, args)) = rest.split_first() else {
        return Err(HostError::MissingArgument("command after the player id"));
    };

    let parsed = match verb(command).as_str() {
        "status" => parse_status_args(user, args)?,
        "settings" => parse_settings_args(user, args)?,
        "show" => HostCommand::Show { user },
        _ => return Err(HostError::UnknownCommand(command.clone())),
    };
    Ok(Some(parsed))
}

fn parse_status_args(
    user: String,
    args: &[String],
) -> Result<HostCommand, HostError> {
    match args {
        [] => Err(HostError::MissingArgument("status text")),
        [only] if only.eq_ignore_ascii_case("clear") => {
            Ok(HostCommand::ClearStatus { user })
        },
        [text] => Ok(HostCommand::SetStatus {
            user,
            text: text.clone(),
            color: None,
        }),
        [text, color] if text.contains(char::is_whitespace) => {
            Ok(HostCommand::SetStatus {
                user,
                text: text.clone(),
                color: Some(color.clone()),
            })
        },
        words => Ok(HostCommand::SetStatus {
            user,
            text: words.join(" "),
            color: None,
        }),
    }
}

fn parse_settings_args(
    user: String,
    args: &[String],
) -> Result<HostCommand, HostError> {
    let Some((setting, values)) = args.split_first() else {
        return Err(HostError::MissingArgument("setting name"));
    };
    let value = values.first();

    match setting.to_ascii_lowercase().as_str() {
        "brackets" => {
            let value = value.ok_or(HostError::MissingArgument("on or off"))?;
            let enabled = parse_toggle(value)
                .ok_or_else(|| HostError::InvalidToggle(value.clone()))?;
            Ok(HostCommand::Brackets { user, enabled })
        },
        "position" => {
            let value =
                value.ok_or(HostError::MissingArgument("before or after"))?;
            let before_name = parse_position(value)
                .ok_or_else(|| HostError::InvalidPosition(value.clone()))?;
            Ok(HostCommand::Position { user, before_name })
        },
        "words" => {
            let value = value.ok_or(HostError::MissingArgument("word count"))?;
            let count = value
                .trim()
                .parse::<i64>()
                .map_err(|_| HostError::InvalidNumber(value.clone()))?;
            Ok(HostCommand::Words { user, count })
        },
        _ => Err(HostError::UnknownCommand(format!("settings {setting}"))),
    }
}

fn verb(word: &str) -> String {
    word.trim_start_matches('/').to_ascii_lowercase()
}
