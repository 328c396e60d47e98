mod command;
mod config;
mod dispatch;
mod errors;
mod scoreboard;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use env_logger::Env;
use statusmod_engine::SettingsStore;

use crate::command::parse_command_line;
use crate::config::HostConfig;
use crate::dispatch::{Reply, execute};
use crate::scoreboard::Scoreboard;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = HostConfig::from_env();
    let store = SettingsStore::open(config.players_path());
    let mut scoreboard = Scoreboard::default();
    log::info!(
        "statusmod ready with settings at {}, type `help` for commands",
        store.path().display()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::warn!("console read failed: {err}");
                break;
            },
        };

        let reply = parse_command_line(&line).and_then(|command| {
            command
                .map(|command| execute(&store, &mut scoreboard, command))
                .transpose()
        });
        let output = match reply {
            Ok(Some(Reply::Quit)) => break,
            Ok(Some(Reply::Message(message))) => message,
            Ok(None) => continue,
            Err(err) => format!("Error: {err}"),
        };

        if writeln!(stdout, "{output}").is_err() {
            break;
        }
    }

    match store.flush() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("settings could not be saved on shutdown: {err}");
            ExitCode::FAILURE
        },
    }
}
