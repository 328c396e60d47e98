//! Settings engine behind player status labels.
//!
//! A status is a short colored label shown before or after a player's
//! display name. This crate owns everything about it except the rendering
//! itself:
//! - [`parse_status`] splits a status command into status text and a color
//!   key, driven by the player's configured word count,
//! - [`color::resolve`] maps English or German color names onto [`ColorId`],
//! - [`SettingsStore`] keeps one [`PlayerSettings`] per player in a JSON file,
//!   migrating records written by older versions on load.
//!
//! Hosts bind their command framework to the functions in [`commands`] and
//! implement [`Presenter`] to turn a [`StatusView`] into team prefixes or
//! suffixes.

pub mod color;
pub mod commands;
mod error;
mod parser;
mod presentation;
mod settings;
mod storage;

pub use color::{ColorId, RESET_KEY};
pub use commands::{
    clear_status, parse_position, parse_toggle, set_brackets, set_position,
    set_status, set_word_count,
};
pub use error::{CommandError, Result, StorageError, ValidationError};
pub use parser::{ParsedStatus, parse_status};
pub use presentation::{
    Decoration, NoopPresenter, Presenter, StatusView, team_name,
};
pub use settings::{PlayerSettings, clamp_status_words};
pub use storage::{
    DEFAULT_CONFIG_DIR, LoadStatus, PLAYERS_FILE, SettingsStore,
    players_path,
};
