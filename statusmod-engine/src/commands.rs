//! Entry points a host command framework binds to.
//!
//! Each handler reads and writes the player's record through the injected
//! [`SettingsStore`] and hands the resulting view to the [`Presenter`].
//! Nothing is presented when the change was rejected or not saved.

use crate::error::{CommandError, Result};
use crate::parser::parse_status;
use crate::presentation::{Presenter, StatusView};
use crate::settings::PlayerSettings;
use crate::storage::SettingsStore;

const TRUE_WORDS: [&str; 4] = ["on", "true", "ein", "an"];
const FALSE_WORDS: [&str; 3] = ["off", "false", "aus"];
const BEFORE_WORDS: [&str; 3] = ["before", "vor", "vorn"];
const AFTER_WORDS: [&str; 3] = ["after", "hinter", "nach"];

/// Words accepted for the brackets toggle, in suggestion order.
pub const TOGGLE_SUGGESTIONS: [&str; 7] =
    ["on", "off", "true", "false", "ein", "an", "aus"];
/// Words accepted for the status position, in suggestion order.
pub const POSITION_SUGGESTIONS: [&str; 4] = ["before", "vor", "vorn", "after"];

/// Set the status from a status command.
///
/// The player's stored word count decides how `raw_status` is split.
pub fn set_status<P: Presenter>(
    store: &SettingsStore,
    presenter: &mut P,
    user_id: &str,
    raw_status: &str,
    explicit_color: Option<&str>,
) -> Result<StatusView> {
    let settings = store.try_update(user_id, |settings| {
        let parsed =
            parse_status(raw_status, explicit_color, settings.status_words())?;
        settings.set_status(parsed.status, parsed.color);
        Ok::<(), CommandError>(())
    })?;

    log::info!(
        "status of {user_id} set to {:?} ({})",
        settings.status(),
        settings.color()
    );
    Ok(render(presenter, user_id, &settings))
}

/// Remove the status text and color, keeping layout preferences.
pub fn clear_status<P: Presenter>(
    store: &SettingsStore,
    presenter: &mut P,
    user_id: &str,
) -> Result<StatusView> {
    let settings = store.update(user_id, PlayerSettings::clear_status)?;

    log::info!("status of {user_id} cleared");
    Ok(render(presenter, user_id, &settings))
}

pub fn set_brackets<P: Presenter>(
    store: &SettingsStore,
    presenter: &mut P,
    user_id: &str,
    brackets: bool,
) -> Result<PlayerSettings> {
    let settings =
        store.update(user_id, |settings| settings.set_brackets(brackets))?;

    render(presenter, user_id, &settings);
    Ok(settings)
}

pub fn set_position<P: Presenter>(
    store: &SettingsStore,
    presenter: &mut P,
    user_id: &str,
    before_name: bool,
) -> Result<PlayerSettings> {
    let settings = store
        .update(user_id, |settings| settings.set_before_name(before_name))?;

    render(presenter, user_id, &settings);
    Ok(settings)
}

/// Set how many words form the status phrase. Values below one become one.
pub fn set_word_count<P: Presenter>(
    store: &SettingsStore,
    presenter: &mut P,
    user_id: &str,
    words: i64,
) -> Result<PlayerSettings> {
    let settings =
        store.update(user_id, |settings| settings.set_status_words(words))?;

    render(presenter, user_id, &settings);
    Ok(settings)
}

/// Interpret an on/off argument, English or German.
pub fn parse_toggle(value: &str) -> Option<bool> {
    if matches_any(value, &TRUE_WORDS) {
        Some(true)
    } else if matches_any(value, &FALSE_WORDS) {
        Some(false)
    } else {
        None
    }
}

/// Interpret a position argument; `true` means before the name.
pub fn parse_position(value: &str) -> Option<bool> {
    if matches_any(value, &BEFORE_WORDS) {
        Some(true)
    } else if matches_any(value, &AFTER_WORDS) {
        Some(false)
    } else {
        None
    }
}

fn matches_any(value: &str, words: &[&str]) -> bool {
    let value = value.trim();
    words.iter().any(|word| value.eq_ignore_ascii_case(word))
}

fn render<P: Presenter>(
    presenter: &mut P,
    user_id: &str,
    settings: &PlayerSettings,
) -> StatusView {
    let view = settings.view();
    presenter.present(user_id, &view);
    view
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{
        POSITION_SUGGESTIONS, TOGGLE_SUGGESTIONS, clear_status, parse_position,
        parse_toggle, set_brackets, set_position, set_status, set_word_count,
    };
    use crate::color::ColorId;
    use crate::error::{CommandError, ValidationError};
    use crate::presentation::{Presenter, StatusView};
    use crate::storage::{SettingsStore, players_path};

    const PLAYER: &str = "player-1";

    #[derive(Default)]
    struct RecordingPresenter {
        presented: Vec<(String, StatusView)>,
    }

    impl Presenter for RecordingPresenter {
        fn present(&mut self, user_id: &str, view: &StatusView) {
            self.presented.push((user_id.to_string(), view.clone()));
        }
    }

    fn fixture(test_name: &str) -> (PathBuf, SettingsStore) {
        let root = test_temp_dir(test_name);
        let store = SettingsStore::new(players_path(&root));
        (root, store)
    }

    #[test]
    fn given_word_count_two_when_explicit_color_then_raw_status_stored() {
        let (root, store) = fixture("explicit_color");
        let mut presenter = RecordingPresenter::default();
        set_word_count(&store, &mut presenter, PLAYER, 2)
            .expect("word count stored");

        let view = set_status(
            &store,
            &mut presenter,
            PLAYER,
            "hello there friend",
            Some("blue"),
        )
        .expect("status accepted");

        let stored = store.get(PLAYER).expect("record exists");
        assert_eq!(stored.status(), "hello there friend");
        assert_eq!(stored.color(), "blue");
        assert_eq!(view.color, ColorId::Blue);

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_word_count_two_when_trailing_color_word_then_split() {
        let (root, store) = fixture("trailing_color");
        let mut presenter = RecordingPresenter::default();
        set_word_count(&store, &mut presenter, PLAYER, 2)
            .expect("word count stored");

        set_status(&store, &mut presenter, PLAYER, "hello there red", None)
            .expect("status accepted");

        let stored = store.get(PLAYER).expect("record exists");
        assert_eq!(stored.status(), "hello there");
        assert_eq!(stored.color(), "red");

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_too_few_words_when_setting_status_then_record_unchanged() {
        let (root, store) = fixture("too_few_words");
        let mut presenter = RecordingPresenter::default();
        set_word_count(&store, &mut presenter, PLAYER, 2)
            .expect("word count stored");
        let before = store.get(PLAYER).expect("record exists");
        let presented_before = presenter.presented.len();

        let result = set_status(&store, &mut presenter, PLAYER, "hi", None);

        assert!(matches!(
            result,
            Err(CommandError::Validation(
                ValidationError::InsufficientWords { required: 2 }
            ))
        ));
        assert_eq!(store.get(PLAYER), Some(before));
        assert_eq!(presenter.presented.len(), presented_before);

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_empty_explicit_color_when_setting_status_then_stored_as_reset() {
        let (root, store) = fixture("empty_color");
        let mut presenter = RecordingPresenter::default();

        let view = set_status(&store, &mut presenter, PLAYER, "a b", Some(""))
            .expect("status accepted");

        let stored = store.get(PLAYER).expect("record exists");
        assert_eq!(stored.status(), "a b");
        assert_eq!(stored.color(), "reset");
        assert_eq!(view.color, ColorId::Reset);

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_status_when_cleared_then_status_and_color_reset() {
        let (root, store) = fixture("clear");
        let mut presenter = RecordingPresenter::default();
        set_status(&store, &mut presenter, PLAYER, "hello red", None)
            .expect("status accepted");
        set_brackets(&store, &mut presenter, PLAYER, true)
            .expect("brackets stored");

        let view =
            clear_status(&store, &mut presenter, PLAYER).expect("cleared");

        let stored = store.get(PLAYER).expect("record exists");
        assert_eq!(stored.status(), "");
        assert_eq!(stored.color(), "reset");
        assert!(stored.brackets());
        assert!(!view.has_status());

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_layout_changes_when_applied_then_each_one_is_presented() {
        let (root, store) = fixture("layout");
        let mut presenter = RecordingPresenter::default();

        set_brackets(&store, &mut presenter, PLAYER, true)
            .expect("brackets stored");
        set_position(&store, &mut presenter, PLAYER, true)
            .expect("position stored");
        let settings = set_word_count(&store, &mut presenter, PLAYER, -3)
            .expect("word count stored");

        assert_eq!(settings.status_words(), 1);
        assert!(settings.brackets());
        assert!(settings.before_name());
        assert_eq!(presenter.presented.len(), 3);
        let (user_id, last) =
            presenter.presented.last().expect("presented at least once");
        assert_eq!(user_id, PLAYER);
        assert!(last.brackets && last.before_name);

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_toggle_words_when_parsed_then_english_and_german_accepted() {
        assert_eq!(parse_toggle("ON"), Some(true));
        assert_eq!(parse_toggle("ein"), Some(true));
        assert_eq!(parse_toggle("an"), Some(true));
        assert_eq!(parse_toggle("aus"), Some(false));
        assert_eq!(parse_toggle("false"), Some(false));
        assert_eq!(parse_toggle("maybe"), None);
        for word in TOGGLE_SUGGESTIONS {
            assert!(parse_toggle(word).is_some(), "suggestion {word:?}");
        }
    }

    #[test]
    fn given_position_words_when_parsed_then_before_and_after_detected() {
        assert_eq!(parse_position("vorn"), Some(true));
        assert_eq!(parse_position("Before"), Some(true));
        assert_eq!(parse_position("after"), Some(false));
        assert_eq!(parse_position("hinter"), Some(false));
        assert_eq!(parse_position("sideways"), None);
        for word in POSITION_SUGGESTIONS {
            assert!(parse_position(word).is_some(), "suggestion {word:?}");
        }
    }

    fn test_temp_dir(test_name: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "statusmod-commands-{test_name}-{stamp}-{}",
            std::process::id()
        ));

        fs::create_dir_all(&dir)
            .expect("temporary directory should be created");
        dir
    }
}
