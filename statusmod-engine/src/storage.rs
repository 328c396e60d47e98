use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::StorageError;
use crate::settings::PlayerSettings;

/// Directory of the settings file, relative to the server working directory.
pub const DEFAULT_CONFIG_DIR: &str = "config/statusmod";
/// File name of the settings file inside the config directory.
pub const PLAYERS_FILE: &str = "players.json";

type Players = BTreeMap<String, PlayerSettings>;

/// Status describing how the settings file was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    /// Records had missing or invalid fields; the corrected file was written.
    Migrated(usize),
    Missing,
    Invalid(String),
}

/// Durable mapping from player id to [`PlayerSettings`].
///
/// Every mutation rewrites the complete file. A single lock covers both the
/// in-memory mapping and file access, so concurrent writers cannot tear the
/// file or lose each other's updates.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    players: Mutex<Players>,
}

impl SettingsStore {
    /// Create an empty store backed by `path` without touching the disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            players: Mutex::new(Players::new()),
        }
    }

    /// Create a store and load `path`.
    ///
    /// Read failures are logged and leave the store empty. When migrated
    /// records cannot be written back they stay loaded in memory.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let store = Self::new(path);
        match store.load() {
            Ok(LoadStatus::Loaded) => {
                log::info!(
                    "loaded {} player setting(s) from {}",
                    store.len(),
                    store.path.display()
                );
            },
            Ok(LoadStatus::Migrated(count)) => {
                log::info!(
                    "migrated {count} player setting(s) in {}",
                    store.path.display()
                );
            },
            Ok(LoadStatus::Missing) => {
                log::info!(
                    "no settings file at {}, starting empty",
                    store.path.display()
                );
            },
            Ok(LoadStatus::Invalid(message)) => {
                log::warn!(
                    "settings file {} invalid, starting empty: {message}",
                    store.path.display()
                );
            },
            Err(StorageError::Read(err)) => {
                log::warn!(
                    "settings file {} unreadable, starting empty: {err}",
                    store.path.display()
                );
            },
            Err(err) => {
                log::warn!(
                    "loaded {} player setting(s) from {} but could not write \
                     back migrated records: {err}",
                    store.len(),
                    store.path.display()
                );
            },
        }
        store
    }

    /// Path of the backing settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory mapping with the file contents.
    ///
    /// A missing or malformed file yields an empty mapping. Migrated records
    /// are written back immediately.
    pub fn load(&self) -> Result<LoadStatus, StorageError> {
        let mut players = self.players();
        let (loaded, status) = match read_players(&self.path) {
            Ok(load) => load,
            Err(err) => {
                players.clear();
                return Err(err);
            },
        };

        *players = loaded;
        if matches!(status, LoadStatus::Migrated(_)) {
            write_players(&self.path, &players)?;
        }

        Ok(status)
    }

    /// Write the complete mapping to disk.
    pub fn save(&self) -> Result<(), StorageError> {
        let players = self.players();
        write_players(&self.path, &players)
    }

    /// Persist on shutdown.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.save()?;
        log::debug!("settings flushed to {}", self.path.display());
        Ok(())
    }

    /// Stored settings for `user_id`, if any.
    pub fn get(&self, user_id: &str) -> Option<PlayerSettings> {
        self.players().get(user_id).cloned()
    }

    /// Return the stored settings, creating and persisting defaults first.
    pub fn get_or_create(
        &self,
        user_id: &str,
    ) -> Result<PlayerSettings, StorageError> {
        let mut players = self.players();
        if let Some(settings) = players.get(user_id) {
            return Ok(settings.clone());
        }

        let settings = PlayerSettings::default();
        players.insert(user_id.to_string(), settings.clone());
        if let Err(err) = write_players(&self.path, &players) {
            players.remove(user_id);
            return Err(err);
        }

        log::debug!("created default settings for {user_id}");
        Ok(settings)
    }

    /// Insert or replace the settings for `user_id` and persist.
    ///
    /// On a failed write the previous value is restored.
    pub fn put(
        &self,
        user_id: &str,
        settings: PlayerSettings,
    ) -> Result<(), StorageError> {
        let mut players = self.players();
        let previous =
            players.insert(user_id.to_string(), settings.normalized());
        if let Err(err) = write_players(&self.path, &players) {
            restore(&mut players, user_id, previous);
            return Err(err);
        }
        Ok(())
    }

    /// Get-or-create, mutate and persist the settings for `user_id` under a
    /// single lock.
    pub fn update<F>(
        &self,
        user_id: &str,
        mutate: F,
    ) -> Result<PlayerSettings, StorageError>
    where
        F: FnOnce(&mut PlayerSettings),
    {
        self.try_update(user_id, |settings| {
            mutate(settings);
            Ok::<(), StorageError>(())
        })
    }

    /// Like [`SettingsStore::update`], but `mutate` may reject the change.
    ///
    /// A rejected change leaves both memory and disk untouched.
    pub fn try_update<F, E>(
        &self,
        user_id: &str,
        mutate: F,
    ) -> Result<PlayerSettings, E>
    where
        F: FnOnce(&mut PlayerSettings) -> Result<(), E>,
        E: From<StorageError>,
    {
        let mut players = self.players();
        let mut settings = players.get(user_id).cloned().unwrap_or_default();
        mutate(&mut settings)?;

        let settings = settings.normalized();
        let previous = players.insert(user_id.to_string(), settings.clone());
        if let Err(err) = write_players(&self.path, &players) {
            restore(&mut players, user_id, previous);
            return Err(err.into());
        }

        Ok(settings)
    }

    /// Number of players with stored settings.
    pub fn len(&self) -> usize {
        self.players().len()
    }

    pub fn is_empty(&self) -> bool {
        self.players().is_empty()
    }

    /// Copy of the complete mapping, ordered by player id.
    pub fn snapshot(&self) -> BTreeMap<String, PlayerSettings> {
        self.players().clone()
    }

    fn players(&self) -> MutexGuard<'_, Players> {
        self.players.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Settings file location inside `config_dir`.
pub fn players_path(config_dir: impl AsRef<Path>) -> PathBuf {
    config_dir.as_ref().join(PLAYERS_FILE)
}

fn restore(
    players: &mut Players,
    user_id: &str,
    previous: Option<PlayerSettings>,
) {
    match previous {
        Some(settings) => {
            players.insert(user_id.to_string(), settings);
        },
        None => {
            players.remove(user_id);
        },
    }
}

fn read_players(path: &Path) -> Result<(Players, LoadStatus), StorageError> {
    let data = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok((Players::new(), LoadStatus::Missing));
        },
        Err(err) => return Err(StorageError::Read(err)),
    };

    let parsed = match serde_json::from_str::<serde_json::Value>(&data) {
        Ok(value) => value,
        Err(err) => {
            return Ok((Players::new(), LoadStatus::Invalid(format!("{err}"))));
        },
    };

    let entries = match parsed {
        serde_json::Value::Object(entries) => entries,
        serde_json::Value::Null => {
            return Ok((Players::new(), LoadStatus::Loaded));
        },
        other => {
            let message = format!("expected an object of players, got {other}");
            return Ok((Players::new(), LoadStatus::Invalid(message)));
        },
    };

    let mut players = Players::new();
    let mut migrated = 0;
    for (user_id, value) in &entries {
        let (settings, changed) = PlayerSettings::from_json(value);
        if changed {
            log::debug!("migrating settings for {user_id}");
            migrated += 1;
        }
        players.insert(user_id.clone(), settings);
    }

    let status = if migrated > 0 {
        LoadStatus::Migrated(migrated)
    } else {
        LoadStatus::Loaded
    };
    Ok((players, status))
}

fn write_players(path: &Path, players: &Players) -> Result<(), StorageError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).map_err(StorageError::Write)?;
        }
    }

    let payload = serde_json::to_string_pretty(players)?;
    write_atomic(path, payload.as_bytes()).map_err(StorageError::Write)?;

    Ok(())
}

fn write_atomic(path: &Path, payload: &[u8]) -> Result<(), std::io::Error> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{LoadStatus, SettingsStore, players_path};
    use crate::error::StorageError;
    use crate::settings::PlayerSettings;

    const PLAYER: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

    #[test]
    fn given_missing_file_when_loading_then_store_is_empty() {
        let root = test_temp_dir("missing");
        let store = SettingsStore::new(players_path(&root));

        let status = store.load().expect("missing file is not an error");

        assert_eq!(status, LoadStatus::Missing);
        assert!(store.is_empty());

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_invalid_json_when_loading_then_falls_back_to_empty() {
        let root = test_temp_dir("invalid_json");
        let path = players_path(&root);
        fs::write(&path, "{ this is not valid json")
            .expect("invalid test payload should be written");
        let store = SettingsStore::new(&path);

        let status = store.load().expect("invalid JSON is not an io error");

        match status {
            LoadStatus::Invalid(message) => assert!(!message.is_empty()),
            other => panic!("expected invalid status, got {other:?}"),
        }
        assert!(store.is_empty());

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_unknown_player_when_get_or_create_then_defaults_persisted() {
        let root = test_temp_dir("get_or_create");
        let path = players_path(&root);
        let store = SettingsStore::new(&path);

        let settings = store.get_or_create(PLAYER).expect("creates defaults");

        assert_eq!(settings, PlayerSettings::default());
        let reopened = SettingsStore::new(&path);
        assert_eq!(reopened.load().expect("loads"), LoadStatus::Loaded);
        assert_eq!(reopened.get(PLAYER), Some(PlayerSettings::default()));

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_nested_missing_dirs_when_saving_then_dirs_created() {
        let root = test_temp_dir("nested");
        let path = players_path(root.join("config").join("statusmod"));
        let store = SettingsStore::new(&path);

        store.save().expect("save creates parent directories");

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_legacy_file_when_loading_then_records_migrated_and_rewritten() {
        let root = test_temp_dir("migration");
        let path = players_path(&root);
        fs::write(
            &path,
            r#"{
                "a": {"brackets": true, "beforeName": false, "status": "afk", "color": "red", "statusWords": 0},
                "b": {"brackets": false, "beforeName": true, "status": "x", "color": "", "statusWords": -5},
                "c": {"brackets": false, "beforeName": false, "status": "ok", "color": "blue", "statusWords": 2}
            }"#,
        )
        .expect("legacy payload should be written");
        let store = SettingsStore::new(&path);

        let status = store.load().expect("legacy file loads");

        assert_eq!(status, LoadStatus::Migrated(2));
        let a = store.get("a").expect("a exists");
        assert_eq!(a.status_words(), 1);
        assert_eq!(a.status(), "afk");
        let b = store.get("b").expect("b exists");
        assert_eq!(b.status_words(), 1);
        assert_eq!(b.color(), "reset");
        assert_eq!(store.get("c").expect("c exists").status_words(), 2);

        let first = store.snapshot();
        let again = SettingsStore::new(&path);
        assert_eq!(again.load().expect("reloads"), LoadStatus::Loaded);
        assert_eq!(again.snapshot(), first);

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_failed_write_when_putting_then_memory_is_rolled_back() {
        let root = test_temp_dir("rollback");
        let blocker = root.join("blocker");
        fs::write(&blocker, "not a directory")
            .expect("blocking file should be written");
        let store = SettingsStore::new(players_path(blocker.join("nested")));
        let mut settings = PlayerSettings::default();
        settings.set_brackets(true);

        let result = store.put(PLAYER, settings);

        assert!(matches!(result, Err(StorageError::Write(_))));
        assert_eq!(store.get(PLAYER), None);

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_rejected_change_when_try_update_then_nothing_stored() {
        let root = test_temp_dir("try_update");
        let path = players_path(&root);
        let store = SettingsStore::new(&path);

        let result = store.try_update(PLAYER, |settings| {
            settings.set_brackets(true);
            Err::<(), StorageError>(StorageError::Read(std::io::Error::other(
                "rejected",
            )))
        });

        assert!(result.is_err());
        assert_eq!(store.get(PLAYER), None);
        assert!(!path.exists());

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_unreadable_file_when_opening_then_store_starts_empty() {
        let root = test_temp_dir("unreadable");
        let path = players_path(&root);
        fs::create_dir_all(&path)
            .expect("directory in place of the file should be created");

        let opened = SettingsStore::open(&path);
        let result = SettingsStore::new(&path).load();

        assert!(opened.is_empty());
        assert!(matches!(result, Err(StorageError::Read(_))));

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_failed_migration_write_when_loading_then_records_kept() {
        let root = test_temp_dir("migration_write");
        let path = players_path(&root);
        fs::write(
            &path,
            r#"{"a": {"status": "afk", "color": "red", "statusWords": 0}}"#,
        )
        .expect("legacy payload should be written");
        fs::create_dir_all(path.with_extension("json.tmp"))
            .expect("directory blocking the temp file should be created");

        let store = SettingsStore::new(&path);
        let result = store.load();
        let opened = SettingsStore::open(&path);

        assert!(matches!(result, Err(StorageError::Write(_))));
        assert_eq!(store.get("a").expect("a kept").status(), "afk");
        assert_eq!(opened.len(), 1);
        assert_eq!(opened.get("a").expect("a kept").status_words(), 1);

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    fn test_temp_dir(test_name: &str) -> std::path::PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "statusmod-storage-{test_name}-{stamp}-{}",
            std::process::id()
        ));

        fs::create_dir_all(&dir)
            .expect("temporary directory should be created");
        dir
    }
}
