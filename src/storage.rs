//! Flat-file JSON persistence.
//!
//! The contest lives in three records under one data directory:
//! `config.json`, `players.json`, `games.json`. Each save rewrites the
//! whole record through a temp file in the same directory so a crash
//! mid-write never leaves a half-written file behind.

use crate::contest::{ContestConfig, GameSchedule, Player};
use crate::errors::{PoolResult, StorageError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CONFIG_FILE: &str = "config.json";
const PLAYERS_FILE: &str = "players.json";
const GAMES_FILE: &str = "games.json";

/// Handle to the contest's data directory
#[derive(Debug, Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    /// Open (and create if needed) a data directory.
    ///
    /// A fresh directory is seeded with a bootstrap contest config so
    /// the admin endpoints work immediately; an existing `config.json`
    /// is left alone.
    pub fn open(data_dir: impl Into<PathBuf>, bootstrap_admin_token: &str) -> PoolResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;

        let store = Self { data_dir };
        if !store.path(CONFIG_FILE).exists() {
            info!(dir = %store.data_dir.display(), "seeding fresh contest data directory");
            store.save_config(&ContestConfig::bootstrap(bootstrap_admin_token.to_string()))?;
        }
        Ok(store)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn load_config(&self) -> PoolResult<ContestConfig> {
        match self.read_json(CONFIG_FILE)? {
            Some(config) => Ok(config),
            None => Err(StorageError::ReadFailed(format!(
                "{} missing from {}",
                CONFIG_FILE,
                self.data_dir.display()
            ))
            .into()),
        }
    }

    pub fn save_config(&self, config: &ContestConfig) -> PoolResult<()> {
        self.write_json(CONFIG_FILE, config)
    }

    /// Missing player file means a contest with no entrants yet.
    pub fn load_players(&self) -> PoolResult<Vec<Player>> {
        Ok(self.read_json(PLAYERS_FILE)?.unwrap_or_default())
    }

    pub fn save_players(&self, players: &[Player]) -> PoolResult<()> {
        self.write_json(PLAYERS_FILE, &players)
    }

    /// Missing game file means no slates have been entered yet.
    pub fn load_games(&self) -> PoolResult<GameSchedule> {
        Ok(self.read_json(GAMES_FILE)?.unwrap_or_default())
    }

    pub fn save_games(&self, games: &GameSchedule) -> PoolResult<()> {
        self.write_json(GAMES_FILE, games)
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    fn read_json<T: DeserializeOwned>(&self, file: &str) -> PoolResult<Option<T>> {
        let path = self.path(file);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            StorageError::CorruptedData(format!("Failed to decode {}: {}", path.display(), e))
        })?;
        Ok(Some(value))
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> PoolResult<()> {
        let path = self.path(file);
        let json = serde_json::to_string_pretty(value).map_err(|e| {
            StorageError::WriteFailed(format!("Failed to encode {}: {}", file, e))
        })?;

        // Write to a sibling temp file, then atomically replace the target.
        let tmp = tempfile::NamedTempFile::new_in(&self.data_dir).map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create temp file for {}: {}", file, e))
        })?;
        fs::write(tmp.path(), json.as_bytes()).map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write {}: {}", file, e))
        })?;
        tmp.persist(&path).map_err(|e| {
            StorageError::WriteFailed(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        debug!(file, "record saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::{Game, PlayerStatus};
    use crate::errors::PoolError;

    fn open_temp_store() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path(), "secret").unwrap();
        (dir, store)
    }

    #[test]
    fn test_fresh_directory_is_seeded() {
        let (_dir, store) = open_temp_store();

        let config = store.load_config().unwrap();
        assert_eq!(config.admin_token, "secret");
        assert!(config.teams.is_empty());
        assert_eq!(config.current_day, None);

        assert!(store.load_players().unwrap().is_empty());
        assert!(store.load_games().unwrap().is_empty());
    }

    #[test]
    fn test_reopen_keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path(), "first").unwrap();
        let mut config = store.load_config().unwrap();
        config.teams.push("duke".to_string());
        store.save_config(&config).unwrap();

        let reopened = JsonStore::open(dir.path(), "second").unwrap();
        let config = reopened.load_config().unwrap();
        assert_eq!(config.admin_token, "first");
        assert_eq!(config.teams, vec!["duke"]);
    }

    #[test]
    fn test_players_round_trip() {
        let (_dir, store) = open_temp_store();

        let mut player = Player::new(1, "Dana".to_string());
        player.status = PlayerStatus::Eliminated;
        player.picks.insert("round1-thursday".to_string(), vec!["duke".to_string()]);
        store.save_players(&[player.clone()]).unwrap();

        let loaded = store.load_players().unwrap();
        assert_eq!(loaded, vec![player]);
    }

    #[test]
    fn test_games_round_trip() {
        let (_dir, store) = open_temp_store();

        let mut games = GameSchedule::new();
        games.insert(
            "round1-thursday".to_string(),
            vec![Game {
                id: 1,
                home: "duke".to_string(),
                away: "vermont".to_string(),
                home_score: None,
                away_score: None,
                is_final: false,
                winner: None,
            }],
        );
        store.save_games(&games).unwrap();

        assert_eq!(store.load_games().unwrap(), games);
    }

    #[test]
    fn test_corrupted_record_surfaces_storage_error() {
        let (dir, store) = open_temp_store();
        fs::write(dir.path().join("players.json"), b"{not json").unwrap();

        match store.load_players() {
            Err(PoolError::Storage(StorageError::CorruptedData(msg))) => {
                assert!(msg.contains("players.json"));
            }
            other => panic!("Expected corrupted data error, got {:?}", other),
        }
    }
}
