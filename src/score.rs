use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::SCORE_HISTORY_LEN;

const APP_DIR_NAME: &str = "timed-snake";
const SCORE_FILE_NAME: &str = "scores.json";

const HIGH_SCORE_KEY: &str = "highScore";
const HISTORY_KEY: &str = "lastScores";

/// One finished session in the score history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub value: i32,
}

/// Failure writing the score store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("score store encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence collaborator for high score and score history.
///
/// Reads never fail: absent or unreadable data reads as zero or empty.
pub trait ScoreStore {
    fn high_score(&self) -> i32;
    fn set_high_score(&mut self, score: i32) -> Result<(), StoreError>;
    fn score_history(&self) -> Vec<ScoreEntry>;
    fn set_score_history(&mut self, history: &[ScoreEntry]) -> Result<(), StoreError>;
}

/// Inserts `entry` into `history`, keeping the best [`SCORE_HISTORY_LEN`]
/// entries ordered by descending value. Ties keep arrival order.
pub fn record_score(history: &mut Vec<ScoreEntry>, entry: ScoreEntry) {
    history.push(entry);
    history.sort_by(|a, b| b.value.cmp(&a.value));
    history.truncate(SCORE_HISTORY_LEN);
}

/// Formats a score as a zero-padded three digit number.
#[must_use]
pub fn format_score(score: i32) -> String {
    format!("{score:03}")
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Volatile store used for tests and `--ephemeral` runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub high_score: i32,
    pub history: Vec<ScoreEntry>,
}

impl ScoreStore for MemoryScoreStore {
    fn high_score(&self) -> i32 {
        self.high_score
    }

    fn set_high_score(&mut self, score: i32) -> Result<(), StoreError> {
        self.high_score = score;
        Ok(())
    }

    fn score_history(&self) -> Vec<ScoreEntry> {
        self.history.clone()
    }

    fn set_score_history(&mut self, history: &[ScoreEntry]) -> Result<(), StoreError> {
        self.history = history.to_vec();
        Ok(())
    }
}

/// Key-value JSON file holding `highScore` and `lastScores`.
///
/// Every key is decoded on its own, so a corrupt history does not cost the
/// high score and vice versa.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl FileScoreStore {
    /// Opens the store at the default location.
    #[must_use]
    pub fn open_default() -> Self {
        Self::open(scores_path())
    }

    /// Opens the store at `path`, treating a missing or unreadable file as empty.
    #[must_use]
    pub fn open(path: PathBuf) -> Self {
        let entries = match load_entries(&path) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "ignoring unreadable score file");
                Map::new()
            }
        };

        Self { path, entries }
    }

    /// File backing this store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn put(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value);
        save_entries(&self.path, &self.entries)
    }
}

impl ScoreStore for FileScoreStore {
    fn high_score(&self) -> i32 {
        decode_key(&self.entries, HIGH_SCORE_KEY)
    }

    fn set_high_score(&mut self, score: i32) -> Result<(), StoreError> {
        self.put(HIGH_SCORE_KEY, Value::from(score))
    }

    fn score_history(&self) -> Vec<ScoreEntry> {
        decode_key(&self.entries, HISTORY_KEY)
    }

    fn set_score_history(&mut self, history: &[ScoreEntry]) -> Result<(), StoreError> {
        let value = serde_json::to_value(history)?;
        self.put(HISTORY_KEY, value)
    }
}

fn decode_key<T>(entries: &Map<String, Value>, key: &str) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    let Some(raw) = entries.get(key) else {
        return T::default();
    };

    match T::deserialize(raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(key, %error, "ignoring malformed score entry");
            T::default()
        }
    }
}

fn load_entries(path: &Path) -> Result<Map<String, Value>, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(e) => return Err(e.into()),
    };

    Ok(serde_json::from_str(&raw)?)
}

fn save_entries(path: &Path, entries: &Map<String, Value>) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(entries)?;
    fs::write(path, json)?;
    Ok(())
}
