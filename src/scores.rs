use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const HIGH_SCORE_FILE: &str = "high_score.json";

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct HighScore {
    pub best: u32,
    pub achieved_at: Option<DateTime<Local>>,
}

/// Owns the persisted best score. The simulation never sees this; the driver
/// compares against it on every Ate and GameOver.
pub struct ScoreStore {
    path: PathBuf,
    high: HighScore,
}

impl ScoreStore {
    /// A missing or unreadable file just means no high score yet.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let high = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => HighScore::default(),
        };
        Self { path, high }
    }

    pub fn best(&self) -> u32 {
        self.high.best
    }

    /// Records `score` if it beats the stored best, persisting immediately.
    /// Returns whether a new high score was set. A failed write keeps the
    /// new value in memory and reports on stderr; the run goes on.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.high.best {
            return false;
        }
        self.high = HighScore {
            best: score,
            achieved_at: Some(Local::now()),
        };
        self.save()
            .unwrap_or_else(|e| eprintln!("Failed to save high score: {}", e));
        true
    }

    fn save(&self) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.high)?;
        fs::write(&self.path, json)
    }
}
