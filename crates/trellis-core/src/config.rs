//! Persistent configuration for trellis.
//!
//! Stores tuning knobs in `~/.trellis/config.json`. Every field has a
//! default, so a partial file (or none at all) is fine.
//!
//! # Example
//!
//! ```no_run
//! use trellis_core::config::TrellisConfig;
//!
//! // Load (returns defaults if file doesn't exist)
//! let config = TrellisConfig::load();
//! println!("Waiting up to {}ms per step", config.timeout_ms);
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const CONFIG_FILENAME: &str = "config.json";

/// Returns the trellis data directory (`~/.trellis`).
pub fn trellis_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".trellis")
}

/// Interaction tuning shared by every view of a test context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrellisConfig {
    /// How long a step waits for its element or assertion.
    pub timeout_ms: u64,
    /// Delay between two hierarchy snapshots while waiting.
    pub poll_interval_ms: u64,
    /// Hold time for long clicks, in seconds.
    pub long_press_secs: f64,
    /// Duration of swipe gestures, in seconds.
    pub swipe_duration_secs: f64,
    /// Upper bound on swipes for any scroll operation.
    pub max_scroll_attempts: u32,
    /// Attach a screenshot to failed journal entries.
    pub screenshot_on_failure: bool,
}

impl Default for TrellisConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            poll_interval_ms: 100,
            long_press_secs: 1.0,
            swipe_duration_secs: 0.3,
            max_scroll_attempts: 10,
            screenshot_on_failure: false,
        }
    }
}

impl TrellisConfig {
    /// Load config from `~/.trellis/config.json`.
    ///
    /// Returns [`Default`] if the file does not exist or cannot be parsed.
    pub fn load() -> Self {
        let path = trellis_dir().join(CONFIG_FILENAME);
        std::fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to `~/.trellis/config.json`.
    pub fn save(&self) -> std::io::Result<()> {
        let dir = trellis_dir();
        std::fs::create_dir_all(&dir)?;
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(dir.join(CONFIG_FILENAME), json)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_poll_interval_ms(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    pub fn with_max_scroll_attempts(mut self, attempts: u32) -> Self {
        self.max_scroll_attempts = attempts;
        self
    }

    pub fn with_screenshot_on_failure(mut self, enabled: bool) -> Self {
        self.screenshot_on_failure = enabled;
        self
    }
}
