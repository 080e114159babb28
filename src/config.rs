//! Player configuration for the interactive game.
//!
//! Settings come from a TOML file, then `PERFECT_PLAY_*` environment
//! variables, then command-line flags, each layer overriding the last.

use derive_getters::Getters;
use derive_more::{Display, Error};
use perfect_tictactoe::{Engine, Player, Pruning, SearchConfig, Seats};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "perfect_play.toml";

/// Environment variable overriding [`PlayConfig::human`].
pub const ENV_HUMAN: &str = "PERFECT_PLAY_HUMAN";
/// Environment variable overriding [`PlayConfig::first`].
pub const ENV_FIRST: &str = "PERFECT_PLAY_FIRST";
/// Environment variable overriding [`PlayConfig::pruning`].
pub const ENV_PRUNING: &str = "PERFECT_PLAY_PRUNING";

/// Configuration for an interactive game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    /// Side the person plays.
    #[serde(deserialize_with = "player_from_str")]
    human: Player,

    /// Side that opens every round.
    #[serde(deserialize_with = "player_from_str")]
    first: Player,

    /// Side whose wins the engine scores positive.
    #[serde(deserialize_with = "player_from_str")]
    maximizer: Player,

    /// Engine tree pruning.
    pruning: Pruning,

    /// Score root candidates on the rayon pool.
    parallel: bool,

    /// Pause before the engine's move appears, in milliseconds.
    engine_delay_ms: u64,

    /// File the terminal UI logs to.
    log_file: PathBuf,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            human: Player::X,
            first: Player::X,
            maximizer: Player::X,
            pruning: Pruning::None,
            parallel: false,
            engine_delay_ms: 300,
            log_file: PathBuf::from("perfect_play.log"),
        }
    }
}

fn player_from_str<'de, D>(deserializer: D) -> Result<Player, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Player::from_str(&raw).map_err(serde::de::Error::custom)
}

impl PlayConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(human = %config.human, first = %config.first, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise starts from defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies `PERFECT_PLAY_*` overrides from the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`, keyed by variable name.
    #[instrument(skip_all)]
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = lookup(ENV_HUMAN) {
            self.human = parse_var(ENV_HUMAN, &raw)?;
            debug!(human = %self.human, "Human side from environment");
        }
        if let Some(raw) = lookup(ENV_FIRST) {
            self.first = parse_var(ENV_FIRST, &raw)?;
            debug!(first = %self.first, "Opening side from environment");
        }
        if let Some(raw) = lookup(ENV_PRUNING) {
            self.pruning = parse_var(ENV_PRUNING, &raw)?;
            debug!(pruning = %self.pruning, "Pruning from environment");
        }
        Ok(self)
    }

    /// Sets the human side.
    pub fn with_human(mut self, human: Player) -> Self {
        self.human = human;
        self
    }

    /// Lets the engine open every round.
    pub fn with_engine_first(mut self) -> Self {
        self.first = self.human.opponent();
        self
    }

    /// Sets the pruning strategy.
    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }

    /// Seat assignment for rounds.
    pub fn seats(&self) -> Seats {
        Seats::new(self.human, self.first)
    }

    /// Engine built from these settings.
    pub fn engine(&self) -> Engine {
        Engine::new(SearchConfig::new(self.maximizer, self.pruning, self.parallel))
    }

    /// Engine pause as a duration.
    pub fn engine_delay(&self) -> Duration {
        Duration::from_millis(self.engine_delay_ms)
    }
}

#[track_caller]
fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::new(format!("Invalid value {:?} for {}", raw, key)))
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
