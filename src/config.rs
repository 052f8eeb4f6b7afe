use std::path::PathBuf;

use tracing::warn;

use crate::pace::PaceConfig;
use crate::ranking::{PlayerRankKey, RankSpec, TeamRankKey};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_TEAM_STATS_FILE: &str = "team_stats.json";
pub const DEFAULT_TEAM_OUTPUT_FILE: &str = "team_advanced.json";
pub const DEFAULT_PLAYER_STATS_FILE: &str = "player_stats_raw.json";
pub const DEFAULT_PLAYER_OUTPUT_FILE: &str = "player_advanced.json";

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub team_stats_file: String,
    pub team_output_file: String,
    pub player_stats_file: String,
    pub player_output_file: String,
    pub pace: PaceConfig,
    pub team_rank: RankSpec<TeamRankKey>,
    pub player_rank: RankSpec<PlayerRankKey>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            team_stats_file: DEFAULT_TEAM_STATS_FILE.to_string(),
            team_output_file: DEFAULT_TEAM_OUTPUT_FILE.to_string(),
            player_stats_file: DEFAULT_PLAYER_STATS_FILE.to_string(),
            player_output_file: DEFAULT_PLAYER_OUTPUT_FILE.to_string(),
            pace: PaceConfig::default(),
            team_rank: RankSpec::default(),
            player_rank: RankSpec::default(),
        }
    }
}

impl PipelineConfig {
    /// Defaults overridden by `TPBL_*` process environment variables.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (environment, tests).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(dir) = get("TPBL_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(name) = get("TPBL_TEAM_STATS_FILE") {
            self.team_stats_file = name;
        }
        if let Some(name) = get("TPBL_TEAM_OUTPUT_FILE") {
            self.team_output_file = name;
        }
        if let Some(name) = get("TPBL_PLAYER_STATS_FILE") {
            self.player_stats_file = name;
        }
        if let Some(name) = get("TPBL_PLAYER_OUTPUT_FILE") {
            self.player_output_file = name;
        }
        if let Some(raw) = get("TPBL_TARGET_PACE") {
            self.set_target_pace(&raw);
        }
        if let Some(raw) = get("TPBL_TEAM_SORT") {
            self.set_team_sort(&raw);
        }
        if let Some(raw) = get("TPBL_PLAYER_SORT") {
            self.set_player_sort(&raw);
        }
        self
    }

    pub fn set_target_pace(&mut self, raw: &str) {
        match raw.trim().parse::<f64>() {
            Ok(v) => self.pace = PaceConfig::with_target(v),
            Err(_) => warn!(raw, "ignoring unparseable target pace"),
        }
    }

    pub fn set_team_sort(&mut self, raw: &str) {
        match raw.parse::<TeamRankKey>() {
            Ok(key) => {
                self.team_rank.key = key;
                self.team_rank.descending = key.higher_is_better();
            }
            Err(err) => warn!(%err, "keeping default team sort"),
        }
    }

    pub fn set_player_sort(&mut self, raw: &str) {
        match raw.parse::<PlayerRankKey>() {
            Ok(key) => {
                self.player_rank.key = key;
                self.player_rank.descending = key.higher_is_better();
            }
            Err(err) => warn!(%err, "keeping default player sort"),
        }
    }

    pub fn team_input_path(&self) -> PathBuf {
        self.data_dir.join(&self.team_stats_file)
    }

    pub fn team_output_path(&self) -> PathBuf {
        self.data_dir.join(&self.team_output_file)
    }

    pub fn player_input_path(&self) -> PathBuf {
        self.data_dir.join(&self.player_stats_file)
    }

    pub fn player_output_path(&self) -> PathBuf {
        self.data_dir.join(&self.player_output_file)
    }
}
