use tracing::info;

use crate::config::PipelineConfig;
use crate::dataset::{self, DatasetError};
use crate::pace::PaceConfig;
use crate::player_metrics::{PlayerAdvancedMetrics, build_player_advanced};
use crate::ranking::{PlayerRankKey, RankSpec, TeamRankKey, rank_players, rank_teams};
use crate::records::{RawGameTeamRecord, RawPlayerSeasonRecord};
use crate::team_metrics::{TeamReport, build_team_advanced};

/// Team pipeline, in memory: aggregate, calibrate, derive, rank.
pub fn run_team_pipeline(
    records: &[RawGameTeamRecord],
    pace: PaceConfig,
    rank: RankSpec<TeamRankKey>,
) -> TeamReport {
    let mut report = build_team_advanced(records, pace);
    rank_teams(&mut report.teams, rank);
    report
}

/// Player pipeline, in memory: team usage totals, per-player metrics, rank.
pub fn run_player_pipeline(
    records: &[RawPlayerSeasonRecord],
    rank: RankSpec<PlayerRankKey>,
) -> Vec<PlayerAdvancedMetrics> {
    let mut players = build_player_advanced(records);
    rank_players(&mut players, rank);
    players
}

pub fn run_team_files(cfg: &PipelineConfig) -> Result<TeamReport, DatasetError> {
    let records = dataset::load_team_records(&cfg.team_input_path())?;
    let report = run_team_pipeline(&records, cfg.pace, cfg.team_rank);
    dataset::write_ranked_json(&cfg.team_output_path(), &report.teams)?;
    info!(teams = report.teams.len(), "team pipeline finished");
    Ok(report)
}

pub fn run_player_files(cfg: &PipelineConfig) -> Result<Vec<PlayerAdvancedMetrics>, DatasetError> {
    let records = dataset::load_player_records(&cfg.player_input_path())?;
    let players = run_player_pipeline(&records, cfg.player_rank);
    dataset::write_ranked_json(&cfg.player_output_path(), &players)?;
    info!(players = players.len(), "player pipeline finished");
    Ok(players)
}
