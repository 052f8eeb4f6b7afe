use serde::{Deserialize, Serialize};

use crate::pace::{PaceCalibration, PaceConfig, calibrate_pace};
use crate::ratio::{Metric, safe_div};
use crate::records::{EntityId, RawGameTeamRecord};
use crate::team_stats::{TeamAccumulator, aggregate_team_records};

/// Season-level advanced metrics for one team. Ratios are `None` when their
/// denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAdvancedMetrics {
    pub team_id: EntityId,
    pub team_name: String,
    pub games: u32,
    pub points_for_total: f64,
    pub points_against_total: f64,
    pub points_for_avg: Metric,
    pub points_against_avg: Metric,
    pub efg: Metric,
    pub ts: Metric,
    pub off_rtg: Metric,
    pub def_rtg: Metric,
    pub pace: Metric,
    pub tov_pct: Metric,
    pub ft_rate: Metric,
}

/// Derive ratings from a team whose possessions are already calibrated.
pub fn compute_team_metrics(team: &TeamAccumulator) -> TeamAdvancedMetrics {
    let games = team.games as f64;
    let shooting_possessions = team.fga + 0.44 * team.fta;

    TeamAdvancedMetrics {
        team_id: team.team_id.clone(),
        team_name: team.team_name.clone(),
        games: team.games,
        points_for_total: team.points_for,
        points_against_total: team.points_against,
        points_for_avg: safe_div(team.points_for, games),
        points_against_avg: safe_div(team.points_against, games),
        efg: safe_div(team.fgm + 0.5 * team.three_pm, team.fga),
        ts: safe_div(team.points_for, 2.0 * shooting_possessions),
        off_rtg: safe_div(100.0 * team.points_for, team.possessions_for),
        def_rtg: safe_div(100.0 * team.points_against, team.possessions_against),
        pace: safe_div(team.possessions_for, games),
        tov_pct: safe_div(team.tov, team.possessions_for),
        ft_rate: safe_div(team.fta, team.fga),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamReport {
    pub calibration: PaceCalibration,
    /// First-seen team order; rank with `ranking::rank_teams` before presenting.
    pub teams: Vec<TeamAdvancedMetrics>,
}

/// Aggregate → calibrate → derive, in that order.
pub fn build_team_advanced(records: &[RawGameTeamRecord], cfg: PaceConfig) -> TeamReport {
    let mut totals = aggregate_team_records(records);
    let calibration = calibrate_pace(&mut totals, cfg);
    let teams = totals.iter().map(compute_team_metrics).collect();
    TeamReport { calibration, teams }
}
