use serde::{Deserialize, Serialize};

use crate::player_usage::{TeamUsageTotals, aggregate_team_usage};
use crate::ratio::{Metric, opt_pct_to_fraction, safe_div, safe_div_opt};
use crate::records::{EntityId, RawPlayerSeasonRecord, UNKNOWN_NAME};

/// Per-game box score plus official and derived rates for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAdvancedMetrics {
    pub player_id: Option<EntityId>,
    pub player_name: String,
    pub team_id: Option<EntityId>,
    pub team_name: String,
    pub games: u32,
    pub min_pg: f64,

    pub pts: f64,
    pub reb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub tov: f64,
    pub fgm: f64,
    pub fga: f64,
    pub three_pm: f64,
    pub three_pa: f64,
    pub ftm: f64,
    pub fta: f64,
    pub eff_raw: f64,

    pub efg_official: Metric,
    pub ts_official: Metric,
    pub tov_pct_official: Metric,

    pub ft_rate: Metric,
    pub three_par: Metric,
    pub usage_share: Metric,
    pub ppp: Metric,
    pub per_simple: f64,
}

/// Derive one player's metrics against fully aggregated team usage totals.
pub fn compute_player_metrics(
    row: &RawPlayerSeasonRecord,
    team_usage: &TeamUsageTotals,
) -> PlayerAdvancedMetrics {
    let avg = &row.average_stats;
    let pct = &row.percentage_stats;

    let usage_base = avg.usage_base();
    let team_total_usage = team_usage.total_usage(row.team_id());

    let per_simple = avg.score + avg.rebounds + avg.assists + avg.steals + avg.blocks
        - (avg.field_goals_attempted - avg.field_goals_made)
        - (avg.free_throws_attempted - avg.free_throws_made)
        - avg.turnovers;

    PlayerAdvancedMetrics {
        player_id: row.player.id.clone(),
        player_name: name_or_unknown(row.player.name.as_deref()),
        team_id: row.team.id.clone(),
        team_name: name_or_unknown(row.team.name.as_deref()),
        games: row.game_count,
        min_pg: avg.time_on_court / 60.0,

        pts: avg.score,
        reb: avg.rebounds,
        ast: avg.assists,
        stl: avg.steals,
        blk: avg.blocks,
        tov: avg.turnovers,
        fgm: avg.field_goals_made,
        fga: avg.field_goals_attempted,
        three_pm: avg.three_pointers_made,
        three_pa: avg.three_pointers_attempted,
        ftm: avg.free_throws_made,
        fta: avg.free_throws_attempted,
        eff_raw: avg.efficiency,

        efg_official: opt_pct_to_fraction(pct.effective_field_goals_percentage.as_ref()),
        ts_official: opt_pct_to_fraction(pct.true_shooting_percentage.as_ref()),
        tov_pct_official: opt_pct_to_fraction(pct.turnovers_percentage.as_ref()),

        ft_rate: safe_div(avg.free_throws_attempted, avg.field_goals_attempted),
        three_par: safe_div(avg.three_pointers_attempted, avg.field_goals_attempted),
        usage_share: safe_div_opt(Some(usage_base), team_total_usage),
        ppp: safe_div(avg.score, usage_base),
        per_simple,
    }
}

/// Two passes: finalize every team's usage total, then derive each player.
/// Output keeps input order.
pub fn build_player_advanced(players: &[RawPlayerSeasonRecord]) -> Vec<PlayerAdvancedMetrics> {
    let team_usage = aggregate_team_usage(players);
    players
        .iter()
        .map(|row| compute_player_metrics(row, &team_usage))
        .collect()
}

fn name_or_unknown(name: Option<&str>) -> String {
    name.unwrap_or(UNKNOWN_NAME).to_string()
}
