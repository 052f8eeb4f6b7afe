use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;

use crate::player_metrics::PlayerAdvancedMetrics;
use crate::ratio::Metric;
use crate::team_metrics::TeamAdvancedMetrics;

/// How unavailable values take part in ordering. Stored values are never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Ordered as if the value were `0.0`.
    AsZero,
    /// Always after every present value, whatever the direction or sign.
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankSpec<K> {
    pub key: K,
    pub descending: bool,
    pub missing: MissingPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamRankKey {
    OffRtg,
    DefRtg,
    Pace,
    Efg,
    Ts,
    TovPct,
    FtRate,
    PointsForAvg,
    PointsAgainstAvg,
}

impl TeamRankKey {
    pub fn value(self, team: &TeamAdvancedMetrics) -> Metric {
        match self {
            TeamRankKey::OffRtg => team.off_rtg,
            TeamRankKey::DefRtg => team.def_rtg,
            TeamRankKey::Pace => team.pace,
            TeamRankKey::Efg => team.efg,
            TeamRankKey::Ts => team.ts,
            TeamRankKey::TovPct => team.tov_pct,
            TeamRankKey::FtRate => team.ft_rate,
            TeamRankKey::PointsForAvg => team.points_for_avg,
            TeamRankKey::PointsAgainstAvg => team.points_against_avg,
        }
    }

    pub fn higher_is_better(self) -> bool {
        !matches!(
            self,
            TeamRankKey::DefRtg | TeamRankKey::TovPct | TeamRankKey::PointsAgainstAvg
        )
    }
}

impl FromStr for TeamRankKey {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "off_rtg" => TeamRankKey::OffRtg,
            "def_rtg" => TeamRankKey::DefRtg,
            "pace" => TeamRankKey::Pace,
            "efg" => TeamRankKey::Efg,
            "ts" => TeamRankKey::Ts,
            "tov_pct" => TeamRankKey::TovPct,
            "ft_rate" => TeamRankKey::FtRate,
            "points_for_avg" => TeamRankKey::PointsForAvg,
            "points_against_avg" => TeamRankKey::PointsAgainstAvg,
            other => return Err(format!("unknown team sort key: {other}")),
        })
    }
}

impl Default for RankSpec<TeamRankKey> {
    fn default() -> Self {
        Self {
            key: TeamRankKey::OffRtg,
            descending: true,
            missing: MissingPolicy::AsZero,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerRankKey {
    TsOfficial,
    EfgOfficial,
    TovPctOfficial,
    UsageShare,
    Ppp,
    FtRate,
    ThreePar,
    PerSimple,
    Points,
}

impl PlayerRankKey {
    pub fn value(self, player: &PlayerAdvancedMetrics) -> Metric {
        match self {
            PlayerRankKey::TsOfficial => player.ts_official,
            PlayerRankKey::EfgOfficial => player.efg_official,
            PlayerRankKey::TovPctOfficial => player.tov_pct_official,
            PlayerRankKey::UsageShare => player.usage_share,
            PlayerRankKey::Ppp => player.ppp,
            PlayerRankKey::FtRate => player.ft_rate,
            PlayerRankKey::ThreePar => player.three_par,
            PlayerRankKey::PerSimple => Some(player.per_simple),
            PlayerRankKey::Points => Some(player.pts),
        }
    }

    pub fn higher_is_better(self) -> bool {
        self != PlayerRankKey::TovPctOfficial
    }
}

impl FromStr for PlayerRankKey {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "ts_official" | "ts" => PlayerRankKey::TsOfficial,
            "efg_official" | "efg" => PlayerRankKey::EfgOfficial,
            "tov_pct_official" => PlayerRankKey::TovPctOfficial,
            "usage_share" => PlayerRankKey::UsageShare,
            "ppp" => PlayerRankKey::Ppp,
            "ft_rate" => PlayerRankKey::FtRate,
            "three_par" => PlayerRankKey::ThreePar,
            "per_simple" => PlayerRankKey::PerSimple,
            "pts" => PlayerRankKey::Points,
            other => return Err(format!("unknown player sort key: {other}")),
        })
    }
}

impl Default for RankSpec<PlayerRankKey> {
    fn default() -> Self {
        Self {
            key: PlayerRankKey::TsOfficial,
            descending: true,
            missing: MissingPolicy::Last,
        }
    }
}

pub fn rank_teams(teams: &mut [TeamAdvancedMetrics], spec: RankSpec<TeamRankKey>) {
    rank_by(teams, |t| spec.key.value(t), spec.descending, spec.missing);
}

pub fn rank_players(players: &mut [PlayerAdvancedMetrics], spec: RankSpec<PlayerRankKey>) {
    rank_by(players, |p| spec.key.value(p), spec.descending, spec.missing);
}

/// Stable sort: equal keys keep their incoming order.
fn rank_by<T>(items: &mut [T], value: impl Fn(&T) -> Metric, descending: bool, missing: MissingPolicy) {
    items.sort_by(|a, b| compare_metric(value(a), value(b), descending, missing));
}

fn compare_metric(a: Metric, b: Metric, descending: bool, missing: MissingPolicy) -> Ordering {
    let directed = |x: f64, y: f64| {
        if descending {
            y.total_cmp(&x)
        } else {
            x.total_cmp(&y)
        }
    };
    match missing {
        MissingPolicy::AsZero => directed(a.unwrap_or(0.0), b.unwrap_or(0.0)),
        MissingPolicy::Last => match (a, b) {
            (Some(x), Some(y)) => directed(x, y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

/// Pretty JSON array, two-space indent, field order as declared.
pub fn render_json<T: Serialize>(rows: &[T]) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(rows)?;
    out.push('\n');
    Ok(out)
}
