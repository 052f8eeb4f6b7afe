use std::fmt::Write as _;

use crate::player_metrics::PlayerAdvancedMetrics;
use crate::ratio::Metric;
use crate::team_metrics::TeamAdvancedMetrics;

const TEAM_NAME_WIDTH: usize = 10;

/// `--` for unavailable, otherwise fixed precision.
pub fn fmt_metric(value: Metric, digits: usize) -> String {
    match value {
        Some(v) => format!("{v:.digits$}"),
        None => "--".to_string(),
    }
}

pub fn render_team_table(teams: &[TeamAdvancedMetrics]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<12} {:>5} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "TeamID", "Team", "G", "OffRtg", "DefRtg", "Pace", "eFG%", "TOV%", "FTR"
    );
    for t in teams {
        let name: String = t.team_name.chars().take(TEAM_NAME_WIDTH).collect();
        // Table cells show 0 for unavailable; the JSON keeps null.
        let _ = writeln!(
            out,
            "{:<10} {:<12} {:>5} {:>8.1} {:>8.1} {:>8.1} {:>8.3} {:>8.3} {:>8.3}",
            t.team_id.to_string(),
            name,
            t.games,
            t.off_rtg.unwrap_or(0.0),
            t.def_rtg.unwrap_or(0.0),
            t.pace.unwrap_or(0.0),
            t.efg.unwrap_or(0.0),
            t.tov_pct.unwrap_or(0.0),
            t.ft_rate.unwrap_or(0.0),
        );
    }
    out
}

pub fn render_player_lines(players: &[PlayerAdvancedMetrics]) -> String {
    let mut out = String::new();
    for p in players {
        let _ = writeln!(
            out,
            "{} ({}) - PTS {}, TS {}, eFG {}, USG_share {}",
            p.player_name,
            p.team_name,
            fmt_metric(Some(p.pts), 1),
            fmt_metric(p.ts_official, 3),
            fmt_metric(p.efg_official, 3),
            fmt_metric(p.usage_share, 3),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_metrics_render_as_dashes() {
        assert_eq!(fmt_metric(None, 3), "--");
        assert_eq!(fmt_metric(Some(0.51234), 3), "0.512");
        assert_eq!(fmt_metric(Some(12.0), 1), "12.0");
    }
}
