use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::team_stats::TeamTotals;

/// League-wide average possessions per game the raw estimate is rescaled to.
pub const DEFAULT_TARGET_PACE: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceConfig {
    pub target_pace: f64,
}

impl Default for PaceConfig {
    fn default() -> Self {
        Self {
            target_pace: DEFAULT_TARGET_PACE,
        }
    }
}

impl PaceConfig {
    /// Non-finite or non-positive targets fall back to [`DEFAULT_TARGET_PACE`].
    pub fn with_target(target_pace: f64) -> Self {
        if target_pace.is_finite() && target_pace > 0.0 {
            Self { target_pace }
        } else {
            Self::default()
        }
    }
}

/// Outcome of one calibration pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaceCalibration {
    pub target_pace: f64,
    /// Unweighted mean of per-team raw pace; `None` when no team has played.
    pub league_raw_pace: Option<f64>,
    pub scale: f64,
    pub teams_sampled: usize,
}

/// Rescale every team's possessions so the league mean pace hits the target.
///
/// Must run exactly once, after all game lines are aggregated and before any
/// per-possession rating is derived.
pub fn calibrate_pace(totals: &mut TeamTotals, cfg: PaceConfig) -> PaceCalibration {
    let raw_paces: Vec<f64> = totals
        .iter()
        .filter(|t| t.games > 0)
        .filter_map(|t| t.pace())
        .collect();

    let league_raw_pace = if raw_paces.is_empty() {
        None
    } else {
        Some(raw_paces.iter().sum::<f64>() / raw_paces.len() as f64)
    };

    let scale = match league_raw_pace {
        Some(mean) if mean.is_finite() && mean > 0.0 => cfg.target_pace / mean,
        Some(mean) => {
            warn!(mean, "league raw pace is not positive; leaving possessions unscaled");
            1.0
        }
        None => {
            warn!("no team has played a game; leaving possessions unscaled");
            1.0
        }
    };

    for team in totals.iter_mut() {
        team.possessions_for *= scale;
        team.possessions_against *= scale;
    }

    info!(
        teams = raw_paces.len(),
        league_raw_pace = league_raw_pace.unwrap_or_default(),
        scale,
        target = cfg.target_pace,
        "calibrated league pace"
    );

    PaceCalibration {
        target_pace: cfg.target_pace,
        league_raw_pace,
        scale,
        teams_sampled: raw_paces.len(),
    }
}
