use std::collections::HashMap;

use tracing::debug;

use crate::ratio::Metric;
use crate::records::{EntityId, RawPlayerSeasonRecord, usage_base};

/// Per-game usage components summed over every player on a team.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TeamUsageTotal {
    pub fga: f64,
    pub fta: f64,
    pub tov: f64,
    pub players: usize,
}

impl TeamUsageTotal {
    pub fn total_usage(&self) -> f64 {
        usage_base(self.fga, self.fta, self.tov)
    }
}

/// Finalized team usage totals. Only constructed by [`aggregate_team_usage`],
/// so every team's sum covers its whole roster before any share is read.
#[derive(Debug, Clone, Default)]
pub struct TeamUsageTotals {
    by_team: HashMap<EntityId, TeamUsageTotal>,
}

impl TeamUsageTotals {
    pub fn get(&self, team_id: &EntityId) -> Option<&TeamUsageTotal> {
        self.by_team.get(team_id)
    }

    /// Team denominator for usage share; `None` for unknown teams.
    pub fn total_usage(&self, team_id: Option<&EntityId>) -> Metric {
        team_id
            .and_then(|id| self.by_team.get(id))
            .map(TeamUsageTotal::total_usage)
    }

    pub fn len(&self) -> usize {
        self.by_team.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_team.is_empty()
    }
}

/// First pass of the player pipeline: sum per-game FGA, FTA and turnovers by team.
pub fn aggregate_team_usage(players: &[RawPlayerSeasonRecord]) -> TeamUsageTotals {
    let mut by_team: HashMap<EntityId, TeamUsageTotal> = HashMap::new();
    let mut unassigned = 0usize;
    for row in players {
        let Some(team_id) = row.team_id() else {
            unassigned += 1;
            continue;
        };
        let avg = &row.average_stats;
        let total = by_team.entry(team_id.clone()).or_default();
        total.fga += avg.field_goals_attempted;
        total.fta += avg.free_throws_attempted;
        total.tov += avg.turnovers;
        total.players += 1;
    }
    if unassigned > 0 {
        debug!(unassigned, "players without a team were left out of usage totals");
    }
    debug!(teams = by_team.len(), "aggregated team usage totals");
    TeamUsageTotals { by_team }
}
