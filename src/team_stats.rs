use std::collections::HashMap;

use tracing::debug;

use crate::ratio::{Metric, safe_div};
use crate::records::{EntityId, RawGameTeamRecord, UNKNOWN_NAME};

/// Running season totals for one team.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamAccumulator {
    pub team_id: EntityId,
    pub team_name: String,
    pub games: u32,
    pub points_for: f64,
    pub points_against: f64,
    pub fgm: f64,
    pub fga: f64,
    pub three_pm: f64,
    pub three_pa: f64,
    pub ftm: f64,
    pub fta: f64,
    pub oreb: f64,
    pub tov: f64,
    // Raw until `pace::calibrate_pace` rescales them.
    pub possessions_for: f64,
    pub possessions_against: f64,
}

impl TeamAccumulator {
    pub fn new(team_id: EntityId, team_name: Option<&str>) -> Self {
        Self {
            team_id,
            team_name: team_name.unwrap_or(UNKNOWN_NAME).to_string(),
            games: 0,
            points_for: 0.0,
            points_against: 0.0,
            fgm: 0.0,
            fga: 0.0,
            three_pm: 0.0,
            three_pa: 0.0,
            ftm: 0.0,
            fta: 0.0,
            oreb: 0.0,
            tov: 0.0,
            possessions_for: 0.0,
            possessions_against: 0.0,
        }
    }

    pub fn add_game(&mut self, rec: &RawGameTeamRecord) {
        if self.team_name == UNKNOWN_NAME
            && let Some(name) = rec.team_name.as_deref()
        {
            self.team_name = name.to_string();
        }

        let poss = rec.raw_possessions();
        self.games = self.games.saturating_add(1);
        self.points_for += rec.points_for;
        self.points_against += rec.points_against;
        self.fgm += rec.fgm;
        self.fga += rec.fga;
        self.three_pm += rec.three_pm;
        self.three_pa += rec.three_pa;
        self.ftm += rec.ftm;
        self.fta += rec.fta;
        self.oreb += rec.oreb;
        self.tov += rec.tov;
        self.possessions_for += poss;
        // Long-run symmetry: opponents get as many trips as we do.
        self.possessions_against += poss;
    }

    /// Possessions per game at the current (raw or calibrated) scale.
    pub fn pace(&self) -> Metric {
        safe_div(self.possessions_for, self.games as f64)
    }
}

/// Team accumulators keyed by id, iterated in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct TeamTotals {
    teams: Vec<TeamAccumulator>,
    index: HashMap<EntityId, usize>,
}

impl TeamTotals {
    pub fn entry(&mut self, team_id: &EntityId, team_name: Option<&str>) -> &mut TeamAccumulator {
        let idx = match self.index.get(team_id).copied() {
            Some(idx) => idx,
            None => {
                self.teams
                    .push(TeamAccumulator::new(team_id.clone(), team_name));
                let idx = self.teams.len() - 1;
                self.index.insert(team_id.clone(), idx);
                idx
            }
        };
        &mut self.teams[idx]
    }

    pub fn get(&self, team_id: &EntityId) -> Option<&TeamAccumulator> {
        self.index.get(team_id).map(|idx| &self.teams[*idx])
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamAccumulator> {
        self.teams.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TeamAccumulator> {
        self.teams.iter_mut()
    }
}

/// Fold per-game team lines into per-team season totals.
pub fn aggregate_team_records(records: &[RawGameTeamRecord]) -> TeamTotals {
    let mut totals = TeamTotals::default();
    let mut skipped = 0usize;
    for rec in records {
        let Some(team_id) = rec.team_id.as_ref() else {
            skipped += 1;
            continue;
        };
        totals
            .entry(team_id, rec.team_name.as_deref())
            .add_game(rec);
    }
    if skipped > 0 {
        debug!(skipped, "team records without a team id were ignored");
    }
    debug!(
        records = records.len(),
        teams = totals.len(),
        "aggregated team game records"
    );
    totals
}
