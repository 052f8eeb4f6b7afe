//! Raw input records as delivered by the league data crawler.
//!
//! Upstream JSON is loosely typed: counting stats arrive as numbers, numeric
//! strings or `null`, nested blocks may be missing, and ids are sometimes
//! strings. Every field therefore carries an explicit default here, so the
//! metric code downstream never has to guess:
//!
//! * counting stats: `0.0` when absent, `null` or unparseable;
//! * official percentages: kept as raw JSON and converted later, absent → unavailable;
//! * ids: `None` when absent or not a number/string;
//! * names: `None`, rendered as `"N/A"` in outputs;
//! * nested blocks (`player`, `team`, `average_stats`, ...): empty default when
//!   absent, `null` or the wrong shape.

use std::fmt;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

pub const UNKNOWN_NAME: &str = "N/A";

/// Team, player or game identifier, echoed back in its upstream JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityId {
    Num(i64),
    Text(String),
}

impl EntityId {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(id) => Some(EntityId::Num(id)),
                None => Some(EntityId::Text(n.to_string())),
            },
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    Some(EntityId::Text(s.to_string()))
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Num(id) => write!(f, "{id}"),
            EntityId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        EntityId::Num(id)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        EntityId::Text(id.to_string())
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EntityId::Num(id) => serializer.serialize_i64(*id),
            EntityId::Text(id) => serializer.serialize_str(id),
        }
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        EntityId::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid entity id: {value}")))
    }
}

/// One team's box-score line for one game.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGameTeamRecord {
    #[serde(default, deserialize_with = "loose_id")]
    pub game_id: Option<EntityId>,
    #[serde(default, deserialize_with = "loose_id")]
    pub team_id: Option<EntityId>,
    #[serde(default, deserialize_with = "loose_name")]
    pub team_name: Option<String>,
    #[serde(default, deserialize_with = "loose_count")]
    pub points_for: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub points_against: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub fgm: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub fga: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub three_pm: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub three_pa: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub ftm: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub fta: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub oreb: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub tov: f64,
}

impl RawGameTeamRecord {
    /// Possession estimate for this game line: `FGA + 0.44·FTA − OREB + TOV`.
    pub fn raw_possessions(&self) -> f64 {
        estimate_possessions(self.fga, self.fta, self.oreb, self.tov)
    }
}

pub fn estimate_possessions(fga: f64, fta: f64, oreb: f64, tov: f64) -> f64 {
    fga + 0.44 * fta - oreb + tov
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityRef {
    #[serde(default, deserialize_with = "loose_id")]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "loose_name")]
    pub name: Option<String>,
}

/// Per-game averages as published by the league.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AverageStats {
    #[serde(default, deserialize_with = "loose_count")]
    pub score: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub rebounds: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub assists: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub steals: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub blocks: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub turnovers: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub field_goals_made: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub field_goals_attempted: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub three_pointers_made: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub three_pointers_attempted: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub free_throws_made: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub free_throws_attempted: f64,
    /// Seconds on court per game.
    #[serde(default, deserialize_with = "loose_count")]
    pub time_on_court: f64,
    #[serde(default, deserialize_with = "loose_count")]
    pub efficiency: f64,
}

impl AverageStats {
    /// Possession-consuming actions per game: `FGA + 0.44·FTA + TOV`.
    pub fn usage_base(&self) -> f64 {
        usage_base(
            self.field_goals_attempted,
            self.free_throws_attempted,
            self.turnovers,
        )
    }
}

pub fn usage_base(fga: f64, fta: f64, tov: f64) -> f64 {
    fga + 0.44 * fta + tov
}

/// Officially pre-computed percentages, percent scale ("49.6"), kept raw.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PercentageStats {
    #[serde(default)]
    pub effective_field_goals_percentage: Option<Value>,
    #[serde(default)]
    pub true_shooting_percentage: Option<Value>,
    #[serde(default)]
    pub turnovers_percentage: Option<Value>,
}

/// One player's season line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlayerSeasonRecord {
    #[serde(default, deserialize_with = "lenient_block")]
    pub player: EntityRef,
    #[serde(default, deserialize_with = "lenient_block")]
    pub team: EntityRef,
    #[serde(default, deserialize_with = "loose_games")]
    pub game_count: u32,
    #[serde(default, deserialize_with = "lenient_block")]
    pub average_stats: AverageStats,
    #[serde(default, deserialize_with = "lenient_block")]
    pub percentage_stats: PercentageStats,
}

impl RawPlayerSeasonRecord {
    pub fn team_id(&self) -> Option<&EntityId> {
        self.team.id.as_ref()
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    v.is_finite().then_some(v)
}

fn loose_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_f64(&value).unwrap_or(0.0))
}

fn loose_games<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let games = value_as_f64(&value).unwrap_or(0.0);
    Ok(games.max(0.0).min(u32::MAX as f64) as u32)
}

fn loose_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<EntityId>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(EntityId::from_value(&value))
}

fn loose_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_block<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn team_record_defaults_missing_and_null_stats_to_zero() {
        let rec: RawGameTeamRecord = serde_json::from_value(json!({
            "game_id": 101,
            "team_id": 8,
            "team_name": "Dreamers",
            "points_for": null,
            "fga": "82",
            "fta": "n/a",
            "reb": 40
        }))
        .unwrap();
        assert_eq!(rec.team_id, Some(EntityId::Num(8)));
        assert_eq!(rec.points_for, 0.0);
        assert_eq!(rec.fga, 82.0);
        assert_eq!(rec.fta, 0.0);
        assert_eq!(rec.tov, 0.0);
    }

    #[test]
    fn player_record_tolerates_null_blocks() {
        let rec: RawPlayerSeasonRecord = serde_json::from_value(json!({
            "player": {"id": "p-7", "name": "Lin"},
            "team": null,
            "average_stats": null
        }))
        .unwrap();
        assert_eq!(rec.player.id, Some(EntityId::from("p-7")));
        assert!(rec.team_id().is_none());
        assert_eq!(rec.average_stats.score, 0.0);
        assert!(rec.percentage_stats.true_shooting_percentage.is_none());
    }

    #[test]
    fn ids_round_trip_in_their_upstream_form() {
        assert_eq!(serde_json::to_value(EntityId::Num(8)).unwrap(), json!(8));
        assert_eq!(serde_json::to_value(EntityId::from("A1")).unwrap(), json!("A1"));
    }
}
