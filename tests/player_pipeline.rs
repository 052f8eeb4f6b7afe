use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde_json::json;

use tpbl_advanced::config::PipelineConfig;
use tpbl_advanced::leaderboard::render_player_lines;
use tpbl_advanced::pipeline::{run_player_files, run_player_pipeline};
use tpbl_advanced::player_metrics::{PlayerAdvancedMetrics, build_player_advanced};
use tpbl_advanced::player_usage::aggregate_team_usage;
use tpbl_advanced::ranking::{MissingPolicy, PlayerRankKey, RankSpec, rank_players, render_json};
use tpbl_advanced::records::{EntityId, RawPlayerSeasonRecord, usage_base};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn read_player_fixture() -> Vec<RawPlayerSeasonRecord> {
    let raw = fs::read_to_string(fixture_path("player_stats_raw.json"))
        .expect("fixture file should be readable");
    serde_json::from_str(&raw).expect("fixture should parse")
}

fn player(rows: &[PlayerAdvancedMetrics], id: i64) -> &PlayerAdvancedMetrics {
    rows.iter()
        .find(|p| p.player_id == Some(EntityId::Num(id)))
        .expect("player should exist")
}

fn ids(rows: &[PlayerAdvancedMetrics]) -> Vec<i64> {
    rows.iter()
        .map(|p| match p.player_id {
            Some(EntityId::Num(id)) => id,
            _ => -1,
        })
        .collect()
}

#[test]
fn team_usage_totals_cover_every_rostered_player() {
    let totals = aggregate_team_usage(&read_player_fixture());
    assert_eq!(totals.len(), 2);

    let alpha = totals.get(&EntityId::Num(8)).unwrap();
    assert_eq!(alpha.players, 3);
    assert!((alpha.fga - 30.0).abs() < 1e-12);
    assert!((alpha.fta - 7.0).abs() < 1e-12);
    assert!((alpha.total_usage() - 38.08).abs() < 1e-9);
    assert_eq!(totals.total_usage(None), None);
}

#[test]
fn derived_rates_for_a_starter() {
    let rows = build_player_advanced(&read_player_fixture());
    let p = player(&rows, 101);

    assert_eq!(p.player_name, "Chen Wei");
    assert_eq!(p.team_id, Some(EntityId::Num(8)));
    assert_eq!(p.games, 20);
    assert!((p.min_pg - 33.0).abs() < 1e-12);
    assert!((p.efg_official.unwrap() - 0.587).abs() < 1e-12);
    assert!((p.ts_official.unwrap() - 0.582).abs() < 1e-12);
    assert!((p.tov_pct_official.unwrap() - 0.124).abs() < 1e-12);
    assert!((p.ft_rate.unwrap() - 5.0 / 15.0).abs() < 1e-12);
    assert!((p.three_par.unwrap() - 6.5 / 15.0).abs() < 1e-12);
    assert!((p.usage_share.unwrap() - 19.7 / 38.08).abs() < 1e-9);
    assert!((p.ppp.unwrap() - 21.4 / 19.7).abs() < 1e-9);
    assert!((p.per_simple - 21.3).abs() < 1e-9);
    assert!((p.eff_raw - 19.8).abs() < 1e-12);
}

#[test]
fn output_keeps_input_order_before_ranking() {
    let rows = build_player_advanced(&read_player_fixture());
    assert_eq!(ids(&rows), vec![101, 102, 103, 201, 202, 301]);
}

#[test]
fn usage_shares_are_consistent_with_team_denominator() {
    let rows = build_player_advanced(&read_player_fixture());

    let mut team_sums: HashMap<EntityId, f64> = HashMap::new();
    for p in &rows {
        if let Some(team_id) = &p.team_id {
            *team_sums.entry(team_id.clone()).or_default() += usage_base(p.fga, p.fta, p.tov);
        }
    }

    for p in rows.iter().filter(|p| p.team_id.is_some()) {
        let team_id = p.team_id.as_ref().unwrap();
        let expected = usage_base(p.fga, p.fta, p.tov) / team_sums[team_id];
        assert!((p.usage_share.unwrap() - expected).abs() < 1e-9);
    }

    let alpha_total: f64 = rows
        .iter()
        .filter(|p| p.team_id == Some(EntityId::Num(8)))
        .filter_map(|p| p.usage_share)
        .sum();
    assert!((alpha_total - 1.0).abs() < 1e-9);
}

#[test]
fn unresolved_team_only_loses_usage_metrics() {
    let rows = build_player_advanced(&read_player_fixture());
    let p = player(&rows, 301);
    assert_eq!(p.team_id, None);
    assert_eq!(p.team_name, "N/A");
    assert_eq!(p.usage_share, None);
    assert!((p.ppp.unwrap() - 8.0 / 6.94).abs() < 1e-9);
    assert!((p.ts_official.unwrap() - 0.601).abs() < 1e-12);
}

#[test]
fn zero_attempt_player_gets_unavailable_ratios() {
    let rows = build_player_advanced(&read_player_fixture());
    let p = player(&rows, 201);
    assert_eq!(p.ft_rate, None);
    assert_eq!(p.three_par, None);
    assert_eq!(p.ppp, None);
    assert_eq!(p.usage_share, Some(0.0));
    assert_eq!(p.ts_official, None);
    assert!((p.per_simple - 0.7).abs() < 1e-12);
}

#[test]
fn default_ranking_puts_missing_ts_last() {
    let rows = run_player_pipeline(&read_player_fixture(), RankSpec::default());
    assert_eq!(ids(&rows), vec![301, 101, 102, 202, 103, 201]);
}

#[test]
fn negative_ts_still_ranks_above_missing() {
    let records: Vec<RawPlayerSeasonRecord> = serde_json::from_value(json!([
        {"player": {"id": 1, "name": "Missing"}, "team": {"id": 5}, "percentage_stats": {}},
        {"player": {"id": 2, "name": "Negative"}, "team": {"id": 5},
         "percentage_stats": {"true_shooting_percentage": "-5"}},
        {"player": {"id": 3, "name": "Solid"}, "team": {"id": 5},
         "percentage_stats": {"true_shooting_percentage": 40}}
    ]))
    .unwrap();
    let rows = run_player_pipeline(&records, RankSpec::default());
    assert_eq!(ids(&rows), vec![3, 2, 1]);
}

#[test]
fn ranking_by_usage_share_can_treat_missing_as_zero() {
    let mut rows = build_player_advanced(&read_player_fixture());
    rank_players(
        &mut rows,
        RankSpec {
            key: PlayerRankKey::UsageShare,
            descending: false,
            missing: MissingPolicy::AsZero,
        },
    );
    // 201 has a real 0.0 share and 301 is unavailable; both order as zero, input order kept.
    assert_eq!(ids(&rows)[..2], [201, 301]);
    assert_eq!(rows[1].usage_share, None);
}

#[test]
fn file_run_writes_ranked_json_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(
        fixture_path("player_stats_raw.json"),
        dir.path().join("player_stats_raw.json"),
    )
    .unwrap();
    let cfg = PipelineConfig {
        data_dir: dir.path().to_path_buf(),
        ..PipelineConfig::default()
    };

    let players = run_player_files(&cfg).unwrap();
    let first = fs::read_to_string(cfg.player_output_path()).unwrap();
    assert_eq!(first, render_json(&players).unwrap());

    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(value[0]["player_id"], 301);
    assert!(value[0]["team_id"].is_null());
    assert!(value[5]["ts_official"].is_null());

    run_player_files(&cfg).unwrap();
    assert_eq!(fs::read_to_string(cfg.player_output_path()).unwrap(), first);
}

#[test]
fn leaderboard_lines_mark_missing_values() {
    let rows = run_player_pipeline(&read_player_fixture(), RankSpec::default());
    let text = render_player_lines(&rows);
    let last = text.lines().last().unwrap();
    assert_eq!(
        last,
        "Huang Yu (Bravo Rams) - PTS 0.0, TS --, eFG --, USG_share 0.000"
    );
}
