use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use tpbl_advanced::config::PipelineConfig;
use tpbl_advanced::leaderboard::{render_player_lines, render_team_table};
use tpbl_advanced::pipeline::{run_player_files, run_team_files};

const VALUE_FLAGS: &[&str] = &["--data-dir", "--target-pace", "--team-sort", "--player-sort"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Teams,
    Players,
    All,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_logging();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let target = parse_target(&args)?;
    let quiet = args.iter().any(|a| a == "--quiet" || a == "-q");

    let mut cfg = PipelineConfig::from_env();
    if let Some(dir) = flag_value(&args, "--data-dir") {
        cfg.data_dir = PathBuf::from(dir);
    }
    if let Some(raw) = flag_value(&args, "--target-pace") {
        cfg.set_target_pace(&raw);
    }
    if let Some(raw) = flag_value(&args, "--team-sort") {
        cfg.set_team_sort(&raw);
    }
    if let Some(raw) = flag_value(&args, "--player-sort") {
        cfg.set_player_sort(&raw);
    }

    if matches!(target, Target::Teams | Target::All) {
        let report = run_team_files(&cfg).context("team pipeline failed")?;
        println!(
            "Wrote team advanced stats to {}",
            cfg.team_output_path().display()
        );
        println!(
            "League raw pace {} -> target {:.1} (scale {:.4})",
            report
                .calibration
                .league_raw_pace
                .map(|v| format!("{v:.2}"))
                .unwrap_or_else(|| "n/a".to_string()),
            report.calibration.target_pace,
            report.calibration.scale
        );
        if !quiet {
            println!();
            println!("=== TPBL team advanced leaderboard ===");
            print!("{}", render_team_table(&report.teams));
        }
    }

    if matches!(target, Target::Players | Target::All) {
        let players = run_player_files(&cfg).context("player pipeline failed")?;
        println!(
            "Wrote player advanced stats to {}",
            cfg.player_output_path().display()
        );
        if !quiet {
            println!();
            println!("All players:");
            print!("{}", render_player_lines(&players));
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tpbl_advanced=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_target(args: &[String]) -> Result<Target> {
    let mut target = None;
    let mut skip_next = false;
    for arg in args {
        if std::mem::take(&mut skip_next) {
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        target = Some(match arg.as_str() {
            "teams" | "team" => Target::Teams,
            "players" | "player" => Target::Players,
            "all" => Target::All,
            other => return Err(anyhow!("unknown target: {other} (expected teams|players|all)")),
        });
    }
    Ok(target.unwrap_or(Target::All))
}

fn flag_value(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&prefix) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(next.trim().to_string());
        }
    }
    None
}
