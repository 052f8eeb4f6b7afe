pub mod config;
pub mod dataset;
pub mod leaderboard;
pub mod pace;
pub mod pipeline;
pub mod player_metrics;
pub mod player_usage;
pub mod ranking;
pub mod ratio;
pub mod records;
pub mod team_metrics;
pub mod team_stats;
