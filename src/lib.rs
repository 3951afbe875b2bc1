pub mod baked_data;
pub mod config;
pub mod fixture_select;
pub mod football_data;
pub mod refresh;
pub mod team_stats;
pub mod win_prob;
