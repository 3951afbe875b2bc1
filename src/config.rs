use std::collections::HashSet;

use crate::team_stats::{LeagueBaselines, TeamId};

/// Aston Villa, Chelsea, Liverpool, Manchester United.
pub const DEFAULT_FOCUS_IDS: &[TeamId] = &[58, 61, 64, 66];
pub const DEFAULT_SEASON_GAMES: u32 = 38;

/// Constants of the scoring model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelConfig {
    /// Highest goal count per side on the scoreline grid (inclusive).
    pub max_goals: u32,
    pub lambda_min: f64,
    pub lambda_max: f64,
    /// Baselines used before any match has been completed.
    pub fallback_avg_home_goals: f64,
    pub fallback_avg_away_goals: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            max_goals: 6,
            lambda_min: 0.2,
            lambda_max: 5.0,
            fallback_avg_home_goals: 1.4,
            fallback_avg_away_goals: 1.1,
        }
    }
}

impl ModelConfig {
    pub fn fallback_baselines(&self) -> LeagueBaselines {
        LeagueBaselines {
            avg_home_goals: self.fallback_avg_home_goals,
            avg_away_goals: self.fallback_avg_away_goals,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Invalid or missing values keep their defaults; swapped clamp bounds
    /// are reordered.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        let max_goals = lookup_parse::<u32>(&get, "REFRESH_MAX_GOALS")
            .filter(|v| (1..=20).contains(v))
            .unwrap_or(d.max_goals);
        let lo = lookup_parse::<f64>(&get, "REFRESH_LAMBDA_MIN")
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(d.lambda_min);
        let hi = lookup_parse::<f64>(&get, "REFRESH_LAMBDA_MAX")
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(d.lambda_max);
        Self {
            max_goals,
            lambda_min: lo.min(hi),
            lambda_max: lo.max(hi),
            ..d
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshConfig {
    pub focus_ids: Vec<TeamId>,
    pub season_games: u32,
    pub model: ModelConfig,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            focus_ids: DEFAULT_FOCUS_IDS.to_vec(),
            season_games: DEFAULT_SEASON_GAMES,
            model: ModelConfig::default(),
        }
    }
}

impl RefreshConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let focus_ids = get("REFRESH_FOCUS_IDS")
            .map(|raw| parse_ids(&raw))
            .filter(|ids| !ids.is_empty())
            .unwrap_or_else(|| DEFAULT_FOCUS_IDS.to_vec());
        let season_games = lookup_parse::<u32>(&get, "REFRESH_SEASON_GAMES")
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_SEASON_GAMES);
        Self {
            focus_ids,
            season_games,
            model: ModelConfig::from_lookup(&get),
        }
    }

    pub fn is_focus(&self, id: TeamId) -> bool {
        self.focus_ids.contains(&id)
    }
}

fn lookup_parse<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    get(key).and_then(|raw| raw.trim().parse::<T>().ok())
}

pub fn parse_ids(raw: &str) -> Vec<TeamId> {
    let mut seen = HashSet::new();
    raw.split([',', ';', ' '])
        .filter_map(|part| part.trim().parse::<TeamId>().ok())
        .filter(|id| *id != 0)
        .filter(|id| seen.insert(*id))
        .collect()
}
