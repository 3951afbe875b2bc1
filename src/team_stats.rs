use std::collections::HashMap;

use crate::config::ModelConfig;

pub type TeamId = u32;

/// A match with its full-time score. Either side may be unknown when the
/// source had no final score for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedMatch {
    pub home_id: TeamId,
    pub away_id: TeamId,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
}

impl CompletedMatch {
    pub fn new(home_id: TeamId, away_id: TeamId, home_goals: u32, away_goals: u32) -> Self {
        Self {
            home_id,
            away_id,
            home_goals: Some(home_goals),
            away_goals: Some(away_goals),
        }
    }

    fn score(&self) -> Option<(u32, u32)> {
        Some((self.home_goals?, self.away_goals?))
    }
}

/// Season-to-date counts for one team, split by venue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamRates {
    pub home_games: u32,
    pub home_goals_for: u32,
    pub home_goals_against: u32,
    pub away_games: u32,
    pub away_goals_for: u32,
    pub away_goals_against: u32,
}

/// Scoring and conceding multipliers relative to the league baselines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strength {
    pub attack: f64,
    pub defense: f64,
}

impl Strength {
    pub const AVERAGE: Strength = Strength {
        attack: 1.0,
        defense: 1.0,
    };
}

impl TeamRates {
    /// Home attack relative to the league home average and home conceding
    /// relative to the league away average. `None` when the team has no home
    /// games on record.
    pub fn home_strength(&self, baselines: LeagueBaselines) -> Option<Strength> {
        if self.home_games == 0 {
            return None;
        }
        let games = self.home_games as f64;
        Some(Strength {
            attack: relative(self.home_goals_for as f64 / games, baselines.avg_home_goals),
            defense: relative(self.home_goals_against as f64 / games, baselines.avg_away_goals),
        })
    }

    /// Mirror of [`TeamRates::home_strength`] for away games.
    pub fn away_strength(&self, baselines: LeagueBaselines) -> Option<Strength> {
        if self.away_games == 0 {
            return None;
        }
        let games = self.away_games as f64;
        Some(Strength {
            attack: relative(self.away_goals_for as f64 / games, baselines.avg_away_goals),
            defense: relative(self.away_goals_against as f64 / games, baselines.avg_home_goals),
        })
    }

    pub fn games(&self) -> u32 {
        self.home_games + self.away_games
    }
}

// A goalless league side has no meaningful rate to compare against.
fn relative(rate: f64, baseline: f64) -> f64 {
    if baseline > 0.0 { rate / baseline } else { 1.0 }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeagueBaselines {
    pub avg_home_goals: f64,
    pub avg_away_goals: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SeasonStats {
    pub teams: HashMap<TeamId, TeamRates>,
    pub baselines: LeagueBaselines,
    pub matches: usize,
}

impl Default for LeagueBaselines {
    fn default() -> Self {
        ModelConfig::default().fallback_baselines()
    }
}

impl SeasonStats {
    pub fn team(&self, id: TeamId) -> Option<&TeamRates> {
        self.teams.get(&id)
    }
}

pub fn aggregate(matches: &[CompletedMatch], cfg: &ModelConfig) -> SeasonStats {
    let mut teams: HashMap<TeamId, TeamRates> = HashMap::new();
    let mut total_home_goals = 0u64;
    let mut total_away_goals = 0u64;
    let mut n = 0usize;

    for m in matches {
        let Some((home_goals, away_goals)) = m.score() else {
            continue;
        };
        total_home_goals += home_goals as u64;
        total_away_goals += away_goals as u64;
        n += 1;

        let home = teams.entry(m.home_id).or_default();
        home.home_games += 1;
        home.home_goals_for += home_goals;
        home.home_goals_against += away_goals;

        let away = teams.entry(m.away_id).or_default();
        away.away_games += 1;
        away.away_goals_for += away_goals;
        away.away_goals_against += home_goals;
    }

    let baselines = if n > 0 {
        LeagueBaselines {
            avg_home_goals: total_home_goals as f64 / n as f64,
            avg_away_goals: total_away_goals as f64 / n as f64,
        }
    } else {
        cfg.fallback_baselines()
    };

    SeasonStats {
        teams,
        baselines,
        matches: n,
    }
}
