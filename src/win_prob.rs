use std::collections::HashMap;

use crate::config::ModelConfig;
use crate::team_stats::{LeagueBaselines, SeasonStats, Strength, TeamId, TeamRates};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prob3 {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl Prob3 {
    /// Two-decimal triple summing to 1.00: home and draw are rounded, away
    /// takes the remainder.
    pub fn rounded(self) -> Self {
        let home = round2(self.home);
        let draw = round2(self.draw);
        Self {
            home,
            draw,
            away: round2(1.0 - home - draw),
        }
    }

    pub fn sum(&self) -> f64 {
        self.home + self.draw + self.away
    }
}

/// Expected goals for each side of a fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpectedGoals {
    pub home: f64,
    pub away: f64,
}

pub fn expected_goals(
    home_id: TeamId,
    away_id: TeamId,
    teams: &HashMap<TeamId, TeamRates>,
    baselines: LeagueBaselines,
    cfg: &ModelConfig,
) -> ExpectedGoals {
    let home = teams
        .get(&home_id)
        .and_then(|t| t.home_strength(baselines))
        .unwrap_or(Strength::AVERAGE);
    let away = teams
        .get(&away_id)
        .and_then(|t| t.away_strength(baselines))
        .unwrap_or(Strength::AVERAGE);

    ExpectedGoals {
        home: (home.attack * away.defense * baselines.avg_home_goals)
            .clamp(cfg.lambda_min, cfg.lambda_max),
        away: (away.attack * home.defense * baselines.avg_away_goals)
            .clamp(cfg.lambda_min, cfg.lambda_max),
    }
}

/// Normalised home/draw/away probabilities for an upcoming fixture. Teams
/// without games at the relevant venue count as league average.
pub fn estimate(
    home_id: TeamId,
    away_id: TeamId,
    teams: &HashMap<TeamId, TeamRates>,
    baselines: LeagueBaselines,
    cfg: &ModelConfig,
) -> Prob3 {
    let xg = expected_goals(home_id, away_id, teams, baselines, cfg);
    outcome_probs_poisson(xg.home, xg.away, cfg.max_goals)
}

pub fn estimate_fixture(
    home_id: TeamId,
    away_id: TeamId,
    stats: &SeasonStats,
    cfg: &ModelConfig,
) -> Prob3 {
    estimate(home_id, away_id, &stats.teams, stats.baselines, cfg)
}

/// Sums the independent-Poisson scoreline grid `0..=max_goals` per side into
/// outcome buckets and renormalises away the truncated tail.
pub fn outcome_probs_poisson(lambda_home: f64, lambda_away: f64, max_goals: u32) -> Prob3 {
    let mut p_home = 0.0_f64;
    let mut p_draw = 0.0_f64;
    let mut p_away = 0.0_f64;

    for h in 0..=max_goals {
        for a in 0..=max_goals {
            let p = poisson_pmf(h, lambda_home) * poisson_pmf(a, lambda_away);
            if h > a {
                p_home += p;
            } else if h == a {
                p_draw += p;
            } else {
                p_away += p;
            }
        }
    }

    let sum = p_home + p_draw + p_away;
    if sum > 0.0 {
        Prob3 {
            home: p_home / sum,
            draw: p_draw / sum,
            away: p_away / sum,
        }
    } else {
        Prob3 {
            home: 1.0 / 3.0,
            draw: 1.0 / 3.0,
            away: 1.0 / 3.0,
        }
    }
}

pub fn poisson_pmf(goals: u32, lambda: f64) -> f64 {
    let numer = lambda.powi(goals as i32) * (-lambda).exp();
    let denom = (1..=goals).fold(1.0_f64, |acc, k| acc * k as f64);
    numer / denom
}

// Formatting rounds the exact binary value half-to-even, which is what the
// published dataset has always used. `(x * 100.0).round()` rounds 0.125 up.
fn round2(v: f64) -> f64 {
    format!("{v:.2}").parse().unwrap_or(v)
}
