use std::fmt;

use crate::config::RefreshConfig;
use crate::football_data::{ApiMatch, MatchStatus, StandingsTable};
use crate::team_stats::TeamId;

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionWarning {
    /// Standings and the match list disagree on games played.
    PlayedMismatch {
        team: String,
        standings_played: u32,
        finished: u32,
    },
    /// Candidate fixture whose entry in the full list is no longer pending.
    Excluded {
        matchday: Option<u32>,
        home: String,
        away: String,
        status: MatchStatus,
    },
    /// Candidate fixture the feed has not assigned to a matchweek.
    NoMatchday { home: String, away: String },
}

impl fmt::Display for SelectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionWarning::PlayedMismatch {
                team,
                standings_played,
                finished,
            } => write!(
                f,
                "WARNING: {team} standings say {standings_played} played, but API shows {finished} finished matches"
            ),
            SelectionWarning::Excluded {
                matchday,
                home,
                away,
                status,
            } => write!(
                f,
                "EXCLUDED: MW{} {home} vs {away} - status is '{status}', not schedulable",
                matchday.map(|m| m.to_string()).unwrap_or_else(|| "?".to_string())
            ),
            SelectionWarning::NoMatchday { home, away } => {
                write!(f, "SKIPPED: {home} vs {away} - no matchday assigned")
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub fixtures: Vec<ApiMatch>,
    pub warnings: Vec<SelectionWarning>,
}

impl Selection {
    pub fn matchdays(&self) -> Vec<u32> {
        let mut days: Vec<u32> = self.fixtures.iter().filter_map(|f| f.matchday).collect();
        days.sort_unstable();
        days.dedup();
        days
    }
}

/// Played plus remaining fixtures for one focus team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamTally {
    pub team_id: TeamId,
    pub name: String,
    pub played: u32,
    pub remaining: u32,
    pub season_games: u32,
}

impl TeamTally {
    pub fn total(&self) -> u32 {
        self.played + self.remaining
    }

    pub fn exceeds_season(&self) -> bool {
        self.total() > self.season_games
    }

    /// Games neither played nor among the selected fixtures (those against
    /// other non-focus sides are not tracked).
    pub fn unaccounted(&self) -> u32 {
        self.season_games.saturating_sub(self.total())
    }
}

pub fn is_focus_match(m: &ApiMatch, cfg: &RefreshConfig) -> bool {
    cfg.is_focus(m.home.id) || cfg.is_focus(m.away.id)
}

pub fn unplayed_focus_matches(all_matches: &[ApiMatch], cfg: &RefreshConfig) -> Vec<ApiMatch> {
    all_matches
        .iter()
        .filter(|m| is_focus_match(m, cfg) && m.status.is_unplayed())
        .cloned()
        .collect()
}

/// Cross-checks candidate fixtures against standings and the full match list.
pub fn select_fixtures(
    candidates: Vec<ApiMatch>,
    standings: &StandingsTable,
    all_matches: &[ApiMatch],
    cfg: &RefreshConfig,
) -> Selection {
    let mut warnings = Vec::new();

    for &team_id in &cfg.focus_ids {
        let played = standings.team(team_id).map(|r| r.played).unwrap_or(0);
        let finished = all_matches
            .iter()
            .filter(|m| m.involves(team_id) && !m.status.is_unplayed())
            .count() as u32;
        if played != finished {
            warnings.push(SelectionWarning::PlayedMismatch {
                team: team_name(standings, team_id, false),
                standings_played: played,
                finished,
            });
        }
    }

    let mut fixtures = Vec::with_capacity(candidates.len());
    for f in candidates {
        if f.matchday.is_none() {
            warnings.push(SelectionWarning::NoMatchday {
                home: f.home.short_name.clone(),
                away: f.away.short_name.clone(),
            });
            continue;
        }
        let entry = all_matches.iter().find(|m| {
            m.matchday == f.matchday && m.home.id == f.home.id && m.away.id == f.away.id
        });
        if let Some(entry) = entry
            && !entry.status.is_unplayed()
        {
            warnings.push(SelectionWarning::Excluded {
                matchday: f.matchday,
                home: f.home.short_name.clone(),
                away: f.away.short_name.clone(),
                status: entry.status,
            });
            continue;
        }
        fixtures.push(f);
    }

    Selection { fixtures, warnings }
}

pub fn tally_focus_teams(
    fixtures: &[ApiMatch],
    standings: &StandingsTable,
    cfg: &RefreshConfig,
) -> Vec<TeamTally> {
    let mut ids = cfg.focus_ids.clone();
    ids.sort_unstable();
    ids.into_iter()
        .map(|team_id| TeamTally {
            team_id,
            name: team_name(standings, team_id, true),
            played: standings.team(team_id).map(|r| r.played).unwrap_or(0),
            remaining: fixtures.iter().filter(|f| f.involves(team_id)).count() as u32,
            season_games: cfg.season_games,
        })
        .collect()
}

fn team_name(standings: &StandingsTable, team_id: TeamId, short: bool) -> String {
    match standings.team(team_id) {
        Some(row) if short => row.team.short_name.clone(),
        Some(row) => row.team.name.clone(),
        None => team_id.to_string(),
    }
}
