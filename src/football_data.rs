use std::fmt;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Deserializer};

use crate::team_stats::{CompletedMatch, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    Timed,
    InPlay,
    Paused,
    ExtraTime,
    PenaltyShootout,
    Finished,
    Suspended,
    Postponed,
    Cancelled,
    Awarded,
    #[serde(other)]
    Other,
}

impl MatchStatus {
    /// Still to be kicked off. Postponed games are not counted until they get
    /// a new date.
    pub fn is_unplayed(self) -> bool {
        matches!(self, MatchStatus::Scheduled | MatchStatus::Timed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::Timed => "TIMED",
            MatchStatus::InPlay => "IN_PLAY",
            MatchStatus::Paused => "PAUSED",
            MatchStatus::ExtraTime => "EXTRA_TIME",
            MatchStatus::PenaltyShootout => "PENALTY_SHOOTOUT",
            MatchStatus::Finished => "FINISHED",
            MatchStatus::Suspended => "SUSPENDED",
            MatchStatus::Postponed => "POSTPONED",
            MatchStatus::Cancelled => "CANCELLED",
            MatchStatus::Awarded => "AWARDED",
            MatchStatus::Other => "OTHER",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamRef {
    pub id: TeamId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "shortName", default, deserialize_with = "null_as_empty")]
    pub short_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub crest: String,
}

// Display-only strings; the feed sometimes sends `null` for them.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Score {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiMatch {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "utcDate", default)]
    pub utc_date: String,
    #[serde(default)]
    pub matchday: Option<u32>,
    pub status: MatchStatus,
    #[serde(rename = "homeTeam")]
    pub home: TeamRef,
    #[serde(rename = "awayTeam")]
    pub away: TeamRef,
    #[serde(default, deserialize_with = "full_time_score")]
    pub score: Score,
}

impl ApiMatch {
    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home.id == team_id || self.away.id == team_id
    }

    /// Result of a finished match, goals left `None` where the feed had no
    /// full-time value.
    pub fn completed(&self) -> Option<CompletedMatch> {
        if self.status != MatchStatus::Finished {
            return None;
        }
        Some(CompletedMatch {
            home_id: self.home.id,
            away_id: self.away.id,
            home_goals: self.score.home,
            away_goals: self.score.away,
        })
    }

    pub fn date(&self) -> &str {
        self.utc_date.get(..10).unwrap_or(&self.utc_date)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StandingRow {
    pub team: TeamRef,
    pub played: u32,
    pub won: u32,
    pub draw: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StandingsTable {
    pub current_matchday: Option<u32>,
    pub rows: Vec<StandingRow>,
}

impl StandingsTable {
    pub fn team(&self, id: TeamId) -> Option<&StandingRow> {
        self.rows.iter().find(|r| r.team.id == id)
    }
}

#[derive(Debug, Deserialize)]
struct StandingsResponse {
    #[serde(default)]
    season: Option<SeasonInfo>,
    #[serde(default)]
    standings: Vec<StandingsGroup>,
}

#[derive(Debug, Deserialize)]
struct SeasonInfo {
    #[serde(rename = "currentMatchday")]
    current_matchday: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct StandingsGroup {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    table: Vec<TableEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableEntry {
    team: TeamRef,
    played_games: u32,
    won: u32,
    draw: u32,
    lost: u32,
    goals_for: u32,
    goals_against: u32,
    goal_difference: i32,
    points: u32,
}

#[derive(Debug, Deserialize)]
struct MatchesResponse {
    #[serde(default)]
    matches: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ScoreBlock {
    #[serde(rename = "fullTime", default)]
    full_time: Score,
}

fn full_time_score<'de, D>(deserializer: D) -> std::result::Result<Score, D::Error>
where
    D: Deserializer<'de>,
{
    let block = Option::<ScoreBlock>::deserialize(deserializer)?;
    Ok(block.map(|b| b.full_time).unwrap_or_default())
}

pub fn parse_standings_json(raw: &str) -> Result<StandingsTable> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow!("empty standings response"));
    }
    let resp: StandingsResponse =
        serde_json::from_str(trimmed).context("invalid standings json")?;

    let total = resp
        .standings
        .iter()
        .position(|g| g.kind.as_deref() == Some("TOTAL"))
        .unwrap_or(0);
    let Some(group) = resp.standings.into_iter().nth(total) else {
        return Err(anyhow!("standings response has no table"));
    };

    let rows = group
        .table
        .into_iter()
        .map(|t| StandingRow {
            team: t.team,
            played: t.played_games,
            won: t.won,
            draw: t.draw,
            lost: t.lost,
            goals_for: t.goals_for,
            goals_against: t.goals_against,
            goal_difference: t.goal_difference,
            points: t.points,
        })
        .collect();

    Ok(StandingsTable {
        current_matchday: resp.season.and_then(|s| s.current_matchday),
        rows,
    })
}

/// Parses the season's match list. Entries that do not decode are skipped so
/// one odd record does not sink the refresh.
pub fn parse_matches_json(raw: &str) -> Result<Vec<ApiMatch>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let resp: MatchesResponse = serde_json::from_str(trimmed).context("invalid matches json")?;
    Ok(resp
        .matches
        .into_iter()
        .filter_map(|v| serde_json::from_value::<ApiMatch>(v).ok())
        .collect())
}
