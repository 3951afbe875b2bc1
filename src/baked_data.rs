use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::football_data::{ApiMatch, StandingRow};
use crate::team_stats::TeamId;
use crate::win_prob::Prob3;

/// Dataset embedded in the simulator page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BakedData {
    pub fetched_on: String,
    pub current_matchday: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matchweeks: Option<MatchweekRange>,
    pub standings: Vec<BakedStanding>,
    pub fixtures: Vec<BakedFixture>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchweekRange {
    pub first: u32,
    pub last: u32,
}

impl fmt::Display for MatchweekRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\u{2013}{}", self.first, self.last)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BakedStanding {
    pub id: TeamId,
    pub name: String,
    pub short_name: String,
    pub crest: String,
    pub p: u32,
    pub w: u32,
    pub d: u32,
    pub l: u32,
    pub gf: u32,
    pub ga: u32,
    pub gd: i32,
    pub pts: u32,
}

impl From<&StandingRow> for BakedStanding {
    fn from(row: &StandingRow) -> Self {
        Self {
            id: row.team.id,
            name: row.team.name.clone(),
            short_name: row.team.short_name.clone(),
            crest: row.team.crest.clone(),
            p: row.played,
            w: row.won,
            d: row.draw,
            l: row.lost,
            gf: row.goals_for,
            ga: row.goals_against,
            gd: row.goal_difference,
            pts: row.points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BakedFixture {
    pub matchday: u32,
    pub date: String,
    pub home_id: TeamId,
    pub home_name: String,
    pub home_short: String,
    pub home_crest: String,
    pub away_id: TeamId,
    pub away_name: String,
    pub away_short: String,
    pub away_crest: String,
    #[serde(rename = "probW")]
    pub prob_w: f64,
    #[serde(rename = "probD")]
    pub prob_d: f64,
    #[serde(rename = "probL")]
    pub prob_l: f64,
}

impl BakedFixture {
    pub fn new(matchday: u32, m: &ApiMatch, probs: Prob3) -> Self {
        Self {
            matchday,
            date: m.date().to_string(),
            home_id: m.home.id,
            home_name: m.home.name.clone(),
            home_short: m.home.short_name.clone(),
            home_crest: m.home.crest.clone(),
            away_id: m.away.id,
            away_name: m.away.name.clone(),
            away_short: m.away.short_name.clone(),
            away_crest: m.away.crest.clone(),
            prob_w: probs.home,
            prob_d: probs.draw,
            prob_l: probs.away,
        }
    }
}

/// Fixtures must already be in display order, see [`sort_fixtures`].
pub fn build_baked_data(
    fetched_on: &str,
    current_matchday: Option<u32>,
    standings: &[StandingRow],
    fixtures: Vec<BakedFixture>,
) -> BakedData {
    BakedData {
        fetched_on: fetched_on.to_string(),
        current_matchday,
        matchweeks: matchweek_range(&fixtures),
        standings: standings.iter().map(BakedStanding::from).collect(),
        fixtures,
    }
}

/// Orders by matchday, then kickoff.
pub fn sort_fixtures(fixtures: &mut [ApiMatch]) {
    fixtures.sort_by(|a, b| {
        a.matchday
            .cmp(&b.matchday)
            .then_with(|| a.utc_date.cmp(&b.utc_date))
    });
}

pub fn matchweek_range(fixtures: &[BakedFixture]) -> Option<MatchweekRange> {
    let first = fixtures.iter().map(|f| f.matchday).min()?;
    let last = fixtures.iter().map(|f| f.matchday).max()?;
    Some(MatchweekRange { first, last })
}

pub fn matchweek_label(range: Option<MatchweekRange>) -> String {
    range
        .map(|r| r.to_string())
        .unwrap_or_else(|| "none".to_string())
}

/// "Feb 27, 2026" style, no padding on the day.
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn today_stamp() -> String {
    date_stamp(chrono::Local::now().date_naive())
}

pub fn write_baked_data(path: &Path, data: &BakedData) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(data).context("serialize baked data")?;
    fs::write(&tmp, json).context("write baked data")?;
    fs::rename(&tmp, path).context("swap baked data")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::football_data::{MatchStatus, Score, TeamRef};

    fn api_match(matchday: u32, utc: &str) -> ApiMatch {
        ApiMatch {
            id: 1,
            utc_date: utc.to_string(),
            matchday: Some(matchday),
            status: MatchStatus::Timed,
            home: TeamRef {
                id: 58,
                name: "Aston Villa FC".to_string(),
                short_name: "Aston Villa".to_string(),
                crest: "https://crests.football-data.org/58.png".to_string(),
            },
            away: TeamRef {
                id: 61,
                name: "Chelsea FC".to_string(),
                short_name: "Chelsea".to_string(),
                crest: "https://crests.football-data.org/61.png".to_string(),
            },
            score: Score::default(),
        }
    }

    #[test]
    fn date_stamp_has_no_leading_zero() {
        let d = NaiveDate::from_ymd_opt(2026, 2, 7).unwrap();
        assert_eq!(date_stamp(d), "Feb 7, 2026");
        let d = NaiveDate::from_ymd_opt(2026, 11, 27).unwrap();
        assert_eq!(date_stamp(d), "Nov 27, 2026");
    }

    #[test]
    fn fixtures_sort_by_matchday_then_kickoff() {
        let mut rows = vec![
            api_match(30, "2026-03-15T14:00:00Z"),
            api_match(29, "2026-03-08T16:30:00Z"),
            api_match(29, "2026-03-07T12:30:00Z"),
        ];
        sort_fixtures(&mut rows);
        let dates: Vec<_> = rows.iter().map(|m| m.date()).collect();
        assert_eq!(dates, vec!["2026-03-07", "2026-03-08", "2026-03-15"]);
    }

    #[test]
    fn fixture_serializes_with_page_field_names() {
        let probs = Prob3 {
            home: 0.45,
            draw: 0.27,
            away: 0.28,
        };
        let f = BakedFixture::new(29, &api_match(29, "2026-03-07T12:30:00Z"), probs);
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(v["date"], "2026-03-07");
        assert_eq!(v["homeId"], 58);
        assert_eq!(v["homeShort"], "Aston Villa");
        assert_eq!(v["awayCrest"], "https://crests.football-data.org/61.png");
        assert_eq!(v["probW"], 0.45);
        assert_eq!(v["probD"], 0.27);
        assert_eq!(v["probL"], 0.28);
    }

    #[test]
    fn matchweek_range_and_label() {
        let probs = Prob3 {
            home: 0.4,
            draw: 0.3,
            away: 0.3,
        };
        let fixtures = vec![
            BakedFixture::new(29, &api_match(29, "2026-03-07T12:30:00Z"), probs),
            BakedFixture::new(38, &api_match(38, "2026-05-24T15:00:00Z"), probs),
        ];
        let range = matchweek_range(&fixtures);
        assert_eq!(range, Some(MatchweekRange { first: 29, last: 38 }));
        assert_eq!(matchweek_label(range), "29\u{2013}38");
        assert_eq!(matchweek_label(matchweek_range(&[])), "none");
    }

    #[test]
    fn write_goes_through_temp_file() {
        let dir = std::env::temp_dir().join(format!("epl_refresh_baked_{}", std::process::id()));
        let path = dir.join("nested").join("baked_data.json");
        let data = build_baked_data("Feb 27, 2026", Some(27), &[], Vec::new());
        write_baked_data(&path, &data).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
        let back: BakedData = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, data);
        let _ = fs::remove_dir_all(&dir);
    }
}
