use std::fs;
use std::path::PathBuf;

use epl_refresh::football_data::{MatchStatus, parse_matches_json, parse_standings_json};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_standings_fixture() {
    let raw = read_fixture("standings.json");
    let table = parse_standings_json(&raw).expect("fixture should parse");
    assert_eq!(table.current_matchday, Some(3));
    assert_eq!(table.rows.len(), 6);
    assert_eq!(table.rows[0].team.id, 61);
    assert_eq!(table.rows[0].points, 6);
    assert_eq!(table.rows[0].goal_difference, 4);

    let utd = table.team(66).expect("man united row");
    assert_eq!(utd.team.short_name, "Man United");
    assert_eq!(utd.team.crest, "https://crests.football-data.org/66.png");
    assert_eq!(utd.played, 2);
    assert_eq!(utd.goal_difference, -3);
}

#[test]
fn parses_matches_fixture() {
    let raw = read_fixture("matches.json");
    let rows = parse_matches_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 12);

    assert_eq!(rows[0].status, MatchStatus::Finished);
    assert_eq!(rows[0].home.id, 64);
    assert_eq!(rows[0].score.home, Some(2));
    assert_eq!(rows[0].score.away, Some(1));

    let finished_without_score = &rows[5];
    assert_eq!(finished_without_score.status, MatchStatus::Finished);
    assert_eq!(finished_without_score.score.home, None);

    assert_eq!(rows[8].status, MatchStatus::InPlay);
    assert_eq!(rows[10].status, MatchStatus::Postponed);
    assert_eq!(rows[11].matchday, Some(4));
    assert_eq!(rows[11].date(), "2026-03-21");
}

#[test]
fn completed_matches_keep_missing_scores_for_aggregation_to_drop() {
    let raw = read_fixture("matches.json");
    let rows = parse_matches_json(&raw).expect("fixture should parse");
    let completed = rows.iter().filter_map(|m| m.completed()).collect::<Vec<_>>();
    assert_eq!(completed.len(), 6);
    assert_eq!(
        completed.iter().filter(|m| m.home_goals.is_none()).count(),
        1
    );
}

#[test]
fn null_team_strings_do_not_drop_matches() {
    let raw = r#"{
      "matches": [
        {
          "id": 9001,
          "utcDate": "2026-03-07T15:00:00Z",
          "status": "FINISHED",
          "matchday": 3,
          "homeTeam": {"id": 1044, "name": "AFC Bournemouth", "shortName": null, "crest": null},
          "awayTeam": {"id": 66, "name": "Manchester United FC", "shortName": "Man United", "crest": "https://crests.football-data.org/66.png"},
          "score": {"fullTime": {"home": 1, "away": 1}}
        },
        {
          "id": 9002,
          "utcDate": "2026-03-08T14:00:00Z",
          "status": "FINISHED",
          "matchday": 3,
          "homeTeam": {"id": 58, "name": null, "shortName": "Aston Villa", "crest": null},
          "awayTeam": {"id": 1044, "name": "AFC Bournemouth", "shortName": null, "crest": null},
          "score": {"fullTime": {"home": 2, "away": 0}}
        }
      ]
    }"#;
    let rows = parse_matches_json(raw).expect("matches should parse");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].home.short_name, "");
    assert_eq!(rows[0].home.crest, "");
    assert_eq!(rows[1].home.name, "");
    assert_eq!(rows[1].home.short_name, "Aston Villa");
    let completed = rows.iter().filter_map(|m| m.completed()).collect::<Vec<_>>();
    assert_eq!(completed.len(), 2);
}

#[test]
fn null_crest_in_standings_still_parses() {
    let raw = r#"{
      "season": {"currentMatchday": 3},
      "standings": [
        {
          "type": "TOTAL",
          "table": [
            {
              "team": {"id": 1044, "name": "AFC Bournemouth", "shortName": null, "crest": null},
              "playedGames": 2, "won": 1, "draw": 1, "lost": 0,
              "goalsFor": 3, "goalsAgainst": 1, "goalDifference": 2, "points": 4
            }
          ]
        }
      ]
    }"#;
    let table = parse_standings_json(raw).expect("standings should parse");
    assert_eq!(table.rows.len(), 1);
    let row = table.team(1044).expect("bournemouth row");
    assert_eq!(row.team.name, "AFC Bournemouth");
    assert_eq!(row.team.crest, "");
    assert_eq!(row.points, 4);
}
