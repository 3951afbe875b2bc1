use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use epl_refresh::baked_data::{self, write_baked_data};
use epl_refresh::config::RefreshConfig;
use epl_refresh::football_data::{parse_matches_json, parse_standings_json};
use epl_refresh::refresh;

const DEFAULT_STANDINGS: &str = "data/standings.json";
const DEFAULT_MATCHES: &str = "data/matches.json";
const DEFAULT_OUT: &str = "data/baked_data.json";

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    tracing_subscriber::fmt::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let standings_path =
        parse_path_arg(&args, "standings").unwrap_or_else(|| PathBuf::from(DEFAULT_STANDINGS));
    let matches_path =
        parse_path_arg(&args, "matches").unwrap_or_else(|| PathBuf::from(DEFAULT_MATCHES));
    let out_path = parse_path_arg(&args, "out").unwrap_or_else(|| PathBuf::from(DEFAULT_OUT));

    let cfg = RefreshConfig::from_env();
    let standings = parse_standings_json(&read(&standings_path)?)
        .with_context(|| format!("parse {}", standings_path.display()))?;
    let matches = parse_matches_json(&read(&matches_path)?)
        .with_context(|| format!("parse {}", matches_path.display()))?;

    let fetched_on = baked_data::today_stamp();
    let report = refresh::run(&standings, &matches, &cfg, &fetched_on);
    write_baked_data(&out_path, &report.data)?;

    println!("Data refresh complete");
    if let Some(md) = standings.current_matchday {
        println!("Current matchday: {md}");
    }
    println!("Teams: {}", standings.rows.len());
    println!("Total matches: {}", matches.len());
    println!(
        "League avg goals/match: home {:.2}, away {:.2}",
        report.stats.baselines.avg_home_goals, report.stats.baselines.avg_away_goals
    );
    println!("Focus team unplayed: {}", report.candidates);
    for w in &report.warnings {
        println!(" - {w}");
    }
    if report.removed() > 0 {
        println!("Removed {} fixture(s) that failed validation", report.removed());
    }
    println!("Valid fixtures: {}", report.estimates.len());
    if let (Some(first), Some(last)) = (report.matchdays.first(), report.matchdays.last()) {
        println!(
            "Matchweeks: {first}-{last} ({} weeks)",
            report.matchdays.len()
        );
    }
    for e in &report.estimates {
        println!(
            "MW{} {} vs {}: W={:.0}% D={:.0}% L={:.0}%",
            e.matchday,
            e.fixture.home.short_name,
            e.fixture.away.short_name,
            e.probs.home * 100.0,
            e.probs.draw * 100.0,
            e.probs.away * 100.0
        );
    }
    for t in &report.tallies {
        println!(
            "{}: {} played + {} remaining = {} total",
            t.name,
            t.played,
            t.remaining,
            t.total()
        );
        if t.exceeds_season() {
            println!("  WARNING: total exceeds {} matches", t.season_games);
        } else if t.unaccounted() > 0 {
            println!("  NOTE: {} matches unaccounted (non-focus opponent games)", t.unaccounted());
        }
    }
    println!("Wrote {}", out_path.display());
    println!("Date stamp: {fetched_on}");

    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn parse_path_arg(args: &[String], name: &str) -> Option<PathBuf> {
    let flag = format!("--{name}");
    let prefix = format!("--{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefix) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if *arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
