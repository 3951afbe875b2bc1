use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing::info;

use epl_refresh::config::ModelConfig;
use epl_refresh::football_data::{ApiMatch, parse_matches_json};
use epl_refresh::team_stats::{TeamId, aggregate};
use epl_refresh::win_prob;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    tracing_subscriber::fmt::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let [path, home, away] = args.as_slice() else {
        return Err(anyhow!("usage: fixture_probs <matches.json> <home_id> <away_id>"));
    };
    let path = PathBuf::from(path);
    let home_id: TeamId = home.trim().parse().context("invalid home id")?;
    let away_id: TeamId = away.trim().parse().context("invalid away id")?;

    // Offline: works from a saved match list so the model can be poked at
    // without touching the API.
    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let matches = parse_matches_json(&raw)?;
    let completed = matches.iter().filter_map(ApiMatch::completed).collect::<Vec<_>>();

    let cfg = ModelConfig::from_env();
    let stats = aggregate(&completed, &cfg);
    info!(
        matches = stats.matches,
        avg_home = stats.baselines.avg_home_goals,
        avg_away = stats.baselines.avg_away_goals,
        "aggregated season stats"
    );
    let xg = win_prob::expected_goals(home_id, away_id, &stats.teams, stats.baselines, &cfg);
    let probs = win_prob::estimate_fixture(home_id, away_id, &stats, &cfg).rounded();

    println!("Completed matches: {}", stats.matches);
    println!(
        "League avg: home {:.2}, away {:.2}",
        stats.baselines.avg_home_goals, stats.baselines.avg_away_goals
    );
    println!("xG: home {:.3}, away {:.3}", xg.home, xg.away);
    println!("Home: {:.2}", probs.home);
    println!("Draw: {:.2}", probs.draw);
    println!("Away: {:.2}", probs.away);

    Ok(())
}
