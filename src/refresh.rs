use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::baked_data::{self, BakedData, BakedFixture};
use crate::config::RefreshConfig;
use crate::fixture_select::{self, SelectionWarning, TeamTally};
use crate::football_data::{ApiMatch, StandingsTable};
use crate::team_stats::{self, CompletedMatch, SeasonStats};
use crate::win_prob::{self, Prob3};

#[derive(Debug, Clone)]
pub struct FixtureEstimate {
    pub matchday: u32,
    pub fixture: ApiMatch,
    pub probs: Prob3,
}

#[derive(Debug, Clone)]
pub struct RefreshReport {
    pub data: BakedData,
    pub stats: SeasonStats,
    pub candidates: usize,
    /// Distinct matchweeks of the selected fixtures, ascending.
    pub matchdays: Vec<u32>,
    pub estimates: Vec<FixtureEstimate>,
    pub warnings: Vec<SelectionWarning>,
    pub tallies: Vec<TeamTally>,
}

impl RefreshReport {
    pub fn removed(&self) -> usize {
        self.candidates.saturating_sub(self.estimates.len())
    }
}

pub fn run(
    standings: &StandingsTable,
    all_matches: &[ApiMatch],
    cfg: &RefreshConfig,
    fetched_on: &str,
) -> RefreshReport {
    let completed: Vec<CompletedMatch> =
        all_matches.iter().filter_map(ApiMatch::completed).collect();
    let stats = team_stats::aggregate(&completed, &cfg.model);
    info!(
        matches = stats.matches,
        avg_home = stats.baselines.avg_home_goals,
        avg_away = stats.baselines.avg_away_goals,
        "aggregated season stats"
    );

    let candidates = fixture_select::unplayed_focus_matches(all_matches, cfg);
    let candidate_count = candidates.len();
    let mut selection = fixture_select::select_fixtures(candidates, standings, all_matches, cfg);
    for w in &selection.warnings {
        warn!("{w}");
    }
    if selection.fixtures.len() != candidate_count {
        info!(
            removed = candidate_count - selection.fixtures.len(),
            "dropped fixtures that failed validation"
        );
    }
    baked_data::sort_fixtures(&mut selection.fixtures);
    let matchdays = selection.matchdays();

    // Order-preserving, so output matches a sequential pass. Selection has
    // already dropped fixtures without a matchday.
    let estimates: Vec<FixtureEstimate> = selection
        .fixtures
        .into_par_iter()
        .filter_map(|fixture| {
            let matchday = fixture.matchday?;
            let probs =
                win_prob::estimate_fixture(fixture.home.id, fixture.away.id, &stats, &cfg.model)
                    .rounded();
            Some(FixtureEstimate {
                matchday,
                fixture,
                probs,
            })
        })
        .collect();
    for e in &estimates {
        debug!(
            matchday = e.matchday,
            home = %e.fixture.home.short_name,
            away = %e.fixture.away.short_name,
            w = e.probs.home,
            d = e.probs.draw,
            l = e.probs.away,
            "fixture probabilities"
        );
    }

    let fixtures: Vec<ApiMatch> = estimates.iter().map(|e| e.fixture.clone()).collect();
    let tallies = fixture_select::tally_focus_teams(&fixtures, standings, cfg);
    for t in tallies.iter().filter(|t| t.exceeds_season()) {
        warn!(team = %t.name, total = t.total(), "total exceeds {} matches", t.season_games);
    }

    let baked = estimates
        .iter()
        .map(|e| BakedFixture::new(e.matchday, &e.fixture, e.probs))
        .collect();
    let data = baked_data::build_baked_data(
        fetched_on,
        standings.current_matchday,
        &standings.rows,
        baked,
    );
    info!(
        standings = data.standings.len(),
        fixtures = data.fixtures.len(),
        matchweeks = %baked_data::matchweek_label(data.matchweeks),
        "refresh assembled"
    );

    RefreshReport {
        data,
        stats,
        candidates: candidate_count,
        matchdays,
        estimates,
        warnings: selection.warnings,
        tallies,
    }
}
