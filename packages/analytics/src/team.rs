//! Per-team viewership report.

use std::cmp::Reverse;

use vleague_analytics_models::{BestMatch, TeamReport};
use vleague_match_models::MatchRecord;

/// Builds a report over `team`'s home games, optionally limited to one
/// season.
///
/// Summary statistics cover rated games only; `match_count` covers every
/// matching game. The best match is the first game holding the maximum
/// rate. Games are listed newest first, ties in source order.
#[must_use]
pub fn team_report(records: &[MatchRecord], team: &str, season: Option<&str>) -> TeamReport {
    let mut matches: Vec<MatchRecord> = records
        .iter()
        .filter(|r| r.home_team.as_deref() == Some(team))
        .filter(|r| season.is_none_or(|s| r.season.as_deref() == Some(s)))
        .cloned()
        .collect();

    let mut sum = 0.0;
    let mut rated = 0_u32;
    let mut min: Option<f64> = None;
    let mut best: Option<&MatchRecord> = None;

    for record in &matches {
        let Some(rate) = record.rate() else {
            continue;
        };
        sum += rate;
        rated += 1;
        min = Some(min.map_or(rate, |m| m.min(rate)));
        if best.and_then(MatchRecord::rate).is_none_or(|b| rate > b) {
            best = Some(record);
        }
    }

    let best_match = best.and_then(|r| {
        Some(BestMatch {
            away_team: r.away_team.clone(),
            date: r.date.clone(),
            weekday: r.weekday.clone(),
            rate: r.rate()?,
        })
    });
    let max = best_match.as_ref().map(|b| b.rate);
    let mean = (rated > 0).then(|| sum / f64::from(rated));

    matches.sort_by_key(|r| Reverse(r.match_date()));

    log::debug!(
        "Team report for {team} (season {}): {} games, {rated} rated",
        season.unwrap_or("all"),
        matches.len()
    );

    TeamReport {
        team: team.to_string(),
        season: season.map(str::to_string),
        match_count: matches.len() as u64,
        mean,
        max,
        min,
        best_match,
        matches,
    }
}
