//! Match listings and data-quality diagnostics.

use std::collections::BTreeSet;

use vleague_match_models::{MatchField, MatchRecord};

/// Matches with both a home stadium and a home city, highest rate first.
///
/// Unrated matches sort last; ties keep source order.
#[must_use]
pub fn ranked_matches(records: &[MatchRecord]) -> Vec<&MatchRecord> {
    let mut matches: Vec<&MatchRecord> = records
        .iter()
        .filter(|r| r.has(MatchField::HomeStadium) && r.has(MatchField::HomeCity))
        .collect();

    matches.sort_by(|a, b| match (a.rate(), b.rate()) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    matches
}

/// Distinct raw venue names of matches whose home stadium is missing, in
/// first-seen order.
#[must_use]
pub fn missing_stadium_venues(records: &[MatchRecord]) -> Vec<&str> {
    let mut seen = BTreeSet::new();

    records
        .iter()
        .filter(|r| !r.has(MatchField::HomeStadium))
        .filter_map(|r| r.venue.as_deref().map(str::trim))
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(*v))
        .collect()
}

/// Number of matches missing a home stadium.
#[must_use]
pub fn missing_stadium_count(records: &[MatchRecord]) -> usize {
    records
        .iter()
        .filter(|r| !r.has(MatchField::HomeStadium))
        .count()
}
