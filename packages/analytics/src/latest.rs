//! Most recent match per home team.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use vleague_analytics_models::TeamLatestRecord;
use vleague_match_models::MatchRecord;

/// Selects each home team's most recent match.
///
/// Records are stable-sorted by parsed date descending with unparsable
/// dates last, and the first record per home team is kept, so ties keep
/// source order. Records without a home team are ignored.
///
/// Each survivor's trend is its rate minus the rate of the same team's
/// next record in that order, when both rates are known.
///
/// Output is newest first.
#[must_use]
pub fn latest_per_team(records: &[MatchRecord]) -> Vec<TeamLatestRecord> {
    let mut dated: Vec<(Option<chrono::NaiveDate>, &MatchRecord)> = records
        .iter()
        .filter(|r| r.home_team.as_deref().is_some_and(|t| !t.trim().is_empty()))
        .map(|r| (r.match_date(), r))
        .collect();

    // `None < Some(_)`, so reversing puts unparsable dates last.
    dated.sort_by_key(|(date, _)| Reverse(*date));

    let mut latest: Vec<TeamLatestRecord> = Vec::new();
    let mut slots: BTreeMap<&str, (usize, bool)> = BTreeMap::new();

    for (date, record) in dated {
        let Some(team) = record.home_team.as_deref() else {
            continue;
        };

        match slots.get_mut(team) {
            None => {
                slots.insert(team, (latest.len(), false));
                latest.push(TeamLatestRecord {
                    team: team.to_string(),
                    match_date: date,
                    trend: None,
                    record: record.clone(),
                });
            }
            Some((index, compared)) => {
                if *compared {
                    continue;
                }
                *compared = true;
                let entry = &mut latest[*index];
                entry.trend = entry
                    .record
                    .rate()
                    .zip(record.rate())
                    .map(|(current, previous)| current - previous);
            }
        }
    }

    log::debug!(
        "Selected latest match for {} teams out of {} records",
        latest.len(),
        records.len()
    );

    latest
}
