//! Grouped mean/count/max aggregation.

use std::collections::BTreeMap;

use vleague_analytics_models::{GroupAggregate, GroupKey, SortDirection};
use vleague_match_models::MatchRecord;

#[derive(Default)]
struct Acc {
    sum: f64,
    count: u64,
    max: f64,
}

/// Groups `records` by `key` and aggregates `value` per group.
///
/// Records where either extractor returns `None` are excluded before
/// grouping. Output is ordered by key ascending.
pub fn aggregate<'a, K, V>(records: &'a [MatchRecord], key: K, value: V) -> Vec<GroupAggregate>
where
    K: Fn(&'a MatchRecord) -> Option<&'a str>,
    V: Fn(&MatchRecord) -> Option<f64>,
{
    let mut groups: BTreeMap<&str, Acc> = BTreeMap::new();

    for record in records {
        let (Some(k), Some(v)) = (key(record), value(record)) else {
            continue;
        };

        let acc = groups.entry(k).or_insert_with(|| Acc {
            max: f64::NEG_INFINITY,
            ..Acc::default()
        });
        acc.sum += v;
        acc.count += 1;
        acc.max = acc.max.max(v);
    }

    groups
        .into_iter()
        .map(|(key, acc)| {
            #[allow(clippy::cast_precision_loss)]
            let mean = acc.sum / acc.count as f64;
            GroupAggregate {
                key: key.to_string(),
                mean,
                count: acc.count,
                max: acc.max,
            }
        })
        .collect()
}

/// Aggregates the household rate by one of the standard [`GroupKey`]s.
#[must_use]
pub fn aggregate_by(records: &[MatchRecord], key: GroupKey) -> Vec<GroupAggregate> {
    aggregate(records, |r| key.extract(r), MatchRecord::rate)
}

/// Sorts aggregates by mean rate. The sort is stable, so groups with equal
/// means keep their incoming order.
#[must_use]
pub fn rank(mut aggregates: Vec<GroupAggregate>, direction: SortDirection) -> Vec<GroupAggregate> {
    match direction {
        SortDirection::Ascending => aggregates.sort_by(|a, b| a.mean.total_cmp(&b.mean)),
        SortDirection::Descending => aggregates.sort_by(|a, b| b.mean.total_cmp(&a.mean)),
    }
    aggregates
}

/// Keeps the first `n` aggregates.
#[must_use]
pub fn top(mut aggregates: Vec<GroupAggregate>, n: usize) -> Vec<GroupAggregate> {
    aggregates.truncate(n);
    aggregates
}
