//! Required-field filtering.

use vleague_match_models::{MatchField, MatchRecord};

/// Keeps only the records where every field in `required` is present.
///
/// Order is preserved. Dropped rows are treated as unusable, not as
/// errors.
#[must_use]
pub fn drop_missing(records: Vec<MatchRecord>, required: &[MatchField]) -> Vec<MatchRecord> {
    let before = records.len();
    let kept: Vec<MatchRecord> = records
        .into_iter()
        .filter(|r| required.iter().all(|f| r.has(*f)))
        .collect();

    if kept.len() < before {
        log::debug!(
            "Dropped {} of {before} rows missing one of {required:?}",
            before - kept.len()
        );
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(city: Option<&str>, rate: Option<f64>) -> MatchRecord {
        MatchRecord {
            home_city: city.map(str::to_string),
            household_rate: rate,
            ..MatchRecord::default()
        }
    }

    #[test]
    fn drops_rows_missing_any_required_field() {
        let records = vec![
            record(Some("수원시"), Some(0.7)),
            record(None, Some(0.9)),
            record(Some("김천시"), None),
            record(Some("대전광역시"), Some(f64::NAN)),
            record(Some("천안시"), Some(1.1)),
        ];
        let kept = drop_missing(records, &[MatchField::HomeCity, MatchField::Rate]);
        let cities: Vec<_> = kept.iter().filter_map(|r| r.home_city.as_deref()).collect();
        assert_eq!(cities, vec!["수원시", "천안시"]);
    }

    #[test]
    fn no_required_fields_keeps_everything() {
        let records = vec![record(None, None), record(Some("인천"), None)];
        assert_eq!(drop_missing(records, &[]).len(), 2);
    }
}
