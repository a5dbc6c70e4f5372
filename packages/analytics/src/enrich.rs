//! Joins aggregates with static display metadata for the map widget.

use vleague_analytics_models::{
    CityMapEntry, GroupAggregate, Intensity, TeamLatestRecord, TeamMapEntry,
};
use vleague_lookup::LookupTables;

/// Mean rate, in percent, at or above which a city is highlighted.
pub const HIGH_INTENSITY_THRESHOLD: f64 = 1.0;

/// Rounds to 4 decimal places.
#[must_use]
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Intensity class for a mean rate.
#[must_use]
pub fn intensity(mean: f64) -> Intensity {
    if mean >= HIGH_INTENSITY_THRESHOLD {
        Intensity::High
    } else {
        Intensity::Normal
    }
}

/// Maps city aggregates onto map markers.
#[must_use]
pub fn city_map_entries(aggregates: &[GroupAggregate], lookup: &LookupTables) -> Vec<CityMapEntry> {
    aggregates
        .iter()
        .map(|agg| {
            let coords = lookup.city(&agg.key);
            CityMapEntry {
                name: agg.key.clone(),
                stadium: coords.display_name,
                lat: coords.lat,
                lng: coords.lng,
                value: round4(agg.mean),
                count: agg.count,
                max: round4(agg.max),
                intensity: intensity(agg.mean),
            }
        })
        .collect()
}

/// Maps each team's latest match onto a logo marker.
///
/// The marker is placed at the record's home city, falling back to the
/// team's configured home city.
#[must_use]
pub fn team_map_entries(latest: &[TeamLatestRecord], lookup: &LookupTables) -> Vec<TeamMapEntry> {
    latest
        .iter()
        .map(|entry| {
            let city = entry
                .record
                .home_city
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .or_else(|| lookup.team_home_city(&entry.team))
                .unwrap_or_default();
            let coords = lookup.city(city);
            let trend = entry.trend.map(round4);

            TeamMapEntry {
                name: entry.team.clone(),
                stadium: coords.display_name,
                lat: coords.lat,
                lng: coords.lng,
                logo: lookup.logo(&entry.team).to_string(),
                match_date: entry.record.date.clone(),
                rate: entry.record.rate().map(round4),
                trend,
                trend_up: trend.is_some_and(|t| t >= 0.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vleague_match_models::MatchRecord;

    fn lookup() -> LookupTables {
        LookupTables::embedded().unwrap()
    }

    fn agg(key: &str, mean: f64, max: f64) -> GroupAggregate {
        GroupAggregate {
            key: key.to_string(),
            mean,
            count: 3,
            max,
        }
    }

    #[test]
    fn rounds_to_four_places() {
        assert!((round4(0.123_456) - 0.1235).abs() < 1e-12);
        assert!((round4(1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn intensity_threshold_is_inclusive() {
        assert_eq!(intensity(1.0), Intensity::High);
        assert_eq!(intensity(1.7), Intensity::High);
        assert_eq!(intensity(0.9999), Intensity::Normal);
    }

    #[test]
    fn maps_known_city_to_stadium() {
        let entries = city_map_entries(&[agg("수원시", 0.812_345, 1.4)], &lookup());
        let e = &entries[0];
        assert_eq!(e.name, "수원시");
        assert_eq!(e.stadium, "수원실내체육관");
        assert!((e.lat - 37.297).abs() < f64::EPSILON);
        assert!((e.value - 0.8123).abs() < 1e-12);
        assert_eq!(e.count, 3);
        assert_eq!(e.intensity, Intensity::Normal);
    }

    #[test]
    fn unmapped_city_uses_default_coordinates() {
        let entries = city_map_entries(&[agg("Atlantis", 2.0, 2.0)], &lookup());
        let e = &entries[0];
        assert_eq!(e.stadium, "Atlantis");
        assert!((e.lat - 36.5).abs() < f64::EPSILON);
        assert!((e.lng - 127.5).abs() < f64::EPSILON);
        assert_eq!(e.intensity, Intensity::High);
    }

    #[test]
    fn team_marker_uses_record_city_and_logo() {
        let latest = vec![TeamLatestRecord {
            team: "대한항공".to_string(),
            match_date: None,
            trend: Some(-0.123_44),
            record: MatchRecord {
                home_team: Some("대한항공".to_string()),
                home_city: Some("인천광역시".to_string()),
                date: Some("2025-03-01".to_string()),
                household_rate: Some(0.98),
                ..MatchRecord::default()
            },
        }];
        let entries = team_map_entries(&latest, &lookup());
        let e = &entries[0];
        assert_eq!(e.stadium, "인천계양체육관");
        assert_eq!(e.logo, "koreanair_jumbos");
        assert_eq!(e.match_date.as_deref(), Some("2025-03-01"));
        assert_eq!(e.rate, Some(0.98));
        assert_eq!(e.trend, Some(-0.1234));
        assert!(!e.trend_up);
    }

    #[test]
    fn team_marker_falls_back_to_configured_city() {
        let latest = vec![TeamLatestRecord {
            team: "현대건설".to_string(),
            match_date: None,
            trend: None,
            record: MatchRecord {
                home_team: Some("현대건설".to_string()),
                ..MatchRecord::default()
            },
        }];
        let e = &team_map_entries(&latest, &lookup())[0];
        assert_eq!(e.stadium, "수원실내체육관");
        assert!(!e.trend_up);
        assert_eq!(e.rate, None);
    }

    #[test]
    fn unknown_team_gets_default_logo() {
        let latest = vec![TeamLatestRecord {
            team: "Unknown FC".to_string(),
            match_date: None,
            trend: Some(0.0),
            record: MatchRecord::default(),
        }];
        let e = &team_map_entries(&latest, &lookup())[0];
        assert_eq!(e.logo, "default");
        assert!((e.lat - 36.5).abs() < f64::EPSILON);
        assert!(e.trend_up);
    }
}
