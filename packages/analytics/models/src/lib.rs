#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types produced by the viewership analytics engine.
//!
//! Everything here is derived and ephemeral: built during one aggregation
//! pass and discarded once the response or report has been produced.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use vleague_match_models::{GenderSegment, MatchField, MatchRecord};

/// Categorical column to group match records by.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GroupKey {
    /// Home city.
    City,
    /// Home stadium.
    Stadium,
    /// League segment.
    Gender,
    /// Home team.
    HomeTeam,
    /// Season label.
    Season,
}

impl GroupKey {
    /// Extracts this key from a record. Returns `None` for missing or
    /// blank values.
    #[must_use]
    pub fn extract(self, record: &MatchRecord) -> Option<&str> {
        let value = match self {
            Self::City => record.home_city.as_deref(),
            Self::Stadium => record.home_stadium.as_deref(),
            Self::Gender => record.gender.map(GenderSegment::label),
            Self::HomeTeam => record.home_team.as_deref(),
            Self::Season => record.season.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Fields a record must have to count towards a ranking by this key.
    ///
    /// City and stadium rankings only consider matches that have both a
    /// home stadium and a home city.
    #[must_use]
    pub const fn ranking_fields(self) -> &'static [MatchField] {
        match self {
            Self::City | Self::Stadium => &[
                MatchField::HomeStadium,
                MatchField::HomeCity,
                MatchField::Rate,
            ],
            Self::Gender => &[MatchField::Gender, MatchField::Rate],
            Self::HomeTeam => &[MatchField::HomeTeam, MatchField::Rate],
            Self::Season => &[MatchField::Season, MatchField::Rate],
        }
    }

    /// Dataset column header for this key.
    #[must_use]
    pub const fn column_label(self) -> &'static str {
        match self {
            Self::City => "소속도시",
            Self::Stadium => "구단홈구장",
            Self::Gender => "남여구분",
            Self::HomeTeam => "홈",
            Self::Season => "시즌",
        }
    }
}

/// Sort direction for ranked output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    #[default]
    Descending,
}

/// Mean, count, and maximum of the viewership rate for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAggregate {
    /// Group key (city name, stadium name, ...).
    pub key: String,
    /// Mean rate over the group's records.
    pub mean: f64,
    /// Number of records in the group.
    pub count: u64,
    /// Highest rate in the group.
    pub max: f64,
}

/// One fixed-width histogram interval `[lower, upper)` with signed counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBucket {
    /// Inclusive lower bound.
    pub lower: f64,
    /// Exclusive upper bound.
    pub upper: f64,
    /// Display label, e.g. `"1.0~1.2%"`.
    pub label: String,
    /// Men's count as a non-positive number.
    pub men: i64,
    /// Women's count as a non-negative number.
    pub women: i64,
}

/// Back-to-back gender histogram of viewership rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderHistogram {
    /// Buckets in ascending order.
    pub buckets: Vec<HistogramBucket>,
    /// Largest absolute count across all buckets and both segments.
    pub max_abs: u64,
}

impl GenderHistogram {
    /// Bucket labels in order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.buckets.iter().map(|b| b.label.clone()).collect()
    }

    /// Men's signed counts in bucket order.
    #[must_use]
    pub fn men(&self) -> Vec<i64> {
        self.buckets.iter().map(|b| b.men).collect()
    }

    /// Women's signed counts in bucket order.
    #[must_use]
    pub fn women(&self) -> Vec<i64> {
        self.buckets.iter().map(|b| b.women).collect()
    }
}

/// The most recent match of one home team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamLatestRecord {
    /// Home team name.
    pub team: String,
    /// Parsed match date, `None` if unparsable.
    pub match_date: Option<NaiveDate>,
    /// Rate difference to the team's previous match, when both are known.
    pub trend: Option<f64>,
    /// The selected record.
    pub record: MatchRecord,
}

/// Map marker intensity class.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Intensity {
    /// Mean rate at or above the highlight threshold.
    High,
    /// Everything else.
    Normal,
}

/// A city aggregate joined with its display location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityMapEntry {
    /// City name.
    pub name: String,
    /// Stadium display name.
    pub stadium: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Mean rate, rounded to 4 decimals.
    pub value: f64,
    /// Number of matches.
    pub count: u64,
    /// Maximum rate, rounded to 4 decimals.
    pub max: f64,
    /// Marker intensity.
    pub intensity: Intensity,
}

/// A team's latest match joined with its display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMapEntry {
    /// Team name.
    pub name: String,
    /// Stadium display name.
    pub stadium: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Logo asset identifier.
    pub logo: String,
    /// Match date as written in the dataset.
    #[serde(rename = "match_date")]
    pub match_date: Option<String>,
    /// Rate of the latest match, rounded to 4 decimals.
    pub rate: Option<f64>,
    /// Rate change versus the previous match, rounded to 4 decimals.
    pub trend: Option<f64>,
    /// Whether the trend is non-negative. `false` when unknown.
    pub trend_up: bool,
}

/// Highest-rated match of a team report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestMatch {
    /// Opponent.
    pub away_team: Option<String>,
    /// Match date as written in the dataset.
    pub date: Option<String>,
    /// Weekday label.
    pub weekday: Option<String>,
    /// Rate of that match.
    pub rate: f64,
}

/// Per-team viewership summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamReport {
    /// Home team the report is about.
    pub team: String,
    /// Season filter, `None` for all seasons.
    pub season: Option<String>,
    /// Number of matching home games, rated or not.
    pub match_count: u64,
    /// Mean rate over rated games.
    pub mean: Option<f64>,
    /// Highest rate.
    pub max: Option<f64>,
    /// Lowest rate.
    pub min: Option<f64>,
    /// The highest-rated game.
    pub best_match: Option<BestMatch>,
    /// Matching games, newest first.
    pub matches: Vec<MatchRecord>,
}

impl TeamReport {
    /// Whether no games matched the filter.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.match_count == 0
    }
}

/// Per-call formatting options for text reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Maximum number of rows to print, `None` for all.
    pub max_rows: Option<usize>,
    /// Maximum line width in characters.
    pub width: usize,
    /// Decimal places for rates.
    pub precision: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            max_rows: None,
            width: 1000,
            precision: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_key_parses_snake_case() {
        assert_eq!("city".parse::<GroupKey>().unwrap(), GroupKey::City);
        assert_eq!("home_team".parse::<GroupKey>().unwrap(), GroupKey::HomeTeam);
        assert_eq!("Stadium".parse::<GroupKey>().unwrap(), GroupKey::Stadium);
        assert!("venue".parse::<GroupKey>().is_err());
    }

    #[test]
    fn group_key_extracts_gender_label() {
        let record = MatchRecord {
            gender: Some(GenderSegment::Women),
            ..MatchRecord::default()
        };
        assert_eq!(GroupKey::Gender.extract(&record), Some("여자부"));
        assert_eq!(GroupKey::City.extract(&record), None);
    }

    #[test]
    fn team_map_entry_keeps_snake_case_match_date() {
        let entry = TeamMapEntry {
            name: "대한항공".to_string(),
            stadium: "인천계양체육관".to_string(),
            lat: 37.5,
            lng: 126.7,
            logo: "koreanair_jumbos".to_string(),
            match_date: Some("2024-11-02".to_string()),
            rate: Some(1.0),
            trend: Some(0.2),
            trend_up: true,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["match_date"], "2024-11-02");
        assert!(json.get("matchDate").is_none());
        assert_eq!(json["trendUp"], true);
    }

    #[test]
    fn located_rankings_need_stadium_and_city() {
        let unassigned = MatchRecord {
            home_city: Some("수원시".to_string()),
            home_team: Some("한국전력".to_string()),
            household_rate: Some(0.7),
            ..MatchRecord::default()
        };
        let has_all =
            |key: GroupKey| key.ranking_fields().iter().all(|f| unassigned.has(*f));
        assert!(!has_all(GroupKey::City));
        assert!(!has_all(GroupKey::Stadium));
        assert!(has_all(GroupKey::HomeTeam));
        assert!(!has_all(GroupKey::Season));
    }

    #[test]
    fn blank_key_is_missing() {
        let record = MatchRecord {
            home_stadium: Some(" ".to_string()),
            ..MatchRecord::default()
        };
        assert_eq!(GroupKey::Stadium.extract(&record), None);
    }
}
