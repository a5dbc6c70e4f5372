#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Match record types for the V-League viewership dataset.
//!
//! A [`MatchRecord`] is one row of the viewership CSV: a single home match
//! with its schedule metadata, venue, league segment, and household
//! viewership rate. Every field is optional because the source spreadsheet
//! is hand-maintained and frequently has gaps; consumers decide which
//! fields they require via [`MatchField`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// League segment a match belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum GenderSegment {
    /// Men's league (`남자부`).
    #[serde(rename = "남자부", alias = "men")]
    #[strum(to_string = "남자부", serialize = "men", serialize = "m")]
    Men,
    /// Women's league (`여자부`).
    #[serde(rename = "여자부", alias = "women")]
    #[strum(to_string = "여자부", serialize = "women", serialize = "w")]
    Women,
}

impl GenderSegment {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Men, Self::Women]
    }

    /// Korean label as used in the dataset.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Men => "남자부",
            Self::Women => "여자부",
        }
    }
}

/// One match row from the viewership dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    /// Raw match date as written in the source file.
    pub date: Option<String>,
    /// Day of week label (e.g. `"토"`).
    pub weekday: Option<String>,
    /// Season label (e.g. `"2024-2025"`).
    pub season: Option<String>,
    /// Round label (e.g. `"1라운드"`).
    pub round: Option<String>,
    /// Home team name.
    pub home_team: Option<String>,
    /// Away team name.
    pub away_team: Option<String>,
    /// City the home team belongs to.
    pub home_city: Option<String>,
    /// The home team's registered home stadium.
    pub home_stadium: Option<String>,
    /// Raw venue name the match was actually played at.
    pub venue: Option<String>,
    /// League segment.
    pub gender: Option<GenderSegment>,
    /// Household viewership rate in percent.
    pub household_rate: Option<f64>,
}

impl MatchRecord {
    /// Parses [`Self::date`] with [`parse_match_date`].
    #[must_use]
    pub fn match_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_match_date)
    }

    /// Returns the household rate if it is present and finite.
    #[must_use]
    pub fn rate(&self) -> Option<f64> {
        self.household_rate.filter(|r| r.is_finite())
    }

    /// Returns `"home vs away"`, substituting `?` for missing teams.
    #[must_use]
    pub fn matchup(&self) -> String {
        format!(
            "{} vs {}",
            self.home_team.as_deref().unwrap_or("?"),
            self.away_team.as_deref().unwrap_or("?")
        )
    }

    /// Whether `field` holds a usable value.
    #[must_use]
    pub fn has(&self, field: MatchField) -> bool {
        fn present(value: Option<&String>) -> bool {
            value.is_some_and(|v| !v.trim().is_empty())
        }

        match field {
            MatchField::Date => present(self.date.as_ref()),
            MatchField::Weekday => present(self.weekday.as_ref()),
            MatchField::Season => present(self.season.as_ref()),
            MatchField::Round => present(self.round.as_ref()),
            MatchField::HomeTeam => present(self.home_team.as_ref()),
            MatchField::AwayTeam => present(self.away_team.as_ref()),
            MatchField::HomeCity => present(self.home_city.as_ref()),
            MatchField::HomeStadium => present(self.home_stadium.as_ref()),
            MatchField::Venue => present(self.venue.as_ref()),
            MatchField::Gender => self.gender.is_some(),
            MatchField::Rate => self.rate().is_some(),
        }
    }
}

/// Named columns of a [`MatchRecord`], used to express "required field"
/// filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum MatchField {
    /// [`MatchRecord::date`]
    Date,
    /// [`MatchRecord::weekday`]
    Weekday,
    /// [`MatchRecord::season`]
    Season,
    /// [`MatchRecord::round`]
    Round,
    /// [`MatchRecord::home_team`]
    HomeTeam,
    /// [`MatchRecord::away_team`]
    AwayTeam,
    /// [`MatchRecord::home_city`]
    HomeCity,
    /// [`MatchRecord::home_stadium`]
    HomeStadium,
    /// [`MatchRecord::venue`]
    Venue,
    /// [`MatchRecord::gender`]
    Gender,
    /// [`MatchRecord::household_rate`]
    Rate,
}

/// Date layouts seen in the dataset, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d", "%Y년 %m월 %d일"];

/// Parses a match date.
///
/// Accepts `YYYY-MM-DD`, `YYYY.MM.DD`, `YYYY/MM/DD`, `YYYYMMDD` and
/// `YYYY년 M월 D일`, optionally followed by a time component or a weekday
/// in parentheses. Returns `None` for anything else.
#[must_use]
pub fn parse_match_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year = s[0..4].parse().ok()?;
        let month = s[4..6].parse().ok()?;
        let day = s[6..8].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    DATE_FORMATS.iter().find_map(|fmt| {
        let (date, rest) = NaiveDate::parse_and_remainder(s, fmt).ok()?;
        let rest = rest.trim_start_matches('.');
        (rest.is_empty() || rest.starts_with([' ', 'T', '('])).then_some(date)
    })
}
