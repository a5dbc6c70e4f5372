//! Row shape of the viewership CSV as it appears on disk.

use serde::Deserialize;
use vleague_match_models::{GenderSegment, MatchRecord};

/// A CSV row before normalization. Column names are the published Korean
/// headers; English aliases are accepted for hand-built fixtures.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawMatchRow {
    #[serde(rename = "일자", alias = "date")]
    date: Option<String>,
    #[serde(rename = "요일", alias = "weekday")]
    weekday: Option<String>,
    #[serde(rename = "시즌", alias = "season")]
    season: Option<String>,
    #[serde(rename = "라운드구분", alias = "round")]
    round: Option<String>,
    #[serde(rename = "홈", alias = "home")]
    home: Option<String>,
    #[serde(rename = "어웨이", alias = "away")]
    away: Option<String>,
    #[serde(rename = "구단홈구장", alias = "stadium")]
    stadium: Option<String>,
    #[serde(rename = "소속도시", alias = "city")]
    city: Option<String>,
    #[serde(rename = "체육관", alias = "venue")]
    venue: Option<String>,
    #[serde(rename = "남여구분", alias = "gender")]
    gender: Option<String>,
    #[serde(rename = "가구 시청률", alias = "rate")]
    rate: Option<String>,
}

impl RawMatchRow {
    pub(crate) fn into_record(self) -> MatchRecord {
        let gender = self
            .gender
            .as_deref()
            .and_then(|g| g.trim().parse::<GenderSegment>().ok());
        let household_rate = self.rate.as_deref().and_then(parse_rate);

        MatchRecord {
            date: non_blank(self.date),
            weekday: non_blank(self.weekday),
            season: non_blank(self.season),
            round: non_blank(self.round),
            home_team: non_blank(self.home),
            away_team: non_blank(self.away),
            home_city: non_blank(self.city),
            home_stadium: non_blank(self.stadium),
            venue: non_blank(self.venue),
            gender,
            household_rate,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses a rate cell such as `"0.85"`, `"1.24%"` or `"1,024.5"`.
/// Returns `None` for blanks, placeholders like `"-"`, and non-finite values.
fn parse_rate(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_percent_rates() {
        assert_eq!(parse_rate("0.85"), Some(0.85));
        assert_eq!(parse_rate(" 1.24% "), Some(1.24));
        assert_eq!(parse_rate("1,024.5"), Some(1024.5));
    }

    #[test]
    fn rejects_placeholder_rates() {
        assert_eq!(parse_rate("-"), None);
        assert_eq!(parse_rate(""), None);
        assert_eq!(parse_rate("NaN"), None);
        assert_eq!(parse_rate("inf"), None);
    }

    #[test]
    fn unknown_gender_is_dropped() {
        let row = RawMatchRow {
            gender: Some("혼성".to_string()),
            ..RawMatchRow::default()
        };
        assert!(row.into_record().gender.is_none());
    }
}
