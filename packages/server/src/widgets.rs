//! Dashboard widget descriptors.
//!
//! The widget layout lives in `data/widgets.json`, embedded at compile time
//! and parsed once at startup. Most widgets carry fixed placeholder data;
//! the season trend chart (`w6`) and the daily calendar (`w7`) are filled
//! from CSV files in the data directory on every request.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Value, json};
use vleague_dataset::{read_rows_or_empty, read_table_or_empty};

/// Widget templates embedded at compile time.
pub const WIDGETS_JSON: &str = include_str!("../data/widgets.json");

/// Season trend rows for the `w6` chart.
pub const SEASON_TREND_FILE: &str = "w6_season_trend.csv";

/// Per-day rates for the `w7` calendar.
pub const DAILY_CALENDAR_FILE: &str = "w7_daily_calendar.csv";

#[cfg(test)]
const EXPECTED_WIDGET_COUNT: usize = 9;

#[derive(Debug, Deserialize)]
struct SeasonTrendRow {
    label: String,
    value: f64,
    #[serde(rename = "prevValue", alias = "prev_value")]
    prev_value: f64,
}

/// Parsed widget templates.
#[derive(Debug, Clone)]
pub struct WidgetTemplates {
    widgets: Vec<Value>,
}

impl WidgetTemplates {
    /// Parses the embedded templates.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the embedded JSON is malformed.
    pub fn embedded() -> Result<Self, serde_json::Error> {
        Self::parse(WIDGETS_JSON)
    }

    /// Parses templates from a JSON array of widget objects.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if `json` is not an array.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            widgets: serde_json::from_str(json)?,
        })
    }

    /// Number of widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether there are no widgets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Returns the widgets with their data-driven parts filled from
    /// `data_dir`. Missing data files leave those parts empty.
    #[must_use]
    pub fn render(&self, data_dir: &Path) -> Vec<Value> {
        let trend: Vec<SeasonTrendRow> = read_rows_or_empty(&data_dir.join(SEASON_TREND_FILE));
        let days = read_table_or_empty(&data_dir.join(DAILY_CALENDAR_FILE));

        let trend_data = json!({
            "labels": trend.iter().map(|r| r.label.as_str()).collect::<Vec<_>>(),
            "values": trend.iter().map(|r| r.value).collect::<Vec<_>>(),
            "prevValues": trend.iter().map(|r| r.prev_value).collect::<Vec<_>>(),
        });
        let days: Vec<Value> = days.into_iter().map(Value::Object).collect();

        let mut widgets = self.widgets.clone();
        for widget in &mut widgets {
            match widget.get("id").and_then(Value::as_str) {
                Some("w6") => widget["data"] = trend_data.clone(),
                Some("w7") => widget["data"]["days"] = Value::Array(days.clone()),
                _ => {}
            }
        }
        widgets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("vleague-widgets-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn find<'a>(widgets: &'a [Value], id: &str) -> &'a Value {
        widgets.iter().find(|w| w["id"] == id).unwrap()
    }

    #[test]
    fn embedded_templates_parse() {
        let templates = WidgetTemplates::embedded().unwrap();
        assert_eq!(
            templates.len(),
            EXPECTED_WIDGET_COUNT,
            "Update EXPECTED_WIDGET_COUNT after editing widgets.json."
        );
    }

    #[test]
    fn widget_ids_are_unique_and_typed() {
        let templates = WidgetTemplates::embedded().unwrap();
        let mut ids = std::collections::BTreeSet::new();
        for widget in &templates.widgets {
            let id = widget["id"].as_str().expect("widget without id");
            assert!(ids.insert(id.to_string()), "duplicate widget id {id}");
            assert!(widget["type"].is_string(), "{id} has no type");
            assert!(widget["title"].is_string(), "{id} has no title");
            assert!(widget["data"].is_object(), "{id} has no data");
        }
    }

    #[test]
    fn missing_files_leave_data_empty() {
        let widgets = WidgetTemplates::embedded().unwrap().render(&data_dir());
        let w6 = find(&widgets, "w6");
        assert_eq!(w6["data"]["labels"], json!([]));
        assert_eq!(w6["data"]["prevValues"], json!([]));
        assert_eq!(find(&widgets, "w7")["data"]["days"], json!([]));
        assert_eq!(find(&widgets, "w7")["data"]["maxRate"], json!(3.5));
    }

    #[test]
    fn fills_trend_and_calendar_from_csv() {
        let dir = data_dir();
        std::fs::write(
            dir.join(SEASON_TREND_FILE),
            "label,value,prevValue\n1R,0.91,0.88\n2R,1.02,0.95\n",
        )
        .unwrap();
        std::fs::write(
            dir.join(DAILY_CALENDAR_FILE),
            "date,rate,match\n2025-01-29,1.24,대한항공 vs 현대캐피탈\n2025-01-30,,\n",
        )
        .unwrap();

        let widgets = WidgetTemplates::embedded().unwrap().render(&dir);

        let w6 = &find(&widgets, "w6")["data"];
        assert_eq!(w6["labels"], json!(["1R", "2R"]));
        assert_eq!(w6["values"], json!([0.91, 1.02]));
        assert_eq!(w6["prevValues"], json!([0.88, 0.95]));

        let days = &find(&widgets, "w7")["data"]["days"];
        assert_eq!(days[0]["rate"], json!(1.24));
        assert_eq!(days[0]["match"], json!("대한항공 vs 현대캐피탈"));
        assert_eq!(days[1]["rate"], Value::Null);
    }

    #[test]
    fn rejects_non_array_templates() {
        assert!(WidgetTemplates::parse(r#"{"id":"w1"}"#).is_err());
    }
}
