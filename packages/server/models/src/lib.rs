#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the dashboard server.
//!
//! These types are serialized to JSON for the REST API. Their shapes follow
//! the widgets that consume them rather than the analytics result types,
//! so the two can evolve independently.

use serde::{Deserialize, Serialize};
use vleague_analytics_models::{GenderHistogram, GroupAggregate, GroupKey, SortDirection};

/// Default number of entries returned by the rankings endpoint.
pub const DEFAULT_RANKING_LIMIT: usize = 10;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Error payload returned in place of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    /// Builds an error payload from anything displayable.
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

/// Which map layer to return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapView {
    /// One bubble per home city.
    #[default]
    City,
    /// One logo marker per home team.
    Team,
}

/// Query parameters for the map data endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapQueryParams {
    /// Layer to return, city by default.
    pub view: Option<MapView>,
}

/// Query parameters for the gender distribution endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenderQueryParams {
    /// Restrict the distribution to one home city.
    pub city: Option<String>,
    /// Bucket width, 0.2 by default.
    pub width: Option<f64>,
    /// Exclusive upper bound of the last bucket, 3.0 by default.
    pub upper: Option<f64>,
}

/// Gender histogram in the shape the pyramid chart consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGenderDistribution {
    /// Bucket labels, lowest first.
    pub labels: Vec<String>,
    /// Men's counts as non-positive numbers.
    pub men: Vec<i64>,
    /// Women's counts as non-negative numbers.
    pub women: Vec<i64>,
    /// Largest absolute count, for axis scaling.
    pub max_val: u64,
}

impl From<&GenderHistogram> for ApiGenderDistribution {
    fn from(histogram: &GenderHistogram) -> Self {
        Self {
            labels: histogram.labels(),
            men: histogram.men(),
            women: histogram.women(),
            max_val: histogram.max_abs,
        }
    }
}

/// Grouping accepted by the rankings endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingBy {
    /// Rank home cities.
    #[default]
    City,
    /// Rank home stadiums.
    Stadium,
    /// Rank the men's and women's leagues.
    Gender,
    /// Rank home teams.
    Team,
    /// Rank seasons.
    Season,
}

impl From<RankingBy> for GroupKey {
    fn from(by: RankingBy) -> Self {
        match by {
            RankingBy::City => Self::City,
            RankingBy::Stadium => Self::Stadium,
            RankingBy::Gender => Self::Gender,
            RankingBy::Team => Self::HomeTeam,
            RankingBy::Season => Self::Season,
        }
    }
}

/// Query parameters for the rankings endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankingQueryParams {
    /// What to rank, cities by default.
    pub by: Option<RankingBy>,
    /// Maximum number of entries.
    pub limit: Option<usize>,
    /// `descending` (default) or `ascending` by mean rate.
    pub order: Option<SortDirection>,
}

/// One entry of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRankingEntry {
    /// 1-based position.
    pub rank: usize,
    /// Group name.
    pub name: String,
    /// Mean rate.
    pub value: f64,
    /// Number of matches.
    pub count: u64,
    /// Highest rate.
    pub max: f64,
}

impl ApiRankingEntry {
    /// Builds the entry at 0-based `index` of a ranked list.
    #[must_use]
    pub fn from_ranked(index: usize, aggregate: &GroupAggregate) -> Self {
        Self {
            rank: index + 1,
            name: aggregate.key.clone(),
            value: aggregate.mean,
            count: aggregate.count,
            max: aggregate.max,
        }
    }
}

/// Query parameters for the team report endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamQueryParams {
    /// Restrict the report to one season, e.g. `2024-2025`.
    pub season: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use vleague_analytics_models::HistogramBucket;

    #[test]
    fn gender_distribution_uses_max_val_key() {
        let histogram = GenderHistogram {
            buckets: vec![HistogramBucket {
                lower: 0.0,
                upper: 0.2,
                label: "0.0~0.2%".to_string(),
                men: -2,
                women: 1,
            }],
            max_abs: 2,
        };
        let json = serde_json::to_value(ApiGenderDistribution::from(&histogram)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "labels": ["0.0~0.2%"],
                "men": [-2],
                "women": [1],
                "maxVal": 2,
            })
        );
    }

    #[test]
    fn map_view_parses_lowercase() {
        let params: MapQueryParams = serde_json::from_str(r#"{"view":"team"}"#).unwrap();
        assert_eq!(params.view, Some(MapView::Team));
        assert!(serde_json::from_str::<MapQueryParams>(r#"{"view":"region"}"#).is_err());
    }

    #[test]
    fn ranking_by_maps_to_group_key() {
        assert_eq!(GroupKey::from(RankingBy::City), GroupKey::City);
        assert_eq!(GroupKey::from(RankingBy::Stadium), GroupKey::Stadium);
        assert_eq!(GroupKey::from(RankingBy::Team), GroupKey::HomeTeam);
        assert_eq!(GroupKey::from(RankingBy::Season), GroupKey::Season);
    }

    #[test]
    fn ranking_params_parse_order() {
        let params: RankingQueryParams =
            serde_json::from_str(r#"{"by":"team","order":"ascending"}"#).unwrap();
        assert_eq!(params.by, Some(RankingBy::Team));
        assert_eq!(params.order, Some(SortDirection::Ascending));
    }

    #[test]
    fn error_payload_shape() {
        let json = serde_json::to_string(&ApiError::new("Data file not found")).unwrap();
        assert_eq!(json, r#"{"error":"Data file not found"}"#);
    }
}
