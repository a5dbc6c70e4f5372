//! HTTP handler functions for the dashboard API.
//!
//! Every data endpoint re-reads the match dataset from disk. A missing data
//! file produces an empty result; any other failure is reported as an
//! `{"error": ...}` payload with status 200, which is what the widgets
//! expect.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use vleague_analytics::{
    HistogramBins, aggregate_by, city_map_entries, latest_per_team, rank, team_map_entries, top,
};
use vleague_analytics_models::GroupKey;
use vleague_dataset::{DatasetError, drop_missing, load_matches};
use vleague_match_models::{MatchField, MatchRecord};
use vleague_server_models::{
    ApiError, ApiGenderDistribution, ApiHealth, ApiRankingEntry, DEFAULT_RANKING_LIMIT,
    GenderQueryParams, MapQueryParams, MapView, RankingQueryParams, TeamQueryParams,
};

use crate::AppState;

/// Loads the dataset and keeps rows that have every `required` field.
///
/// A missing file loads as an empty dataset.
fn load_records(
    state: &AppState,
    required: &[MatchField],
) -> Result<Vec<MatchRecord>, DatasetError> {
    let records = match load_matches(&state.config.matches_path()) {
        Ok(records) => records,
        Err(e) if e.is_not_found() => {
            log::warn!("{e}");
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    Ok(drop_missing(records, required))
}

/// Logs `e` and responds with the error payload.
fn failure(what: &str, e: &dyn std::fmt::Display) -> HttpResponse {
    log::error!("Failed to build {what}: {e}");
    HttpResponse::Ok().json(ApiError::new(e))
}

fn ok(body: impl Serialize) -> HttpResponse {
    HttpResponse::Ok().json(body)
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/widgets`
///
/// Returns the dashboard widget descriptors with the season trend and
/// daily calendar filled from the data directory.
pub async fn widgets(state: web::Data<AppState>) -> HttpResponse {
    ok(state.widgets.render(&state.config.data_dir))
}

/// `GET /api/map-data?view=city|team`
///
/// City view: one bubble per home city with mean, count, and max rate.
/// Team view: one marker per home team at its most recent match.
pub async fn map_data(
    state: web::Data<AppState>,
    params: web::Query<MapQueryParams>,
) -> HttpResponse {
    match params.view.unwrap_or_default() {
        MapView::City => {
            match load_records(&state, &[MatchField::HomeCity, MatchField::Rate]) {
                Ok(records) => {
                    let aggregates = aggregate_by(&records, GroupKey::City);
                    ok(city_map_entries(&aggregates, &state.lookup))
                }
                Err(e) => failure("city map data", &e),
            }
        }
        MapView::Team => match load_records(&state, &[MatchField::HomeTeam]) {
            Ok(records) => {
                let latest = latest_per_team(&records);
                ok(team_map_entries(&latest, &state.lookup))
            }
            Err(e) => failure("team map data", &e),
        },
    }
}

/// `GET /api/gender-distribution?city=<optional>&width=<optional>&upper=<optional>`
///
/// Returns the back-to-back men/women histogram of viewership rates,
/// optionally restricted to one home city.
pub async fn gender_distribution(
    state: web::Data<AppState>,
    params: web::Query<GenderQueryParams>,
) -> HttpResponse {
    let bins = match HistogramBins::with_overrides(params.width, params.upper) {
        Ok(bins) => bins,
        Err(e) => return failure("gender distribution", &e),
    };

    match load_records(&state, &[MatchField::Gender, MatchField::Rate]) {
        Ok(records) => {
            let city = params.city.as_deref().filter(|c| !c.is_empty());
            let histogram = vleague_analytics::gender_distribution(&records, city, bins);
            ok(ApiGenderDistribution::from(&histogram))
        }
        Err(e) => failure("gender distribution", &e),
    }
}

/// `GET /api/rankings?by=city|stadium|gender|team|season&limit=<n>&order=<optional>`
///
/// Returns groups ranked by mean viewership rate, highest first unless
/// `order=ascending`.
pub async fn rankings(
    state: web::Data<AppState>,
    params: web::Query<RankingQueryParams>,
) -> HttpResponse {
    let key = GroupKey::from(params.by.unwrap_or_default());

    match load_records(&state, key.ranking_fields()) {
        Ok(records) => {
            let ranked = top(
                rank(aggregate_by(&records, key), params.order.unwrap_or_default()),
                params.limit.unwrap_or(DEFAULT_RANKING_LIMIT),
            );
            let entries: Vec<ApiRankingEntry> = ranked
                .iter()
                .enumerate()
                .map(|(i, agg)| ApiRankingEntry::from_ranked(i, agg))
                .collect();
            ok(entries)
        }
        Err(e) => failure("rankings", &e),
    }
}

/// `GET /api/teams/{team}?season=<optional>`
///
/// Returns the viewership report for one home team.
pub async fn team_report(
    state: web::Data<AppState>,
    path: web::Path<String>,
    params: web::Query<TeamQueryParams>,
) -> HttpResponse {
    let team = path.into_inner();

    match load_records(&state, &[MatchField::HomeTeam]) {
        Ok(records) => {
            let season = params.season.as_deref().filter(|s| !s.is_empty());
            ok(vleague_analytics::team_report(&records, &team, season))
        }
        Err(e) => failure("team report", &e),
    }
}
