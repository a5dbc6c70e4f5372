#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Viewership analytics over loaded match records.
//!
//! Every function here is a pure transformation of an in-memory record
//! slice: grouping and ranking, histogram binning, latest-match selection,
//! joining with the static lookup tables, per-team reports, and text
//! rendering for the command-line tool.

pub mod aggregate;
pub mod enrich;
pub mod histogram;
pub mod latest;
pub mod listing;
pub mod report;
pub mod team;

use thiserror::Error;

pub use aggregate::{aggregate, aggregate_by, rank, top};
pub use enrich::{city_map_entries, team_map_entries};
pub use histogram::{HistogramBins, bin_gender_rates, gender_distribution, histogram_from_records};
pub use latest::latest_per_team;
pub use listing::{missing_stadium_count, missing_stadium_venues, ranked_matches};
pub use team::team_report;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A histogram layout was requested with unusable bounds.
    #[error("Invalid histogram bins: width {width} over [0, {upper})")]
    InvalidBins {
        /// Requested bucket width.
        width: f64,
        /// Requested exclusive upper bound.
        upper: f64,
    },
}
