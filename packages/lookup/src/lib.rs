#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static display metadata for cities and teams.
//!
//! Two versioned TOML tables (`tables/cities.toml`, `tables/teams.toml`)
//! map city names to stadium coordinates and team names to logo asset
//! identifiers. They are parsed once into an immutable [`LookupTables`]
//! value at startup; every lookup afterwards is a pure, total function
//! with a fixed fallback for unknown keys.

pub mod registry;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use registry::{CITIES_TOML, TEAMS_TOML};

/// Errors that can occur while building the lookup tables.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// A table file could not be parsed.
    #[error("Failed to parse {table} table: {source}")]
    Parse {
        /// Which table failed (`"cities"` or `"teams"`).
        table: &'static str,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// A table file could not be read from disk.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The same key appears twice in one table.
    #[error("Duplicate {table} entry: {key}")]
    Duplicate {
        /// Which table has the duplicate.
        table: &'static str,
        /// The duplicated name.
        key: String,
    },
}

/// Coordinate used for cities with no table entry.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DefaultLocation {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

/// One row of `cities.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CityEntry {
    /// City name as it appears in the dataset's home-city column.
    pub name: String,
    /// Stadium latitude.
    pub lat: f64,
    /// Stadium longitude.
    pub lng: f64,
    /// Stadium display name.
    pub stadium: String,
}

/// Parsed contents of `cities.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CityTable {
    /// Table version.
    pub version: u32,
    /// Fallback location for unmapped cities.
    pub default: DefaultLocation,
    /// Mapped cities.
    #[serde(rename = "city", default)]
    pub cities: Vec<CityEntry>,
}

/// One row of `teams.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamEntry {
    /// Team name as it appears in the dataset's home/away columns.
    pub name: String,
    /// Logo asset identifier.
    pub logo: String,
    /// Home city, matching a [`CityEntry::name`].
    pub home_city: Option<String>,
}

/// Parsed contents of `teams.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamTable {
    /// Table version.
    pub version: u32,
    /// Logo identifier for unmapped teams.
    pub default_logo: String,
    /// Mapped teams.
    #[serde(rename = "team", default)]
    pub teams: Vec<TeamEntry>,
}

/// Resolved display location for a city.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityCoordinates {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Stadium display name, or the raw city name when unmapped.
    pub display_name: String,
}

/// Immutable city and team lookup tables.
#[derive(Debug, Clone)]
pub struct LookupTables {
    cities: BTreeMap<String, CityEntry>,
    teams: BTreeMap<String, TeamEntry>,
    default_location: DefaultLocation,
    default_logo: String,
    city_version: u32,
    team_version: u32,
}

impl LookupTables {
    /// Builds lookup tables from already-parsed table files.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Duplicate`] if a city or team name appears
    /// more than once.
    pub fn from_tables(city_table: CityTable, team_table: TeamTable) -> Result<Self, LookupError> {
        let mut cities = BTreeMap::new();
        for entry in city_table.cities {
            if cities.contains_key(&entry.name) {
                return Err(LookupError::Duplicate {
                    table: "cities",
                    key: entry.name,
                });
            }
            cities.insert(entry.name.clone(), entry);
        }

        let mut teams = BTreeMap::new();
        for entry in team_table.teams {
            if teams.contains_key(&entry.name) {
                return Err(LookupError::Duplicate {
                    table: "teams",
                    key: entry.name,
                });
            }
            teams.insert(entry.name.clone(), entry);
        }

        Ok(Self {
            cities,
            teams,
            default_location: city_table.default,
            default_logo: team_table.default_logo,
            city_version: city_table.version,
            team_version: team_table.version,
        })
    }

    /// Parses both tables from TOML source text.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if either table is malformed or contains
    /// duplicates.
    pub fn parse(cities_toml: &str, teams_toml: &str) -> Result<Self, LookupError> {
        let city_table: CityTable =
            toml::de::from_str(cities_toml).map_err(|source| LookupError::Parse {
                table: "cities",
                source,
            })?;
        let team_table: TeamTable =
            toml::de::from_str(teams_toml).map_err(|source| LookupError::Parse {
                table: "teams",
                source,
            })?;
        Self::from_tables(city_table, team_table)
    }

    /// Resolves a city to its stadium location.
    ///
    /// Unmapped cities resolve to the default location with the raw city
    /// name as display name.
    #[must_use]
    pub fn city(&self, name: &str) -> CityCoordinates {
        self.cities.get(name).map_or_else(
            || CityCoordinates {
                lat: self.default_location.lat,
                lng: self.default_location.lng,
                display_name: name.to_string(),
            },
            |entry| CityCoordinates {
                lat: entry.lat,
                lng: entry.lng,
                display_name: entry.stadium.clone(),
            },
        )
    }

    /// Returns the logo identifier for a team, or the default logo.
    #[must_use]
    pub fn logo(&self, team: &str) -> &str {
        self.teams
            .get(team)
            .map_or(self.default_logo.as_str(), |t| t.logo.as_str())
    }

    /// Returns the configured home city of a team, if any.
    #[must_use]
    pub fn team_home_city(&self, team: &str) -> Option<&str> {
        self.teams.get(team).and_then(|t| t.home_city.as_deref())
    }

    /// Whether `name` has an entry in the city table.
    #[must_use]
    pub fn is_mapped_city(&self, name: &str) -> bool {
        self.cities.contains_key(name)
    }

    /// Number of city and team entries.
    #[must_use]
    pub fn entry_counts(&self) -> (usize, usize) {
        (self.cities.len(), self.teams.len())
    }

    /// Versions of the city and team tables.
    #[must_use]
    pub const fn versions(&self) -> (u32, u32) {
        (self.city_version, self.team_version)
    }
}
