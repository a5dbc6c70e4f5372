//! Embedded lookup tables.
//!
//! The TOML tables in `packages/lookup/tables/` are baked into the binary
//! at compile time via [`include_str!`]. A deployment can override them by
//! pointing at a directory containing `cities.toml` and `teams.toml`.

use std::path::Path;

use crate::{LookupError, LookupTables};

/// City table embedded at compile time.
pub const CITIES_TOML: &str = include_str!("../tables/cities.toml");

/// Team table embedded at compile time.
pub const TEAMS_TOML: &str = include_str!("../tables/teams.toml");

#[cfg(test)]
const EXPECTED_CITY_COUNT: usize = 12;

#[cfg(test)]
const EXPECTED_TEAM_COUNT: usize = 16;

impl LookupTables {
    /// Builds the lookup tables from the embedded TOML files.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if an embedded table is malformed. Since the
    /// tables are compile-time constants this indicates a development error
    /// and is caught by tests.
    pub fn embedded() -> Result<Self, LookupError> {
        Self::parse(CITIES_TOML, TEAMS_TOML)
    }

    /// Builds the lookup tables from `cities.toml` and `teams.toml` in
    /// `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if either file cannot be read or parsed.
    pub fn from_dir(dir: &Path) -> Result<Self, LookupError> {
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|source| LookupError::Io {
                path: path.display().to_string(),
                source,
            })
        };

        Self::parse(&read("cities.toml")?, &read("teams.toml")?)
    }

    /// Loads from `dir` when given, otherwise from the embedded tables.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the selected tables cannot be loaded.
    pub fn load(dir: Option<&Path>) -> Result<Self, LookupError> {
        let tables = match dir {
            Some(dir) => {
                log::info!("Loading lookup tables from {}", dir.display());
                Self::from_dir(dir)?
            }
            None => Self::embedded()?,
        };

        let (cities, teams) = tables.entry_counts();
        let (city_version, team_version) = tables.versions();
        log::info!(
            "Lookup tables ready: {cities} cities (v{city_version}), {teams} teams (v{team_version})"
        );

        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_embedded_tables() {
        let tables = LookupTables::embedded().unwrap();
        assert_eq!(
            tables.entry_counts(),
            (EXPECTED_CITY_COUNT, EXPECTED_TEAM_COUNT),
            "Update EXPECTED_CITY_COUNT/EXPECTED_TEAM_COUNT after editing the tables."
        );
    }

    #[test]
    fn every_team_home_city_is_mapped() {
        let tables = LookupTables::embedded().unwrap();
        let team_table: crate::TeamTable = toml::de::from_str(TEAMS_TOML).unwrap();
        for team in &team_table.teams {
            let city = team
                .home_city
                .as_deref()
                .unwrap_or_else(|| panic!("{} has no home_city", team.name));
            assert!(
                tables.is_mapped_city(city),
                "{} has unmapped home_city {city}",
                team.name
            );
        }
    }

    #[test]
    fn embedded_default_is_peninsula_center() {
        let c = LookupTables::embedded().unwrap().city("세종특별자치시");
        assert!((c.lat - 36.5).abs() < f64::EPSILON);
        assert!((c.lng - 127.5).abs() < f64::EPSILON);
        assert_eq!(c.display_name, "세종특별자치시");
    }

    #[test]
    fn loads_tables_from_directory() {
        let dir = std::env::temp_dir().join(format!("vleague-lookup-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("cities.toml"), CITIES_TOML).unwrap();
        std::fs::write(dir.join("teams.toml"), TEAMS_TOML).unwrap();

        let tables = LookupTables::load(Some(&dir)).unwrap();
        assert_eq!(tables.logo("대한항공"), "koreanair_jumbos");
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = std::env::temp_dir().join("vleague-lookup-does-not-exist");
        let err = LookupTables::from_dir(&dir).unwrap_err();
        assert!(matches!(err, LookupError::Io { .. }));
    }
}
