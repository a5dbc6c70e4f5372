#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line viewership reports for the V-League dataset.
//!
//! ```text
//! vleague_cli cities
//! vleague_cli stadiums [--top 10]
//! vleague_cli rank <city|stadium|gender|home_team|season> [--top 5] [--ascending]
//! vleague_cli matches
//! vleague_cli team <TEAM> [--season 2024-2025]
//! vleague_cli missing-stadiums
//! vleague_cli gender [--city 수원시] [--bin-width 0.5] [--upper 3.0]
//! vleague_cli serve [--bind-addr 0.0.0.0] [--port 8000] [--data-dir data]
//! ```
//!
//! Global `--data`, `--max-rows`, `--width` and `--precision` flags control
//! which file is read and how tables are printed.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use vleague_analytics::report::{
    render_aggregates, render_histogram, render_matches, render_team_report,
};
use vleague_analytics::{
    HistogramBins, aggregate_by, gender_distribution, missing_stadium_count,
    missing_stadium_venues, rank, ranked_matches, team_report, top,
};
use vleague_analytics_models::{GroupKey, ReportOptions, SortDirection};
use vleague_dataset::{MATCHES_FILE, drop_missing, load_matches};
use vleague_match_models::{MatchField, MatchRecord};
use vleague_server::{ServerConfig, run_server};

#[derive(Parser)]
#[command(
    name = "vleague_cli",
    about = "V-League household viewership reports"
)]
struct Cli {
    /// Path to the match dataset CSV
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Maximum number of table rows to print (all by default)
    #[arg(long, global = true)]
    max_rows: Option<usize>,

    /// Maximum line width
    #[arg(long, global = true, default_value = "1000")]
    width: usize,

    /// Decimal places for rates
    #[arg(long, global = true, default_value = "5")]
    precision: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank home cities by mean viewership rate
    Cities,
    /// Rank home stadiums by mean viewership rate
    Stadiums {
        /// Only show the first N stadiums
        #[arg(long)]
        top: Option<usize>,
    },
    /// Rank any grouping by mean viewership rate
    Rank {
        /// Grouping: city, stadium, gender, home_team, or season
        by: GroupKey,
        /// Only show the first N groups
        #[arg(long)]
        top: Option<usize>,
        /// Lowest mean first
        #[arg(long)]
        ascending: bool,
    },
    /// List every match with a known stadium and city, highest rate first
    Matches,
    /// Detailed report for one home team
    Team {
        /// Home team name
        team: String,
        /// Restrict to one season, e.g. 2024-2025
        #[arg(long)]
        season: Option<String>,
    },
    /// List venues of matches that have no home stadium assigned
    MissingStadiums,
    /// Men/women viewership rate distribution
    Gender {
        /// Restrict to one home city
        #[arg(long)]
        city: Option<String>,
        /// Bucket width (0.2 by default)
        #[arg(long)]
        bin_width: Option<f64>,
        /// Exclusive upper bound of the last bucket (3.0 by default)
        #[arg(long)]
        upper: Option<f64>,
    },
    /// Start the dashboard API server
    Serve {
        /// Address to bind to (overrides BIND_ADDR)
        #[arg(long)]
        bind_addr: Option<String>,
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
        /// Directory holding the data files (overrides DATA_DIR)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

fn load(path: &Path) -> Result<Vec<MatchRecord>, vleague_dataset::DatasetError> {
    let records = load_matches(path)?;
    log::info!("Loaded {} matches from {}", records.len(), path.display());
    Ok(records)
}

/// Ranks `records` by `key` and renders the table.
fn ranking(
    records: Vec<MatchRecord>,
    key: GroupKey,
    direction: SortDirection,
    limit: Option<usize>,
    title: &str,
    options: &ReportOptions,
) -> String {
    let records = drop_missing(records, key.ranking_fields());
    let mut ranked = rank(aggregate_by(&records, key), direction);
    if let Some(limit) = limit {
        ranked = top(ranked, limit);
    }
    render_aggregates(title, key.column_label(), &ranked, options)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let options = ReportOptions {
        max_rows: cli.max_rows,
        width: cli.width,
        precision: cli.precision,
    };
    let data = cli
        .data
        .unwrap_or_else(|| Path::new("data").join(MATCHES_FILE));

    match cli.command {
        Commands::Cities => {
            print!(
                "{}",
                ranking(
                    load(&data)?,
                    GroupKey::City,
                    SortDirection::Descending,
                    None,
                    "도시별 평균 시청률 (전체 순위)",
                    &options,
                )
            );
        }
        Commands::Stadiums { top: limit } => {
            print!(
                "{}",
                ranking(
                    load(&data)?,
                    GroupKey::Stadium,
                    SortDirection::Descending,
                    limit,
                    "홈구장별 평균 시청률 (전체 순위)",
                    &options,
                )
            );
        }
        Commands::Rank {
            by,
            top: limit,
            ascending,
        } => {
            let direction = if ascending {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            };
            let title = format!("{}별 평균 시청률", by.column_label());
            print!(
                "{}",
                ranking(load(&data)?, by, direction, limit, &title, &options)
            );
        }
        Commands::Matches => {
            let records = load(&data)?;
            let matches = ranked_matches(&records);
            print!(
                "{}",
                render_matches("전체 경기 상세 리스트 (시청률 순)", &matches, &options)
            );
        }
        Commands::Team { team, season } => {
            let records = load(&data)?;
            let report = team_report(&records, &team, season.as_deref());
            print!("{}", render_team_report(&report, &options));
        }
        Commands::MissingStadiums => {
            let records = load(&data)?;
            let venues = missing_stadium_venues(&records);
            println!(
                "Matches without a home stadium: {} of {}",
                missing_stadium_count(&records),
                records.len()
            );
            if venues.is_empty() {
                println!("No venue names recorded for those matches.");
            } else {
                println!("Venues:");
                for venue in venues {
                    println!("  {venue}");
                }
            }
        }
        Commands::Gender {
            city,
            bin_width,
            upper,
        } => {
            let bins = HistogramBins::with_overrides(bin_width, upper)?;
            let records = drop_missing(load(&data)?, &[MatchField::Gender, MatchField::Rate]);
            let histogram = gender_distribution(&records, city.as_deref(), bins);
            let title = city.map_or_else(
                || "남녀부 시청률 분포".to_string(),
                |c| format!("남녀부 시청률 분포 ({c})"),
            );
            print!("{}", render_histogram(&title, &histogram, &options));
        }
        Commands::Serve {
            bind_addr,
            port,
            data_dir,
        } => {
            let mut config = ServerConfig::from_env();
            if let Some(bind_addr) = bind_addr {
                config.bind_addr = bind_addr;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(data_dir) = data_dir {
                config.data_dir = data_dir;
            }

            // The server brings its own actix runtime.
            actix_web::rt::System::new().block_on(run_server(config))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "vleague_cli",
            "stadiums",
            "--top",
            "3",
            "--precision",
            "2",
            "--max-rows",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.precision, 2);
        assert_eq!(cli.max_rows, Some(5));
        assert_eq!(cli.width, 1000);
        assert!(matches!(cli.command, Commands::Stadiums { top: Some(3) }));
    }

    #[test]
    fn parses_rank_grouping() {
        let cli = Cli::try_parse_from(["vleague_cli", "rank", "home_team", "--ascending"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Rank {
                by: GroupKey::HomeTeam,
                top: None,
                ascending: true,
            }
        ));
        assert!(Cli::try_parse_from(["vleague_cli", "rank", "venue"]).is_err());
    }

    #[test]
    fn city_ranking_ignores_matches_without_stadium() {
        let records = vec![
            MatchRecord {
                home_city: Some("수원시".to_string()),
                home_stadium: Some("수원실내체육관".to_string()),
                household_rate: Some(1.0),
                ..MatchRecord::default()
            },
            MatchRecord {
                home_city: Some("수원시".to_string()),
                household_rate: Some(3.0),
                ..MatchRecord::default()
            },
        ];
        let out = ranking(
            records,
            GroupKey::City,
            SortDirection::Descending,
            None,
            "t",
            &ReportOptions {
                precision: 1,
                ..ReportOptions::default()
            },
        );
        assert!(out.contains("소속도시"));
        assert!(out.contains("[1 rows]"));
        assert!(!out.contains("3.0"));
    }

    #[test]
    fn parses_histogram_layout() {
        let cli = Cli::try_parse_from(["vleague_cli", "gender", "--bin-width", "0.5"]).unwrap();
        match cli.command {
            Commands::Gender {
                bin_width, upper, ..
            } => {
                assert_eq!(bin_width, Some(0.5));
                assert_eq!(upper, None);
            }
            _ => panic!("expected gender command"),
        }
    }

    #[test]
    fn parses_team_with_season() {
        let cli = Cli::try_parse_from(["vleague_cli", "team", "흥국생명", "--season", "2024-2025"])
            .unwrap();
        match cli.command {
            Commands::Team { team, season } => {
                assert_eq!(team, "흥국생명");
                assert_eq!(season.as_deref(), Some("2024-2025"));
            }
            _ => panic!("expected team command"),
        }
    }
}
