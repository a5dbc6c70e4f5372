#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the V-League viewership dashboard.
//!
//! Serves the REST API consumed by the dashboard widgets and, when a
//! production build is present, the single-page frontend itself. Every
//! request recomputes its result from the CSV files in the data directory;
//! the only shared state is the lookup tables and widget templates built
//! at startup.

pub mod config;
mod handlers;
pub mod widgets;

use std::path::{Path, PathBuf};

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::dev::{ServiceRequest, ServiceResponse, fn_service};
use actix_web::{App, HttpServer, middleware, web};
use vleague_lookup::{LookupError, LookupTables};

pub use config::ServerConfig;
use widgets::WidgetTemplates;

/// Errors that can prevent the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The lookup tables could not be loaded.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The widget templates could not be parsed.
    #[error("Invalid widget templates: {0}")]
    Widgets(#[from] serde_json::Error),

    /// The HTTP server failed to bind or crashed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Shared application state.
pub struct AppState {
    /// Runtime configuration.
    pub config: ServerConfig,
    /// City and team display metadata.
    pub lookup: LookupTables,
    /// Dashboard widget descriptors.
    pub widgets: WidgetTemplates,
}

impl AppState {
    /// Loads the lookup tables and widget templates for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] if either cannot be loaded.
    pub fn load(config: ServerConfig) -> Result<Self, ServerError> {
        let lookup = LookupTables::load(config.lookup_dir.as_deref())?;
        let widgets = WidgetTemplates::embedded()?;
        log::info!("Loaded {} widget templates", widgets.len());

        Ok(Self {
            config,
            lookup,
            widgets,
        })
    }
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/widgets", web::get().to(handlers::widgets))
            .route("/map-data", web::get().to(handlers::map_data))
            .route(
                "/gender-distribution",
                web::get().to(handlers::gender_distribution),
            )
            .route("/rankings", web::get().to(handlers::rankings))
            .route("/teams/{team}", web::get().to(handlers::team_report)),
    );
}

/// Serves the frontend build in `dist`, answering unknown paths with
/// `index.html` so client-side routing works.
fn frontend(dist: &Path) -> Files {
    let index: PathBuf = dist.join("index.html");

    Files::new("/", dist)
        .index_file("index.html")
        .default_handler(fn_service(move |req: ServiceRequest| {
            let index = index.clone();
            async move {
                let (req, _) = req.into_parts();
                let file = NamedFile::open_async(index).await?;
                let res = file.into_response(&req);
                Ok(ServiceResponse::new(req, res))
            }
        }))
}

/// Starts the dashboard API server.
///
/// Loads the lookup tables and widget templates, then runs the Actix-Web
/// HTTP server until it is stopped. The caller is responsible for
/// initializing logging and providing the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns [`ServerError`] if startup data cannot be loaded or the server
/// fails to bind.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let bind_addr = config.bind_addr.clone();
    let port = config.port;
    let dist = config.dist().map(Path::to_path_buf);

    log::info!("Reading data from {}", config.data_dir.display());
    match &dist {
        Some(dist) => log::info!("Serving frontend build from {}", dist.display()),
        None => log::info!(
            "No frontend build at {}, serving the API only",
            config.dist_dir.display()
        ),
    }

    let state = web::Data::new(AppState::load(config)?);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();
        let dist = dist.clone();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            .configure(move |cfg| {
                if let Some(dist) = &dist {
                    cfg.service(frontend(dist));
                }
            })
    })
    .bind((bind_addr, port))?
    .run()
    .await?;

    Ok(())
}
