mod config;
mod logging;
mod signals;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderName, Request};
use clap::{Parser, Subcommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use storefront_entities::ServiceConfig;
use storefront_entities::api::rest::auth::{StaticTokenValidator, TokenValidator};
use storefront_entities::api::rest::routes::router;
use storefront_entities::infra::storage::migrations::Migrator;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, CliOverrides, DatabaseConfig, MOCK_DSN};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Storefront entities server - CRUD REST API over storefront tables
#[derive(Parser)]
#[command(name = "storefront-server")]
#[command(version)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (JSON, tokens redacted) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory sqlite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(&CliOverrides {
        port: cli.port,
        verbose: cli.verbose,
        mock: cli.mock,
    });

    if cli.print_config {
        println!("{}", config.to_redacted_json()?);
        return Ok(());
    }

    logging::init(&config.logging)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.validate()?;
    println!("Configuration is valid");
    Ok(())
}

async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.dsn.clone());
    // every pooled connection to sqlite::memory: would see its own empty database
    let max = if cfg.dsn == MOCK_DSN { 1 } else { cfg.max_connections };
    opts.max_connections(max)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let db = Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to database '{}'", redact_dsn(&cfg.dsn)))?;
    tracing::info!(dsn = %redact_dsn(&cfg.dsn), max_connections = max, "Database connected");
    Ok(db)
}

/// Strip credentials from a DSN before logging it.
fn redact_dsn(dsn: &str) -> String {
    match (dsn.find("://"), dsn.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &dsn[..scheme_end], &dsn[at..])
        }
        _ => dsn.to_owned(),
    }
}

fn build_app(db: &DatabaseConnection, config: &AppConfig) -> Router {
    let validator: Arc<dyn TokenValidator> =
        Arc::new(StaticTokenValidator::new(config.auth.tokens.clone()));
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router(db, &ServiceConfig::from(&config.entities), validator)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                let rid = req
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    request_id = %rid,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}

async fn run_server(config: AppConfig) -> Result<()> {
    config.validate()?;
    tracing::info!("Storefront server starting");

    let db = connect(&config.database).await?;
    Migrator::up(&db, None)
        .await
        .context("failed to apply database migrations")?;
    tracing::info!("Database schema is up to date");

    let shutdown = signals::ShutdownListener::install()?;
    let app = build_app(&db, &config);
    let listener = TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %listener.local_addr()?, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.wait().await;
        })
        .await
        .context("HTTP server failed")?;

    db.close().await.context("failed to close database")?;
    tracing::info!("Storefront server stopped");
    Ok(())
}
