use anyhow::{Context, Result};
use axum::Router;
use clap::{Parser, Subcommand};
use db::{ConnectOpts, Database};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;

use api_ingress::{ApiIngress, ApiIngressConfig};
use users_info::api::rest::{register_routes, UsersApiDoc};
use users_info::domain::service::Service;
use users_info::infra::storage::{ensure_users_table, SqliteUsersRepository};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Users Server - CRUD over a local users table
#[derive(Parser)]
#[command(name = "users-server")]
#[command(about = "Users Server - CRUD over a local users table")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration and database
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    // Stdout carries only the YAML here
    if args.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    runtime::init_logging_from_config(&config.logging, &config.home_dir());
    tracing::info!("Users Server starting");
    tracing::debug!(home_dir = %config.home_dir().display(), "Effective server config: {:?}", config.server);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config).await,
    }
}

/// Resolve the configured DSN against the home dir and make sure the schema exists.
async fn open_database(config: &AppConfig) -> Result<Database> {
    let dsn = config.database.url.trim();
    if dsn.is_empty() {
        anyhow::bail!("Database URL not configured");
    }

    let dsn = db::absolutize_dsn(dsn, &config.home_dir())
        .with_context(|| format!("Invalid database DSN '{}'", dsn))?;

    let opts = ConnectOpts {
        busy_timeout: config.database.busy_timeout_ms.map(Duration::from_millis),
        ..Default::default()
    };

    let db = Database::open(&dsn, opts).context("Failed to configure database")?;
    tracing::info!("Using database file: {}", db.path().display());

    ensure_users_table(&db)
        .await
        .context("Failed to ensure users table")?;

    Ok(db)
}

async fn run_server(config: AppConfig) -> Result<()> {
    let db = open_database(&config).await?;

    let repo = SqliteUsersRepository::new(db);
    let service = Arc::new(Service::new(Arc::new(repo)));
    let routes = register_routes(Router::new(), service);

    let ingress = ApiIngress::new(ApiIngressConfig::from(&config));
    let router = ingress.build_router(routes, [UsersApiDoc::openapi()])?;
    let listener = ingress.bind().await?;

    api_ingress::serve(listener, router, async {
        if let Err(e) = runtime::wait_for_shutdown().await {
            tracing::error!("Failed to listen for shutdown signals: {:#}", e);
            std::future::pending::<()>().await;
        }
    })
    .await?;

    tracing::info!("Users Server stopped");
    Ok(())
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let db = open_database(&config).await?;
    // Make sure a connection can actually be opened and returned.
    db.acquire().await?.release().await?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Database: {}", db.path().display());
    println!("{}", config.to_yaml()?);

    Ok(())
}
