//! `employee-directory` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`    — start the API server.
//! - `migrate`  — run pending database migrations.
//! - `validate` — sanitize and validate employee records from a JSON file.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use db::{EmployeeStore, MemoryEmployeeStore, PgEmployeeStore, PoolSettings};
use directory::{validate_raw, DepartmentPolicy, RawEmployeeInput};
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "cli=info,api=info,db=info,directory=info,tower_http=info";

#[derive(Parser)]
#[command(
    name = "employee-directory",
    about = "Employee directory REST service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve(ServeArgs),
    /// Run pending database migrations.
    Migrate {
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
    /// Validate employee records in a JSON file (one object or an array).
    Validate {
        /// Path to the JSON file.
        path: std::path::PathBuf,
        #[command(flatten)]
        policy: PolicyArgs,
    },
}

#[derive(Args)]
struct ServeArgs {
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind: String,
    #[arg(long, env = "DATABASE_URL", required_unless_present = "in_memory")]
    database_url: Option<String>,
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    max_connections: u32,
    /// Seconds to wait for a database connection before failing a request.
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    acquire_timeout_secs: u64,
    /// Apply pending migrations before accepting requests.
    #[arg(long)]
    migrate: bool,
    /// Keep records in process memory instead of Postgres.
    #[arg(long)]
    in_memory: bool,
    #[command(flatten)]
    policy: PolicyArgs,
}

impl ServeArgs {
    fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }
}

#[derive(Args)]
struct PolicyArgs {
    /// Only accept departments from the built-in catalogue.
    #[arg(long, env = "STRICT_DEPARTMENTS")]
    strict_departments: bool,
}

impl PolicyArgs {
    fn policy(&self) -> DepartmentPolicy {
        if self.strict_departments {
            DepartmentPolicy::Catalogue
        } else {
            DepartmentPolicy::Lenient
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Migrate { database_url } => {
            info!("Running migrations");
            let settings = PoolSettings { max_connections: 2, ..PoolSettings::default() };
            let pool = db::pool::create_pool(&database_url, settings)
                .await
                .context("failed to connect to database")?;
            db::pool::run_migrations(&pool).await.context("migration failed")?;
            info!("Migrations applied successfully");
            Ok(())
        }
        Command::Validate { path, policy } => validate_file(&path, policy.policy()),
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let store: Arc<dyn EmployeeStore> = match (&args.database_url, args.in_memory) {
        (_, true) => {
            warn!("Serving from an in-memory store; records are lost on exit");
            Arc::new(MemoryEmployeeStore::new())
        }
        (Some(url), false) => {
            let pool = db::pool::create_pool(url, args.pool_settings())
                .await
                .context("failed to connect to database")?;
            if args.migrate {
                db::pool::run_migrations(&pool).await.context("migration failed")?;
            }
            Arc::new(PgEmployeeStore::new(pool))
        }
        (None, false) => bail!("DATABASE_URL is required unless --in-memory is set"),
    };

    let policy = args.policy.policy();
    info!(bind = %args.bind, ?policy, "Starting API server");
    api::serve(&args.bind, api::AppState::new(store, policy))
        .await
        .context("server error")
}

fn validate_file(path: &std::path::Path, policy: DepartmentPolicy) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read file {}", path.display()))?;
    let records = match serde_json::from_str::<Value>(&content).context("invalid JSON")? {
        Value::Array(items) => items,
        other => vec![other],
    };

    let mut failures = 0;
    for (index, record) in records.into_iter().enumerate() {
        let raw: RawEmployeeInput = serde_json::from_value(record)
            .with_context(|| format!("record {index} is not a JSON object"))?;
        match validate_raw(raw, policy) {
            Ok(employee) => println!("record {index}: ok ({})", employee.email),
            Err(err) => {
                failures += 1;
                for issue in &err.issues {
                    println!("record {index}: {}: {}", issue.path, issue.message);
                }
            }
        }
    }

    if failures > 0 {
        bail!("{failures} record(s) failed validation");
    }
    Ok(())
}
