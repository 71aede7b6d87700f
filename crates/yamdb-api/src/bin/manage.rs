//! YaMDb management commands
//!
//! ```bash
//! cargo run -p yamdb-api --bin yamdb-manage -- migrate
//! cargo run -p yamdb-api --bin yamdb-manage -- load-csv --data-dir static/data
//! cargo run -p yamdb-api --bin yamdb-manage -- create-superuser --username root --email root@example.com
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use yamdb_common::{try_init_tracing, AppConfig};
use yamdb_core::entities::NewUser;
use yamdb_core::traits::UserRepository;
use yamdb_core::validation::{validate_email, validate_username};
use yamdb_db::{create_pool, run_migrations, CsvImporter, PgPool, PgUserRepository};

#[derive(Debug, Parser)]
#[command(name = "yamdb-manage", about = "YaMDb administration commands")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending schema migrations
    Migrate,

    /// Load the seed CSV files into an empty database
    LoadCsv {
        #[arg(long, default_value = "static/data")]
        data_dir: PathBuf,
    },

    /// Create an account with full admin rights
    CreateSuperuser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("failed to load configuration")?;
    let pool = create_pool(&yamdb_db::DatabaseConfig::from(&config.database))
        .await
        .context("failed to connect to the database")?;

    match cli.command {
        Command::Migrate => migrate(&pool, &config).await,
        Command::LoadCsv { data_dir } => load_csv(pool, data_dir).await,
        Command::CreateSuperuser { username, email } => {
            create_superuser(pool, &username, &email).await
        }
    }
}

async fn migrate(pool: &PgPool, config: &AppConfig) -> anyhow::Result<()> {
    run_migrations(pool, &config.database.migrations_dir)
        .await
        .context("migration failed")?;
    info!(dir = %config.database.migrations_dir, "Migrations applied");
    Ok(())
}

async fn load_csv(pool: PgPool, data_dir: PathBuf) -> anyhow::Result<()> {
    let summary = CsvImporter::new(pool, &data_dir)
        .load_all()
        .await
        .with_context(|| format!("import from {} failed", data_dir.display()))?;

    for (table, rows) in &summary.loaded {
        info!(table = %table, rows = rows, "Loaded");
    }
    info!(total = summary.total(), "Import finished");
    Ok(())
}

async fn create_superuser(pool: PgPool, username: &str, email: &str) -> anyhow::Result<()> {
    validate_username(username).context("invalid username")?;
    validate_email(email).context("invalid email")?;

    let user = PgUserRepository::new(pool)
        .create(&NewUser::superuser(username, email))
        .await
        .context("failed to create superuser")?;
    info!(user_id = %user.id, username = %user.username, "Superuser created");
    Ok(())
}
