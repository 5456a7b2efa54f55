//! CLI administration tool for the SmartRetail portal.
//!
//! Diagnoses the hosted authentication service and the database without
//! going through the browser.
//!
//! # Usage
//!
//! ```bash
//! # Try a real sign-in against the authentication service
//! cargo run --bin admin -- auth check --email manager@example.com
//!
//! # Today's figures as the dashboard would show them
//! cargo run --bin admin -- stats
//!
//! # Database tools
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db info
//! cargo run --bin admin -- db migrate
//!
//! # Effective configuration, secrets masked
//! cargo run --bin admin -- config
//! ```
//!
//! # Environment Variables
//!
//! - `AUTH_URL`, `AUTH_ANON_KEY`: for `auth` commands
//! - `DATABASE_URL` (or `DB_*`): for `db` and `stats`

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Input, Password};
use sqlx::PgPool;

use smartretail::application::services::{AuthService, DashboardService};
use smartretail::config::{self, Config};
use smartretail::infrastructure::identity::GoTrueClient;
use smartretail::infrastructure::persistence::PgMetricsRepository;

/// CLI tool for operating the SmartRetail portal.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Authentication service diagnostics
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Show today's dashboard figures
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in with email and password and report the outcome
    Check {
        /// Account email (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Check that the authentication service is reachable
    Ping,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply ./migrations (local development schema)
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Auth { action } => handle_auth_action(action).await?,
        Commands::Stats => handle_stats(&connect_db().await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect_db().await?).await?,
        Commands::Config => handle_config()?,
    }

    Ok(())
}

async fn connect_db() -> Result<PgPool> {
    let database_url =
        Config::load_database_url().context("DATABASE_URL or DB_* variables must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

fn auth_service() -> Result<AuthService> {
    let url = std::env::var("AUTH_URL").context("AUTH_URL must be set")?;
    let key = std::env::var("AUTH_ANON_KEY").context("AUTH_ANON_KEY must be set")?;

    let client = GoTrueClient::new(&url, key, Duration::from_secs(10), 0)
        .context("Failed to build authentication client")?;

    Ok(AuthService::new(Arc::new(client)))
}

/// Dispatches authentication diagnostics.
async fn handle_auth_action(action: AuthAction) -> Result<()> {
    let service = auth_service()?;

    match action {
        AuthAction::Ping => {
            println!("{}", "🔍 Checking authentication service...".bright_blue());

            if service.provider_healthy().await {
                println!("{}", "✅ Authentication service reachable".green().bold());
            } else {
                println!("{}", "❌ Authentication service unreachable".red().bold());
            }
        }
        AuthAction::Check { email } => {
            println!("{}", "🔑 Test Sign-in".bright_blue().bold());
            println!();

            let email = match email {
                Some(email) => email,
                None => Input::new().with_prompt("Email").interact_text()?,
            };
            let password = Password::new().with_prompt("Password").interact()?;

            match service.login(&email, &password).await {
                Ok(session) => {
                    println!();
                    println!("{}", "✅ Sign-in successful!".green().bold());
                    println!("  User ID:   {}", session.user_id.cyan());
                    println!("  Email:     {}", session.email.cyan());
                    println!(
                        "  Refresh:   {}",
                        if session.refresh_token.is_some() {
                            "issued".green()
                        } else {
                            "none".yellow()
                        }
                    );
                    if let Some(expires_at) = session.expires_at {
                        println!("  Expires:   {}", expires_at.to_string().bright_black());
                    }

                    service.logout(Some(&session.access_token)).await;
                    println!("{}", "  Session revoked again".bright_black());
                }
                Err(e) => {
                    println!();
                    println!("{} {}", "❌".red(), e.user_message().red().bold());
                    println!("  {}", e.to_string().bright_black());
                }
            }
            println!();
        }
    }

    Ok(())
}

/// Prints today's figures.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    let repository = PgMetricsRepository::new(Arc::new(pool.clone()));
    let service = DashboardService::new(Arc::new(repository));

    let metrics = service.metrics().await?;

    println!("{}", "📊 Today".bright_blue().bold());
    println!();
    println!(
        "  Sales:       {} ({:+.1}%)",
        format!("RM {:.2}", metrics.sales.today).bright_white().bold(),
        metrics.sales.percentage
    );
    println!(
        "  Items sold:  {} ({:+.1}%)",
        metrics.items.today.to_string().bright_white().bold(),
        metrics.items.percentage
    );
    println!(
        "  Employees:   {}/{} active",
        metrics.employees.active, metrics.employees.total
    );
    println!();

    if metrics.low_stock.is_empty() {
        println!("{}", "  No low-stock products".green());
    } else {
        println!("{}", "  Low stock:".yellow().bold());
        for product in &metrics.low_stock {
            println!(
                "    {:<30} {:>10}  {}",
                product.name,
                product.stock_display(),
                product.status().label().yellow()
            );
        }
    }
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            println!("  PostgreSQL: {}", version.bright_white());

            for table in ["employees", "products", "sales", "sales_items"] {
                let count: Option<i64> = sqlx::query_scalar(&format!(
                    "SELECT COUNT(*) FROM {}",
                    table
                ))
                .fetch_one(pool)
                .await
                .ok();

                match count {
                    Some(count) => println!("  {:<12} {}", table, count.to_string().cyan()),
                    None => println!("  {:<12} {}", table, "missing".red()),
                }
            }
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Migration failed")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}

fn handle_config() -> Result<()> {
    let config = config::load_from_env()?;

    println!("{}", "⚙️  Configuration".bright_blue().bold());
    println!();
    for (label, value) in config.summary() {
        println!("  {:<16} {}", format!("{}:", label), value.bright_white());
    }
    println!();

    Ok(())
}
