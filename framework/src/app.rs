//! Application runner
//!
//! Wires config, logging, the database pool, migrations and the HTTP server
//! together behind a small CLI.
//!
//! ```rust,ignore
//! use framework::Application;
//!
//! #[tokio::main]
//! async fn main() -> ExitCode {
//!     let result = Application::new()
//!         .config(config::register_all)
//!         .migrations::<migrations::Migrator>()
//!         .middleware(LoggingMiddleware)
//!         .routes(routes::from_config)
//!         .run()
//!         .await;
//!     // ...
//! }
//! ```

use crate::config::{AppConfig, Config};
use crate::database::{DatabaseConfig, DbConnection};
use crate::error::FrameworkError;
use crate::logging;
use crate::middleware::{Middleware, MiddlewareRegistry};
use crate::routing::Router;
use crate::server::Server;
use clap::{Parser, Subcommand};
use sea_orm_migration::prelude::*;
use std::marker::PhantomData;
use std::path::Path;

/// Command line interface of the application binary
#[derive(Debug, Parser)]
#[command(about = "Task list server and database utilities")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Commands {
    /// Run the web server (default command)
    Serve {
        /// Skip running migrations on startup
        #[arg(long)]
        no_migrate: bool,
    },
    /// Run pending database migrations
    Migrate,
    /// Show migration status
    #[command(name = "migrate:status")]
    MigrateStatus,
    /// Roll back the last migration(s)
    #[command(name = "migrate:rollback")]
    MigrateRollback {
        /// Number of migrations to roll back
        #[arg(default_value = "1")]
        steps: u32,
    },
    /// Drop all tables and re-run all migrations
    #[command(name = "migrate:fresh")]
    MigrateFresh,
}

type ConfigFn = Box<dyn FnOnce()>;
type RoutesFn = Box<dyn FnOnce(DbConnection) -> Result<Router, FrameworkError>>;

/// Application builder
pub struct Application<M = NoMigrator>
where
    M: MigratorTrait,
{
    config_fn: Option<ConfigFn>,
    routes_fn: Option<RoutesFn>,
    middleware: MiddlewareRegistry,
    _migrator: PhantomData<M>,
}

/// Placeholder migrator with no migrations
pub struct NoMigrator;

impl MigratorTrait for NoMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![]
    }
}

impl Application<NoMigrator> {
    pub fn new() -> Self {
        Application {
            config_fn: None,
            routes_fn: None,
            middleware: MiddlewareRegistry::new(),
            _migrator: PhantomData,
        }
    }
}

impl Default for Application<NoMigrator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Application<M>
where
    M: MigratorTrait,
{
    /// Register application config, called right after `.env` loading
    pub fn config<F>(mut self, f: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        self.config_fn = Some(Box::new(f));
        self
    }

    /// Build the router from the open database connection
    pub fn routes<F>(mut self, f: F) -> Self
    where
        F: FnOnce(DbConnection) -> Result<Router, FrameworkError> + 'static,
    {
        self.routes_fn = Some(Box::new(f));
        self
    }

    /// Add global middleware, in registration order
    pub fn middleware<T: Middleware + 'static>(mut self, middleware: T) -> Self {
        self.middleware = self.middleware.append(middleware);
        self
    }

    /// Configure the migrator used by `serve` and the `migrate*` commands
    pub fn migrations<NewM>(self) -> Application<NewM>
    where
        NewM: MigratorTrait,
    {
        Application {
            config_fn: self.config_fn,
            routes_fn: self.routes_fn,
            middleware: self.middleware,
            _migrator: PhantomData,
        }
    }

    /// Parse the command line and run the selected command
    ///
    /// - `serve` (default): migrate, then run the web server until SIGINT/SIGTERM
    /// - `migrate`: run pending migrations
    /// - `migrate:status`: show migration status
    /// - `migrate:rollback [steps]`: roll back migrations
    /// - `migrate:fresh`: drop everything and re-run all migrations
    ///
    /// The database pool is closed before returning.
    pub async fn run(self) -> Result<(), FrameworkError> {
        let cli = Cli::parse();

        let dotenv = Config::init(Path::new("."));

        let Application {
            config_fn,
            routes_fn,
            middleware,
            _migrator,
        } = self;

        let app_config = Config::get::<AppConfig>().unwrap_or_default();
        logging::init(&app_config);
        dotenv.log();

        if let Some(config_fn) = config_fn {
            config_fn();
        }

        tracing::debug!(
            name = %app_config.name,
            environment = %app_config.environment,
            "configuration loaded"
        );

        let db_config = Config::get::<DatabaseConfig>().unwrap_or_default();
        let db = DbConnection::connect(&db_config).await?;

        let command = cli.command.unwrap_or(Commands::Serve { no_migrate: false });
        let outcome = execute::<M>(command, &db, routes_fn, middleware).await;

        let closed = db.close().await;
        outcome.and(closed)
    }
}

async fn execute<M: MigratorTrait>(
    command: Commands,
    db: &DbConnection,
    routes_fn: Option<RoutesFn>,
    middleware: MiddlewareRegistry,
) -> Result<(), FrameworkError> {
    match command {
        Commands::Serve { no_migrate } => {
            if !no_migrate {
                migrate_up::<M>(db).await?;
            }
            serve(db.clone(), routes_fn, middleware).await
        }
        Commands::Migrate => migrate_up::<M>(db).await,
        Commands::MigrateStatus => Ok(M::status(db.inner()).await?),
        Commands::MigrateRollback { steps } => {
            tracing::info!(steps, "rolling back migrations");
            Ok(M::down(db.inner(), Some(steps)).await?)
        }
        Commands::MigrateFresh => {
            tracing::warn!("dropping all tables and re-running migrations");
            Ok(M::fresh(db.inner()).await?)
        }
    }
}

async fn migrate_up<M: MigratorTrait>(db: &DbConnection) -> Result<(), FrameworkError> {
    M::up(db.inner(), None).await?;
    tracing::info!("migrations up to date");
    Ok(())
}

async fn serve(
    db: DbConnection,
    routes_fn: Option<RoutesFn>,
    middleware: MiddlewareRegistry,
) -> Result<(), FrameworkError> {
    let router = match routes_fn {
        Some(routes_fn) => routes_fn(db)?,
        None => Router::new(),
    };

    Server::from_config(router)
        .with_middleware(middleware)
        .run_until(shutdown_signal())
        .await
}

/// Resolves on Ctrl+C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Option<Commands> {
        Cli::try_parse_from(std::iter::once("tasklist").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_no_subcommand_means_serve() {
        assert_eq!(parse(&[]), None);
        assert_eq!(
            parse(&["serve", "--no-migrate"]),
            Some(Commands::Serve { no_migrate: true })
        );
    }

    #[test]
    fn test_migration_commands() {
        assert_eq!(parse(&["migrate"]), Some(Commands::Migrate));
        assert_eq!(parse(&["migrate:status"]), Some(Commands::MigrateStatus));
        assert_eq!(parse(&["migrate:fresh"]), Some(Commands::MigrateFresh));
        assert_eq!(
            parse(&["migrate:rollback"]),
            Some(Commands::MigrateRollback { steps: 1 })
        );
        assert_eq!(
            parse(&["migrate:rollback", "3"]),
            Some(Commands::MigrateRollback { steps: 3 })
        );
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["tasklist", "schedule:run"]).is_err());
    }
}
