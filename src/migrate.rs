//! Startup schema bootstrap.
//!
//! Two stages: apply the migration directory, and if that (or the follow-up
//! probe) fails, run the idempotent `CREATE TABLE IF NOT EXISTS` from
//! [`crate::schema`]. The caller gets a [`MigrationOutcome`] and decides
//! whether to keep starting.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, EntityTrait, QuerySelect, Statement};
use sqlx::migrate::{MigrateError, Migrator};
use thiserror::Error;

use crate::{
    config::AppEnv,
    db::{DbPool, OrmConn},
    entity::Favorites,
    schema::{CREATE_FAVORITES_TABLE, FAVORITES_TABLE},
};

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to load migrations from {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: MigrateError,
    },

    #[error("failed to apply migrations: {0}")]
    Apply(#[source] MigrateError),

    #[error("fallback table creation failed: {0}")]
    Fallback(#[source] sea_orm::DbErr),

    #[error("favorites table is not readable: {0}")]
    Probe(#[source] sea_orm::DbErr),
}

#[derive(Debug)]
pub enum MigrationOutcome {
    /// The migration directory applied and the table is readable.
    Migrated,
    /// Migrations failed, the fallback DDL brought the table up.
    Recovered { cause: MigrationError },
    /// Both stages failed in production; the server starts anyway.
    DegradedContinue {
        cause: MigrationError,
        fallback: MigrationError,
    },
    /// Both stages failed outside production. Holds the migration error.
    Fatal(MigrationError),
}

impl MigrationOutcome {
    pub fn schema_ready(&self) -> bool {
        matches!(
            self,
            MigrationOutcome::Migrated | MigrationOutcome::Recovered { .. }
        )
    }
}

/// Operations the runner needs from the database.
#[async_trait]
pub trait SchemaTarget: Send + Sync {
    async fn apply_migrations(&self) -> Result<(), MigrationError>;

    async fn create_table_fallback(&self) -> Result<(), MigrationError>;

    /// Bounded read (`LIMIT 1`) proving the favorites table is accessible.
    async fn probe(&self) -> Result<(), MigrationError>;
}

/// Postgres target: sqlx migrator for the directory, SeaORM for DDL and probe.
pub struct PgSchema {
    pool: DbPool,
    orm: OrmConn,
    migrations_dir: PathBuf,
}

impl PgSchema {
    pub fn new(pool: DbPool, orm: OrmConn, migrations_dir: impl AsRef<Path>) -> Self {
        Self {
            pool,
            orm,
            migrations_dir: migrations_dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl SchemaTarget for PgSchema {
    async fn apply_migrations(&self) -> Result<(), MigrationError> {
        let migrator = Migrator::new(self.migrations_dir.as_path())
            .await
            .map_err(|source| MigrationError::Load {
                path: self.migrations_dir.clone(),
                source,
            })?;
        tracing::debug!(
            dir = %self.migrations_dir.display(),
            count = migrator.iter().count(),
            "applying migrations"
        );
        migrator.run(&self.pool).await.map_err(MigrationError::Apply)
    }

    async fn create_table_fallback(&self) -> Result<(), MigrationError> {
        let backend = self.orm.get_database_backend();
        self.orm
            .execute(Statement::from_string(backend, CREATE_FAVORITES_TABLE))
            .await
            .map_err(MigrationError::Fallback)?;
        Ok(())
    }

    async fn probe(&self) -> Result<(), MigrationError> {
        Favorites::find()
            .limit(1)
            .all(&self.orm)
            .await
            .map_err(MigrationError::Probe)?;
        Ok(())
    }
}

/// Single pass, no retries and no locking; assumes one instance migrates at a time.
pub async fn run_migrations<T: SchemaTarget + ?Sized>(target: &T, env: AppEnv) -> MigrationOutcome {
    tracing::info!(table = FAVORITES_TABLE, "running database migrations");

    let cause = match primary_stage(target).await {
        Ok(()) => {
            tracing::info!(table = FAVORITES_TABLE, "table is accessible");
            return MigrationOutcome::Migrated;
        }
        Err(err) => err,
    };

    tracing::warn!(error = %cause, "migrations failed, creating table directly");

    match fallback_stage(target).await {
        Ok(()) => {
            tracing::info!(table = FAVORITES_TABLE, "table created by fallback");
            MigrationOutcome::Recovered { cause }
        }
        Err(fallback) if env.is_production() => {
            tracing::warn!(
                error = %cause,
                fallback_error = %fallback,
                "schema setup failed, continuing in production"
            );
            MigrationOutcome::DegradedContinue { cause, fallback }
        }
        Err(fallback) => {
            tracing::error!(
                error = %cause,
                fallback_error = %fallback,
                "schema setup failed"
            );
            MigrationOutcome::Fatal(cause)
        }
    }
}

async fn primary_stage<T: SchemaTarget + ?Sized>(target: &T) -> Result<(), MigrationError> {
    target.apply_migrations().await?;
    tracing::info!("migrations completed");
    target.probe().await
}

async fn fallback_stage<T: SchemaTarget + ?Sized>(target: &T) -> Result<(), MigrationError> {
    target.create_table_fallback().await?;
    target.probe().await
}
