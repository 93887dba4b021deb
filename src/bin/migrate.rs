use recipe_favorites_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool},
    migrate::{MigrationOutcome, PgSchema, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = create_pool(&config.database_url, 1)?;
    let orm = create_orm_conn(pool.clone());
    let schema = PgSchema::new(pool, orm, &config.migrations_dir);

    match run_migrations(&schema, config.env).await {
        MigrationOutcome::Migrated => println!("Migrations applied"),
        MigrationOutcome::Recovered { cause } => {
            println!("Migrations failed ({cause}); favorites table created directly")
        }
        MigrationOutcome::DegradedContinue { cause, fallback } => {
            anyhow::bail!("schema setup failed: {cause}; fallback: {fallback}")
        }
        MigrationOutcome::Fatal(err) => return Err(err.into()),
    }
    Ok(())
}
