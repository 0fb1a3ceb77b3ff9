use shared::config::ConnectionPool;

/// Applies the embedded schema under `migrations/`.
pub async fn run_migrations(pool: &ConnectionPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
