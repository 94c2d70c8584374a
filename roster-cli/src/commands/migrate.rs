//! Migrate command - bring the database schema up to date

use roster_core::Config;
use roster_db::Database;

pub async fn execute(config: &Config) -> anyhow::Result<()> {
    let db = Database::connect(config.database.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open database: {}", e))?;
    db.migrate()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    db.close().await;

    println!("Database ready: {}", config.database.path.display());
    Ok(())
}
