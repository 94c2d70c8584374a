//! Serve command - run the HTTP API until interrupted

use roster_core::Config;

pub async fn execute(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        addr = %config.server.addr,
        database = %config.database.path.display(),
        "Starting review-roster"
    );

    roster_server::serve(config)
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))
}
