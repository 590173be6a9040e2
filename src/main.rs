use anyhow::Result;
use avizier::{
    config::{Config, LogFormat},
    runner::Runner,
    store::{MemoryStore, PgPublicationStore, PublicationStore},
};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format());

    // Without a database the records are printed as JSON lines at the end
    let (store, memory): (Arc<dyn PublicationStore>, Option<Arc<MemoryStore>>) =
        match config.database_url() {
            Some(database_url) => {
                let pool = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(u32::try_from(config.concurrency())? + 1)
                    .connect(database_url)
                    .await?;
                sqlx::migrate!("./migrations").run(&pool).await?;
                (Arc::new(PgPublicationStore::new(pool)), None)
            }
            None => {
                let memory = Arc::new(MemoryStore::new());
                (memory.clone(), Some(memory))
            }
        };

    let runner = Runner::new(&config, store)?;

    let shutdown_token = runner.shutdown_token();
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            return;
        }
        info!("Received shutdown signal, finishing in-flight announcements...");
        shutdown_token.cancel();
    });

    let summary = runner.run().await?;

    if let Some(memory) = memory {
        for publication in memory.publications() {
            println!("{}", serde_json::to_string(&publication)?);
        }
    }

    if summary.failed > 0 {
        info!(failed = summary.failed, "some announcements could not be processed");
    }
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
