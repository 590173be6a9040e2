use sqlx::{Pool, Postgres, postgres::PgPoolOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let db_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable not set"))?;

    let pool: Pool<Postgres> = PgPoolOptions::new()
        .max_connections(1)
        .connect(&db_url)
        .await?;

    // creates the publications table; no-op if up-to-date
    sqlx::migrate!("./migrations").run(&pool).await?;
    println!("migrations applied");

    Ok(())
}
