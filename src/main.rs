use poem::listener::TcpListener;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::EnvFilter;

use user_posts_api::api::app;
use user_posts_api::config::Config;
use user_posts_api::migration::Migrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    let db = Database::connect(config.database_url.as_str()).await?;
    Migrator::up(&db, None).await?;

    tracing::info!(addr = %config.bind_addr, "listening");
    poem::Server::new(TcpListener::bind(config.bind_addr))
        .run(app(db))
        .await?;
    Ok(())
}
