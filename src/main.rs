use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tg_media_relay::{
    infra::config::Config, media::records::PostgresMediaRecords, routes,
    telegram::client::TelegramClient, AppState, MIGRATOR,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file_loaded = dotenvy::dotenv().is_ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if env_file_loaded {
        info!("loaded .env file");
    }

    let config =
        Arc::new(Config::from_env().context("failed to load configuration")?);

    if config.access.allowed_group_ids.is_empty() {
        warn!(
            "ALLOWED_GROUP_IDS is empty - the bot will only answer in private chats"
        );
    }

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await
        .context("failed to connect to PostgreSQL")?;
    MIGRATOR
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    let records = Arc::new(PostgresMediaRecords::new(pool));
    let bot = Arc::new(TelegramClient::new(
        &config.telegram.api_base,
        &config.telegram.bot_token,
    ));
    let state = AppState::new(Arc::clone(&config), records, bot);
    let router = routes::create_router(state);

    let addr: SocketAddr =
        format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .context("invalid SERVER_HOST/SERVER_PORT")?;
    info!("starting Telegram media relay on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = ?err, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
