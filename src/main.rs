use anyhow::Result;
use office_activity_tracker::application::{
    ports::{
        change_feed::ChangeFeed,
        security::{PasswordHasher, TokenManager},
        time::{Clock, OfficeTime},
    },
    services::{ApplicationServices, Repositories},
};
use office_activity_tracker::config::AppConfig;
use office_activity_tracker::infrastructure::{
    change_feed::BroadcastChangeFeed,
    database,
    repositories::{
        PostgresActivityRepository, PostgresClientRepository, PostgresUserRepository,
    },
    security::{Argon2PasswordHasher, BiscuitTokenManager},
    time::SystemClock,
};
use office_activity_tracker::presentation::http::{
    live::ShutdownSignal, routes::build_router, state::HttpState,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let repos = Repositories {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        clients: Arc::new(PostgresClientRepository::new(pool.clone())),
        activities: Arc::new(PostgresActivityRepository::new(pool)),
    };

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let change_feed: Arc<dyn ChangeFeed> = Arc::new(BroadcastChangeFeed::default());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let office_time = OfficeTime::new(config.office_offset());

    let services = Arc::new(ApplicationServices::new(
        repos,
        password_hasher,
        token_manager,
        change_feed,
        clock,
        office_time,
    ));

    let (stop_streams, shutdown) = ShutdownSignal::channel();
    let state = HttpState { services, shutdown };
    let app = build_router(state, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(offset = %config.office_offset(), "listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // Live streams hold their connections open; end them so the
            // drain can finish.
            if stop_streams.send(true).is_err() {
                tracing::debug!("no live streams to stop");
            }
        })
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
