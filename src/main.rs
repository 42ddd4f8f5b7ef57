use mimalloc::MiMalloc;
use rollbook::config::Config;
use rollbook::db::{self, DbActorArgs};
use rollbook::server::router::{RollbookState, cors_layer, rollbook_router};
use rollbook::service::StudentService;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.redacted_database_url(),
        loglevel = %cfg.loglevel,
        listen_addr = %cfg.listen_addr,
        listen_port = cfg.listen_port,
        cors_origin = %cfg.cors_origin,
        bootstrap_schema = cfg.bootstrap_schema
    );

    let cors = cors_layer(&cfg.cors_origin)?;

    // No degraded mode: without the store connection the process exits.
    let store = match db::spawn(DbActorArgs {
        database_url: cfg.resolve_database_url()?,
        bootstrap_schema: cfg.bootstrap_schema,
    })
    .await
    {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "Error connecting to the database");
            return Err(e.into());
        }
    };
    info!("Connected to the database");

    let state = RollbookState::new(StudentService::new(Arc::new(store.clone())));
    let app = rollbook_router(state, cors);

    let addr = SocketAddr::from((cfg.listen_addr, cfg.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.stop();
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
