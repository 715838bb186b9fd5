//! Server bootstrap.

use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};

use sqlx::SqlitePool;
use thiserror::Error;
use tokio::{net::TcpListener, task::JoinHandle};

use super::{
    router::build_router,
    signal::shutdown_signal,
    state::{AppState, SessionSettings},
};
use crate::{
    config::ServerConfig,
    infrastructure::{
        auth::JwtValidator,
        realtime::{BroadcastPipeline, ConnectionRegistry},
        repository::{
            SqliteChatRepository, SqliteMessageRepository,
            sqlite::{apply_schema, connect},
        },
    },
};

const PIPELINE_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Wire stores, registry and pipeline together and start the pipeline consumer.
///
/// The consumer task ends once the returned state (and every clone of its
/// publisher) is dropped.
pub fn build_state(
    pool: SqlitePool,
    jwt: Option<JwtValidator>,
    session: SessionSettings,
    queue_capacity: usize,
) -> (Arc<AppState>, JoinHandle<()>) {
    let chats = Arc::new(SqliteChatRepository::new(pool.clone()));
    let messages = Arc::new(SqliteMessageRepository::new(pool));
    let registry = ConnectionRegistry::new();
    let (pipeline, consumer) =
        BroadcastPipeline::spawn(queue_capacity, messages.clone(), registry.clone());

    let state = Arc::new(AppState {
        chats,
        messages,
        publisher: Arc::new(pipeline),
        registry,
        jwt,
        session,
    });
    (state, consumer)
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    let app = build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Run the server described by `config` until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    config.validate().map_err(ServerError::Config)?;

    let pool = connect(&config.database_url, config.max_connections).await?;
    apply_schema(&pool).await?;
    tracing::info!("Database ready at {}", config.database_url);

    let jwt = config
        .jwt_secret
        .as_deref()
        .map(|secret| JwtValidator::new(secret.as_bytes()));
    let (state, consumer) = build_state(
        pool.clone(),
        jwt,
        config.session_settings(),
        config.queue_capacity,
    );

    let addr = SocketAddr::new(config.bind_address, config.port);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    serve(listener, state, shutdown_signal()).await?;

    // Sessions still open hold publisher handles, so bound the drain.
    let mut consumer = consumer;
    match tokio::time::timeout(PIPELINE_DRAIN_TIMEOUT, &mut consumer).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("Broadcast pipeline task failed: {}", e),
        Err(_) => {
            tracing::warn!("Broadcast pipeline did not drain in time, aborting");
            consumer.abort();
        }
    }
    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}
