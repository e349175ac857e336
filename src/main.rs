mod model;
mod server;

use std::sync::Arc;

use crate::server::{
    config::{Config, LockStoreKind},
    error::AppError,
    lock::{DatabaseLockStore, LockManager, LockStore, MemoryLockStore},
    router,
    scheduler::lock_sweeper,
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;

    let lock_store: Arc<dyn LockStore> = match config.lock_store {
        LockStoreKind::Database => Arc::new(DatabaseLockStore::new(db.clone())),
        LockStoreKind::Memory => {
            tracing::warn!("Using process-local coupon locks; run a single instance only");
            Arc::new(MemoryLockStore::new())
        }
    };
    let locks = LockManager::new(lock_store, config.lock_options());

    lock_sweeper::start_scheduler(db.clone()).await?;

    let mut app = router::router()
        .with_state(AppState::new(db, locks, config.coupon_max_stock))
        .layer(session);

    if let Some(cors) = startup::cors_layer(&config)? {
        app = app.layer(cors);
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("Starting server on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
