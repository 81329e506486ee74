mod bootstrap;

use crate::bootstrap::{config, logging, router, server};
use anyhow::Result;
use folio_api::AppState;
use folio_events::{AppEvent, EventBus};
use folio_storage::GalleryStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    logging::initialize();

    let events = EventBus::new(false);
    events.emit(AppEvent::Starting);

    let config_path = std::env::var("FOLIO_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = config::load(&config_path, &events).await?;

    let root = server::initialize_storage(&config, &events).await?;

    let store = Arc::new(
        GalleryStore::new(root, config.storage.dir_mode).with_events(Arc::clone(&events)),
    );
    let app_state = AppState::new(
        store,
        Arc::clone(&events),
        config.server.streaming_threshold_mb,
        config.storage.overwrite_gallery_uploads,
    );
    let app = router::build(&config, app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = server::bind(&addr).await?;

    events.emit(AppEvent::Ready {
        addr,
        base_url: config.server.base_url.clone(),
    });

    axum::serve(listener, app.into_make_service())
        .tcp_nodelay(config.server.tcp_nodelay)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    events.emit(AppEvent::Shutdown);
    Ok(())
}
