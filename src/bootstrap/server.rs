use folio_config::Config;
use folio_events::{AppEvent, EventBus};
use folio_filesystem::FileSystem;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Creates the storage root and its subtrees, returning the absolute root
pub async fn initialize_storage(config: &Config, events: &Arc<EventBus>) -> Result<PathBuf> {
    events.emit(AppEvent::StorageInit {
        path: config.storage.root.clone(),
    });

    let root = FileSystem::ensure_storage_structure(&config.storage.root).await?;

    events.emit(AppEvent::StorageReady {
        path: root.display().to_string(),
    });

    Ok(root)
}

pub async fn bind(addr: &str) -> Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            let port = addr.rsplit(':').next().unwrap_or("unknown");
            tracing::error!("Port {} is already in use", port);
            tracing::error!("Stop the other application or change server.port in config.toml");
            #[cfg(not(target_os = "windows"))]
            tracing::error!("Find the process with: lsof -i :{}", port);
            #[cfg(target_os = "windows")]
            tracing::error!("Find the process with: netstat -ano | findstr :{}", port);
        } else {
            tracing::error!("Failed to bind server on {}: {}", addr, e);
        }
        anyhow::anyhow!("Failed to bind server: {}", e)
    })
}

pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, initiating graceful shutdown...");
}
