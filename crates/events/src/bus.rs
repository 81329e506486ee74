use super::models::{AppEvent, EventBus};
use colored::Colorize;
use std::sync::Arc;

impl EventBus {
    /// Silent mode drops console output; `tracing` records are still emitted
    pub fn new(silent_mode: bool) -> Arc<Self> {
        Arc::new(Self { silent_mode })
    }

    pub fn emit(&self, event: AppEvent) {
        match event {
            // Application lifecycle
            AppEvent::Starting => {
                self.console(format!("\n{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black()));
                self.console(format!("  {}", "Folio - Portfolio Asset Server".white().bold()));
                self.console(format!("  {} {}", "Version".dimmed(), env!("CARGO_PKG_VERSION").cyan()));
                self.console(format!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black()));
            }
            AppEvent::Ready { addr, base_url } => {
                self.console(format!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green()));
                self.console(format!("  {} {}", "Server".white(), addr.cyan()));
                self.console(format!("  {} {}", "URL   ".white(), base_url.blue()));
                self.console(format!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green()));
            }
            AppEvent::Shutdown => {
                self.console(format!("\n{}", "Server shutting down".red()));
            }

            // Configuration
            AppEvent::ConfigLoading { path } => {
                self.console(format!("  {} {}", "Loading config".dimmed(), path.cyan()));
            }
            AppEvent::ConfigLoaded { storage_root } => {
                self.console(format!("  {} Storage root {}", "✓".green(), storage_root.cyan()));
            }
            AppEvent::ConfigCreated { path } => {
                tracing::warn!("Configuration file not found");
                tracing::info!("Created default configuration at: {}", path);
            }
            AppEvent::ConfigMigrated { added_fields } => {
                if !added_fields.is_empty() {
                    self.console(format!(
                        "  {} Config updated: added {}",
                        "↻".blue(),
                        added_fields.join(", ").dimmed()
                    ));
                }
            }
            AppEvent::ConfigError { error } => {
                tracing::error!("Configuration error: {}", error);
            }

            // Storage layout
            AppEvent::StorageInit { path } => {
                tracing::debug!("Initializing storage layout under {}", path);
            }
            AppEvent::StorageReady { path } => {
                self.console(format!("  {} Storage ready {}", "✓".green(), path.cyan()));
            }

            // Gallery directories
            AppEvent::GalleryDirMigrated { from, to } => {
                tracing::info!("Migrated gallery directory {} -> {}", from, to);
            }
            AppEvent::GalleryRenamed { from, to } => {
                tracing::info!("Renamed gallery directory {} -> {}", from, to);
                self.console(format!("  {} Renamed {} → {}", "↻".blue(), from.dimmed(), to.cyan()));
            }
            AppEvent::GalleryDeleted { name, removed } => {
                tracing::info!("Deleted {} director(ies) for gallery {}", removed, name);
                self.console(format!("  {} Removed {} ({} dirs)", "-".red(), name.cyan(), removed));
            }

            // Uploads
            AppEvent::FilesStored { target, count } => {
                tracing::info!("Stored {} file(s) in {}", count, target);
            }

            // Errors
            AppEvent::Error { context, error } => {
                tracing::error!("{}: {}", context, error);
            }
        }
    }

    fn console(&self, line: String) {
        if !self.silent_mode {
            println!("{}", line);
        }
    }
}
