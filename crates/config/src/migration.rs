use std::path::Path;
use std::sync::Arc;
use toml_edit::{Array, DocumentMut, Item, Table, Value};

/// Migrates config file to latest format if needed
pub async fn migrate_config_if_needed<P: AsRef<Path>>(
    path: P,
    events: Option<&Arc<folio_events::EventBus>>,
) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    let mut doc = content.parse::<DocumentMut>()?;
    let added_fields = migrate_document(&mut doc)?;

    // Only write if we added fields
    if !added_fields.is_empty() {
        tokio::fs::write(path.as_ref(), doc.to_string()).await?;

        if let Some(event_bus) = events {
            event_bus.emit(folio_events::AppEvent::ConfigMigrated {
                added_fields: added_fields.clone(),
            });
        }
    }

    Ok(())
}

fn migrate_document(doc: &mut DocumentMut) -> anyhow::Result<Vec<String>> {
    let mut added_fields = Vec::new();

    migrate_server_section(doc, &mut added_fields)?;
    migrate_storage_section(doc, &mut added_fields)?;

    Ok(added_fields)
}

fn migrate_server_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    // Ensure [server] section exists
    if !doc.contains_key("server") {
        let mut table = Table::new();
        table.set_implicit(true);
        doc["server"] = Item::Table(table);
        added_fields.push("server".to_string());
    }

    let server = doc["server"]
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("Invalid [server] section in config"))?;
    ensure_field(server, "host", Value::from("0.0.0.0"), added_fields);
    ensure_field(server, "port", Value::from(8080), added_fields);
    ensure_field(
        server,
        "base_url",
        Value::from("http://localhost:8080"),
        added_fields,
    );
    ensure_field(server, "tcp_nodelay", Value::from(true), added_fields);
    ensure_field(server, "timeout_secs", Value::from(120), added_fields);
    ensure_field(server, "max_body_size_mb", Value::from(200), added_fields);
    ensure_field(
        server,
        "max_concurrent_requests",
        Value::from(256),
        added_fields,
    );
    ensure_field(
        server,
        "streaming_threshold_mb",
        Value::from(16),
        added_fields,
    );
    ensure_field(
        server,
        "enable_compression",
        Value::from(true),
        added_fields,
    );

    if !server.contains_key("allowed_origins") {
        let mut arr = Array::new();
        arr.push("*");
        server["allowed_origins"] = Item::Value(Value::Array(arr));
        added_fields.push("allowed_origins".to_string());
    }

    Ok(())
}

fn migrate_storage_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    if !doc.contains_key("storage") {
        let mut table = Table::new();
        table.set_implicit(true);
        doc["storage"] = Item::Table(table);
        added_fields.push("storage".to_string());
    }

    let storage = doc["storage"]
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("Invalid [storage] section in config"))?;

    // Older files named the root `public_dir`
    if let Some(public_dir) = storage.remove("public_dir") {
        if !storage.contains_key("root") {
            storage["root"] = public_dir;
            added_fields.push("storage.root (migrated from public_dir)".to_string());
        } else {
            added_fields.push("removed deprecated storage.public_dir".to_string());
        }
    }

    ensure_field(storage, "root", Value::from("blog-uploads"), added_fields);
    ensure_field(storage, "dir_mode", Value::from(0o755), added_fields);
    ensure_field(
        storage,
        "overwrite_gallery_uploads",
        Value::from(true),
        added_fields,
    );

    Ok(())
}

fn ensure_field(
    table: &mut Table,
    key: &str,
    default_value: Value,
    added_fields: &mut Vec<String>,
) {
    if !table.contains_key(key) {
        table[key] = Item::Value(default_value);
        added_fields.push(key.to_string());
    }
}
