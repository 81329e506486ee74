use folio_api::{
    delete_gallery, ensure_gallery, health, rename_gallery, resolve_images, serve_file,
    upload_gallery_images, upload_to_target, AppState,
};
use folio_config::Config;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
};

pub fn build(config: &Config, app_state: AppState) -> Router {
    let max_body_size = config.server.max_body_size_mb * 1024 * 1024;
    let timeout = Duration::from_secs(config.server.timeout_secs);
    let max_concurrent_requests = config.server.max_concurrent_requests;

    let mut router = Router::new()
        .route("/api/health", get(health))
        .route("/api/upload", post(upload_to_target))
        .route("/api/galleries/:name", axum::routing::delete(delete_gallery))
        .route("/api/galleries/:name/images", post(upload_gallery_images))
        .route("/api/galleries/:name/ensure", post(ensure_gallery))
        .route("/api/galleries/:name/resolve", post(resolve_images))
        .route("/api/galleries/:name/rename", post(rename_gallery))
        .route("/uploads/*path", get(serve_file))
        .route("/galleries/*path", get(serve_file))
        .route("/entries/*path", get(serve_file))
        .route("/blogs/*path", get(serve_file))
        // multipart would otherwise stop at axum's 2 MB default
        .layer(DefaultBodyLimit::disable())
        .layer(ConcurrencyLimitLayer::new(max_concurrent_requests))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout));

    if config.server.enable_compression {
        router = router.layer(CompressionLayer::new());
    }

    router
        .layer(build_cors_layer(&config.server.allowed_origins))
        .with_state(app_state)
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, Response},
    };
    use folio_events::EventBus;
    use folio_storage::GalleryStore;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::path::Path;
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "folio-test-boundary";

    fn test_router(root: &Path) -> Router {
        let config: Config = toml::from_str(
            "[server]\nhost = \"127.0.0.1\"\nport = 0\nbase_url = \"http://localhost\"\n",
        )
        .unwrap();
        let events = EventBus::new(true);
        let store = Arc::new(GalleryStore::new(root, 0o755).with_events(Arc::clone(&events)));
        build(&config, AppState::new(store, events, 16, true))
    }

    /// (field, file name, content); a `None` file name makes a text part
    fn multipart(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        multipart_to("/api/upload", parts)
    }

    fn multipart_to(uri: &str, parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, file_name, content) in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match file_name {
                Some(file_name) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                ),
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_post(uri: &str, value: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: Response<Body>) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    async fn body_json(response: Response<Body>) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn health_reports_storage_root() {
        let tmp = tempfile::tempdir().unwrap();
        let response = test_router(tmp.path())
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn gallery_upload_writes_sanitized_files_and_serves_them() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_router(tmp.path());

        let response = app
            .clone()
            .oneshot(multipart_to(
                "/api/galleries/Summer%20Trip/images",
                &[("files", Some("My Photo!! (1).JPG"), b"jpeg bytes")],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["urls"], json!(["/uploads/Summer Trip/My_Photo____1_.jpg"]));
        assert_eq!(body["files"][0]["size"], 10);

        let stored = tmp.path().join("uploads/Summer Trip/My_Photo____1_.jpg");
        assert_eq!(std::fs::read(stored).unwrap(), b"jpeg bytes");

        let response = app
            .oneshot(
                Request::get("/uploads/Summer%20Trip/My_Photo____1_.jpg")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
        assert_eq!(body_bytes(response).await, b"jpeg bytes");
    }

    #[tokio::test]
    async fn gallery_names_with_colons_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_router(tmp.path());

        let response = app
            .clone()
            .oneshot(multipart_to(
                "/api/galleries/Q%3A%20Best/images",
                &[("files", Some("a.jpg"), b"jpeg")],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["urls"], json!(["/uploads/Q: Best/a.jpg"]));

        let response = app
            .oneshot(
                Request::get("/uploads/Q%3A%20Best/a.jpg")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"jpeg");
    }

    #[tokio::test]
    async fn gallery_upload_without_files_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let response = test_router(tmp.path())
            .oneshot(multipart_to(
                "/api/galleries/Trip/images",
                &[("legacy_key", None, b"old-slug")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "NO_FILES");
    }

    #[tokio::test]
    async fn rename_moves_folder_and_rewrites_image_urls() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("uploads/Old")).unwrap();
        std::fs::write(tmp.path().join("uploads/Old/a.jpg"), b"a").unwrap();

        let response = test_router(tmp.path())
            .oneshot(json_post(
                "/api/galleries/Old/rename",
                json!({
                    "new_name": "New",
                    "images": ["/uploads/Old/a.jpg", "https://cdn.example.com/b.png", "c.PNG"]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(
            body["images"],
            json!(["/uploads/New/a.jpg", "https://cdn.example.com/b.png", "/uploads/New/c.png"])
        );
        assert!(tmp.path().join("uploads/New/a.jpg").is_file());
        assert!(!tmp.path().join("uploads/Old").exists());
    }

    #[tokio::test]
    async fn invalid_gallery_names_are_bad_requests() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_router(tmp.path());

        let response = app
            .clone()
            .oneshot(json_post("/api/galleries/Old/rename", json!({ "new_name": "a/b" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "INVALID_NAME");

        let response = app
            .oneshot(
                Request::post("/api/galleries/A%2FB/ensure")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(!tmp.path().join("uploads/A").exists());
    }

    #[tokio::test]
    async fn ensure_migrates_legacy_directory() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("galleries/old-slug")).unwrap();

        let response = test_router(tmp.path())
            .oneshot(json_post(
                "/api/galleries/Trip/ensure",
                json!({ "legacy_keys": ["", "old-slug"] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["url"], "/uploads/Trip");
        assert!(tmp.path().join("uploads/Trip").is_dir());
        assert!(!tmp.path().join("galleries/old-slug").exists());
    }

    #[tokio::test]
    async fn resolve_normalizes_references() {
        let tmp = tempfile::tempdir().unwrap();
        let response = test_router(tmp.path())
            .oneshot(json_post(
                "/api/galleries/Trip/resolve",
                json!({ "images": ["/galleries/old/x.jpg", "  ", "data:image/png;base64,AA"] }),
            ))
            .await
            .unwrap();

        assert_eq!(
            body_json(response).await["images"],
            json!(["/uploads/Trip/x.jpg", "data:image/png;base64,AA"])
        );
    }

    #[tokio::test]
    async fn delete_keeps_files_without_flag() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("uploads/Trip")).unwrap();

        let response = test_router(tmp.path())
            .oneshot(Request::delete("/api/galleries/Trip").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["attempts"], json!([]));
        assert!(tmp.path().join("uploads/Trip").is_dir());
    }

    #[tokio::test]
    async fn delete_removes_gallery_directories() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("uploads/Trip")).unwrap();
        std::fs::create_dir_all(tmp.path().join("galleries/old-slug")).unwrap();

        let response = test_router(tmp.path())
            .oneshot(
                Request::delete("/api/galleries/Trip?deleteFiles=1")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({ "legacy_keys": ["old-slug"] }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!tmp.path().join("uploads/Trip").exists());
        assert!(!tmp.path().join("galleries/old-slug").exists());
    }

    #[tokio::test]
    async fn target_upload_uses_unique_names() {
        let tmp = tempfile::tempdir().unwrap();
        let response = test_router(tmp.path())
            .oneshot(multipart(&[
                ("targetType", None, b"entries"),
                ("targetId", None, b"42"),
                ("files", Some("cover.PNG"), b"png"),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let url = body["urls"][0].as_str().unwrap();
        assert!(url.starts_with("/entries/42/"), "{}", url);
        let file_name = url.rsplit('/').next().unwrap();
        assert!(tmp.path().join("entries/42").join(file_name).is_file());
    }

    #[tokio::test]
    async fn target_upload_rejects_unsafe_ids() {
        let tmp = tempfile::tempdir().unwrap();
        let response = test_router(tmp.path())
            .oneshot(multipart(&[
                ("target_type", None, b"blogs"),
                ("target_id", None, b"../x"),
                ("files", Some("a.png"), b"png"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "INVALID_TARGET");
    }

    #[tokio::test]
    async fn traversal_outside_storage_is_refused() {
        let tmp = tempfile::tempdir().unwrap();
        let response = test_router(tmp.path())
            .oneshot(
                Request::get("/uploads/..%2F..%2Fetc/passwd")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
