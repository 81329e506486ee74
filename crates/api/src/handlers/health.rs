use super::models::AppState;
use crate::models::HealthResponse;
use axum::{extract::State, response::Json};

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        storage_root: state.store.root().display().to_string(),
    })
}
