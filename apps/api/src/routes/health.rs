use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::llm_client::LlmError;
use crate::state::AppState;

/// GET /health
/// Reports service version and whether the model server is reachable.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let mut body = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "model": state.generator.model(),
    });

    let probe = match state.generator.list_models().await {
        Ok(models) => json!({
            "ollama_status": "running",
            "available_models": models,
        }),
        Err(LlmError::Api { .. }) => json!({
            "ollama_status": "error",
            "message": "Ollama not responding",
        }),
        Err(e) => json!({
            "ollama_status": "offline",
            "error": e.to_string(),
        }),
    };

    if let (Some(body), Value::Object(probe)) = (body.as_object_mut(), probe) {
        body.extend(probe);
    }
    Json(body)
}
