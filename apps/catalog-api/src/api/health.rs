//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use serde_json::{Value, json};
use tracing::debug;

use crate::state::AppState;

/// Create the readiness router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check. Pings MongoDB when it backs the store and reports the
/// number of catalog requests handled so far.
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = Vec::new();

    if let Some(client) = state.mongo_client.as_ref() {
        checks.push((
            "event_store",
            Box::pin(async move {
                let status = database::mongodb::check_health_detailed(client).await;
                debug!(response_time_ms = status.response_time_ms, "MongoDB ping");
                if status.healthy {
                    Ok(())
                } else {
                    Err(status
                        .message
                        .unwrap_or_else(|| "MongoDB ping failed".to_string()))
                }
            }),
        ));
    }

    let (status, Json(mut body)) = match run_health_checks(checks).await {
        Ok(ok) => ok,
        Err(unhealthy) => unhealthy,
    };

    if let Value::Object(map) = &mut body {
        map.insert(
            "handled_requests".to_string(),
            json!(domain_events::handled_requests()),
        );
    }

    (status, Json(body))
}
