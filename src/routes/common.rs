//! Common routes: health, readiness, version.

use crate::schema::EntityKind;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    database: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing_tables: Vec<&'static str>,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

/// Ready once the database answers and both entity tables exist.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyBody>) {
    let mut missing_tables = Vec::new();
    for kind in EntityKind::ALL {
        let qualified = format!("\"{}\".\"{}\"", state.schema, kind.table_name());
        let found: Result<Option<String>, sqlx::Error> = sqlx::query_scalar("SELECT to_regclass($1)::text")
            .bind(&qualified)
            .fetch_one(&state.pool)
            .await;
        match found {
            Ok(Some(_)) => {}
            Ok(None) => missing_tables.push(kind.table_name()),
            Err(e) => {
                tracing::warn!(error = %e, "readiness probe failed");
                return (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ReadyBody {
                        status: "degraded",
                        database: "unavailable",
                        missing_tables: Vec::new(),
                    }),
                );
            }
        }
    }
    let status = if missing_tables.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(ReadyBody {
            status: if missing_tables.is_empty() { "ok" } else { "degraded" },
            database: "ok",
            missing_tables,
        }),
    )
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health, GET /ready, GET /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
