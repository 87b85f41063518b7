use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value as JsonValue, json};
use time::OffsetDateTime;

use passforge::builder::PassDescription;

/// Echo the parsed description plus a preview serial number, without
/// building an archive. Used by the UI for non-committal rendering.
pub async fn handler(payload: Result<Json<PassDescription>, JsonRejection>) -> Response {
    let Json(desc) = match payload {
        Ok(json) => json,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid pass data" })),
            )
                .into_response();
        }
    };

    let mut preview = match serde_json::to_value(&desc) {
        Ok(JsonValue::Object(map)) => map,
        _ => serde_json::Map::new(),
    };
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    preview.insert(
        "serialNumber".to_string(),
        JsonValue::from(format!("PREVIEW-{millis}")),
    );

    Json(json!({ "success": true, "preview": preview })).into_response()
}
