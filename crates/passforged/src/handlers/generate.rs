use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use passforge::builder::{PassBuilder, PassDescription, new_share_id};

use crate::handlers::pkpass_response;
use crate::program::Deps;

/// Generate a pass archive, stash it under a fresh share id, and
/// answer with either the raw archive or (when the client accepts
/// JSON) a one-time download envelope.
pub async fn handler(
    State(deps): State<Deps>,
    headers: HeaderMap,
    payload: Result<Json<PassDescription>, JsonRejection>,
) -> Response {
    let Json(desc) = match payload {
        Ok(json) => json,
        Err(_) => return bad_request("Invalid pass data"),
    };

    // The one mandatory business field; checked before any document
    // or archive work happens.
    if desc.barcode_data.is_empty() {
        return bad_request("Barcode data is required");
    }

    let mut builder = PassBuilder::new(&desc);
    if let Some(signing) = &deps.signing {
        builder = builder.with_signing(&signing.credentials, signing.identifiers.clone());
    }

    let archive = match builder.build() {
        Ok(bytes) => bytes,
        Err(err) if err.is_validation() => return bad_request(&err.to_string()),
        Err(err) => {
            error!(%err, "pass generation failed");
            return generation_failure(&err.to_string());
        }
    };

    let share_id = match new_share_id() {
        Ok(id) => id,
        Err(err) => {
            error!(%err, "failed to mint share id");
            return generation_failure(&err.to_string());
        }
    };

    let title = if desc.title.is_empty() {
        "pass".to_string()
    } else {
        desc.title.clone()
    };
    deps.store.put(&share_id, archive.clone(), &title);

    if wants_json(&headers) {
        let host = header_str(&headers, header::HOST.as_str()).unwrap_or("localhost:3002");
        let proto = header_str(&headers, "x-forwarded-proto").unwrap_or("http");
        let download_url = format!("{proto}://{host}/api/pass/download/{share_id}");

        return Json(json!({
            "success": true,
            "shareId": share_id,
            "downloadUrl": download_url,
            "expiresIn": "10 minutes",
        }))
        .into_response();
    }

    pkpass_response(&title, archive)
}

fn wants_json(headers: &HeaderMap) -> bool {
    header_str(headers, header::ACCEPT.as_str())
        .is_some_and(|accept| accept.contains("application/json"))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn generation_failure(details: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Failed to generate pass",
            "details": details,
        })),
    )
        .into_response()
}
