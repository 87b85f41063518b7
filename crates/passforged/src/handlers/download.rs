use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::handlers::pkpass_response;
use crate::program::Deps;

/// Shown for consumed, expired, or unknown share ids. This endpoint
/// is opened by humans scanning a QR code, so the miss case is a
/// readable page rather than a JSON error.
const EXPIRED_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Pass Expired</title>
    <style>
      body { font-family: -apple-system, sans-serif; display: flex; justify-content: center; align-items: center; min-height: 100vh; margin: 0; background: #0a0a0f; color: white; }
      .container { text-align: center; padding: 20px; }
      h1 { font-size: 24px; margin-bottom: 10px; }
      p { color: #888; }
    </style>
  </head>
  <body>
    <div class="container">
      <h1>Pass Expired</h1>
      <p>This pass link has expired or doesn't exist.</p>
      <p>Please generate a new pass.</p>
    </div>
  </body>
</html>
"#;

/// One-time download: the first hit consumes the entry, every later
/// hit sees the expired page.
pub async fn handler(State(deps): State<Deps>, Path(id): Path<String>) -> Response {
    match deps.store.take(&id) {
        Some((archive, title)) => pkpass_response(&title, archive),
        None => (StatusCode::NOT_FOUND, Html(EXPIRED_PAGE)).into_response(),
    }
}
