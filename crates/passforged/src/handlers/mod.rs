use axum::http::header;
use axum::response::{IntoResponse, Response};

pub mod download;
pub mod generate;
pub mod health;
pub mod preview;
pub mod templates;

pub(crate) const PKPASS_CONTENT_TYPE: &str = "application/vnd.apple.pkpass";

/// Archive bytes with the wallet content type and a download
/// filename derived from the pass title.
pub(crate) fn pkpass_response(title: &str, archive: Vec<u8>) -> Response {
    let filename = if title.is_empty() { "pass" } else { title };
    (
        [
            (header::CONTENT_TYPE, PKPASS_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}.pkpass\""),
            ),
        ],
        archive,
    )
        .into_response()
}
