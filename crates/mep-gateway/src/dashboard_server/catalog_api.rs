//! Read-only JSON/text views of the reference catalog.

use super::*;

pub(super) async fn handle_catalog() -> Response {
    Json(reference_catalog()).into_response()
}

pub(super) async fn handle_diagram_definition() -> Response {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        DIAGRAM_DEFINITION,
    )
        .into_response()
}
