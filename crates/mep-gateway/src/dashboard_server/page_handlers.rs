//! Dashboard, share and not-found page handlers.

use super::*;

fn render_dashboard_for_controls(
    state: &DashboardServerState,
    controls: &DashboardControlsQuery,
) -> Html<String> {
    let session_key = controls.session_key();
    let copied = state.copy_feedback.is_copied(&session_key);
    Html(render_mep_dashboard_document(MepDashboardShellContext {
        state: controls.view_state(copied),
        session_key,
        copy_reset_ms: state.copy_reset_ms(),
    }))
}

fn render_share(kind: String, id: Option<String>) -> Html<String> {
    Html(render_mep_share_document(MepSharePageContext { kind, id }))
}

pub(super) async fn handle_dashboard_page(
    State(state): State<Arc<DashboardServerState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Html<String> {
    let controls = DashboardControlsQuery::from_query_result(query);
    render_dashboard_for_controls(&state, &controls)
}

pub(super) async fn handle_share_kind_page(AxumPath(kind): AxumPath<String>) -> Html<String> {
    render_share(kind, None)
}

pub(super) async fn handle_share_kind_id_page(
    AxumPath((kind, id)): AxumPath<(String, String)>,
) -> Html<String> {
    render_share(kind, Some(id))
}

/// Paths the router did not match exactly are re-resolved through the route
/// table. Tolerated variants redirect to the canonical path so parameters are
/// always decoded by the router; anything left is a 404 page.
pub(super) async fn handle_fallback_page(uri: Uri) -> Response {
    match resolve_dashboard_route(uri.path()).path() {
        Some(canonical) if canonical != uri.path() => {
            let location = match uri.query() {
                Some(query) => format!("{canonical}?{query}"),
                None => canonical,
            };
            tracing::debug!(path = uri.path(), %location, "redirecting to canonical route");
            Redirect::permanent(&location).into_response()
        }
        _ => {
            tracing::debug!(path = uri.path(), "no dashboard route matched");
            (
                StatusCode::NOT_FOUND,
                Html(render_mep_not_found_document(uri.path())),
            )
                .into_response()
        }
    }
}
