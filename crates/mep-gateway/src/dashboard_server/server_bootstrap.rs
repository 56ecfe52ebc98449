//! Dashboard server bootstrap and router wiring.

use super::*;

/// Public `fn` `run_dashboard_server` in `mep-gateway`.
pub async fn run_dashboard_server(config: DashboardServerConfig) -> Result<()> {
    let bind_addr = config
        .bind
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid --bind '{}'", config.bind))?;

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind dashboard server on {bind_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve bound dashboard server address")?;

    tracing::info!(
        addr = %local_addr,
        copy_feedback_ms = config.copy_feedback_reset.as_millis() as u64,
        "mep dashboard server listening"
    );
    println!("mep dashboard server listening: addr={local_addr}");

    let app = build_dashboard_router(config);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("dashboard server exited unexpectedly")?;

    tracing::info!("mep dashboard server stopped");
    Ok(())
}

/// Builds the router with fresh per-process state.
pub fn build_dashboard_router(config: DashboardServerConfig) -> Router {
    build_dashboard_router_with_state(Arc::new(DashboardServerState::new(config)))
}

pub(super) fn build_dashboard_router_with_state(state: Arc<DashboardServerState>) -> Router {
    Router::new()
        .route(DASHBOARD_ROUTE_PATH, get(handle_dashboard_page))
        .route(SHARE_KIND_ROUTE_TEMPLATE, get(handle_share_kind_page))
        .route(SHARE_KIND_ID_ROUTE_TEMPLATE, get(handle_share_kind_id_page))
        .route(CATALOG_ENDPOINT, get(handle_catalog))
        .route(DIAGRAM_DEFINITION_ENDPOINT, get(handle_diagram_definition))
        .route(
            COPY_ENDPOINT,
            get(handle_copy_status).post(handle_copy_mark),
        )
        .fallback(handle_fallback_page)
        .with_state(state)
}
