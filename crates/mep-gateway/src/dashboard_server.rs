use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path as AxumPath, Query, State};
use axum::http::{header::CONTENT_TYPE, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use mep_dashboard::{
    reference_catalog, resolve_dashboard_route, CopyFeedback, DashboardView,
    PanelExpansionSet, StageId, StepId, ViewState, ZoomController, ZoomProfile,
    COPY_FEEDBACK_RESET_MS, DASHBOARD_ROUTE_PATH, DIAGRAM_DEFINITION, SHARE_KIND_ID_ROUTE_TEMPLATE,
    SHARE_KIND_ROUTE_TEMPLATE,
};
use mep_dashboard_ui::{
    render_mep_dashboard_document, render_mep_not_found_document, render_mep_share_document,
    MepDashboardShellContext, MepSharePageContext, MEP_COPY_ENDPOINT, MEP_DEFAULT_SESSION_KEY,
    MEP_DIAGRAM_DEFINITION_ENDPOINT,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;

mod catalog_api;
mod copy_runtime;
mod page_handlers;
mod server_bootstrap;
mod types;
mod view_controls;

use catalog_api::{handle_catalog, handle_diagram_definition};
use copy_runtime::{handle_copy_mark, handle_copy_status, CopyFeedbackRegistry};
use page_handlers::{
    handle_dashboard_page, handle_fallback_page, handle_share_kind_id_page,
    handle_share_kind_page,
};
pub use server_bootstrap::{build_dashboard_router, run_dashboard_server};
use types::DashboardApiError;
use view_controls::{last_query_value, query_pairs, sanitize_session_key, DashboardControlsQuery};

const CATALOG_ENDPOINT: &str = "/api/catalog";
const DIAGRAM_DEFINITION_ENDPOINT: &str = MEP_DIAGRAM_DEFINITION_ENDPOINT;
const COPY_ENDPOINT: &str = MEP_COPY_ENDPOINT;
const DEFAULT_SESSION_KEY: &str = MEP_DEFAULT_SESSION_KEY;
const MAX_COPY_FEEDBACK_SESSIONS: usize = 1_024;

pub const DEFAULT_DASHBOARD_BIND: &str = "127.0.0.1:8790";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Public struct `DashboardServerConfig` used by the `mep-dashboard` binary.
pub struct DashboardServerConfig {
    pub bind: String,
    pub copy_feedback_reset: Duration,
}

impl Default for DashboardServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_DASHBOARD_BIND.to_string(),
            copy_feedback_reset: Duration::from_millis(COPY_FEEDBACK_RESET_MS),
        }
    }
}

#[derive(Clone)]
struct DashboardServerState {
    config: DashboardServerConfig,
    copy_feedback: Arc<CopyFeedbackRegistry>,
}

impl DashboardServerState {
    fn new(config: DashboardServerConfig) -> Self {
        let copy_feedback = Arc::new(CopyFeedbackRegistry::new(config.copy_feedback_reset));
        Self {
            config,
            copy_feedback,
        }
    }

    fn copy_reset_ms(&self) -> u64 {
        u64::try_from(self.config.copy_feedback_reset.as_millis()).unwrap_or(u64::MAX)
    }
}
