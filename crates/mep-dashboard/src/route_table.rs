//! Static route table shared by the gateway router and the SSR renderer.

pub const DASHBOARD_ROUTE_PATH: &str = "/";
pub const SHARE_ROUTE_PREFIX: &str = "/share";
pub const SHARE_KIND_ROUTE_TEMPLATE: &str = "/share/{kind}";
pub const SHARE_KIND_ID_ROUTE_TEMPLATE: &str = "/share/{kind}/{id}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardRoute {
    Dashboard,
    /// `kind` and `id` are opaque and never looked up at this layer.
    Share {
        kind: String,
        id: Option<String>,
    },
    NotFound,
}

impl DashboardRoute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Share { .. } => "share",
            Self::NotFound => "not-found",
        }
    }

    /// Canonical path for the route; `None` for `NotFound`.
    pub fn path(&self) -> Option<String> {
        match self {
            Self::Dashboard => Some(DASHBOARD_ROUTE_PATH.to_string()),
            Self::Share { kind, id: None } => Some(format!("{SHARE_ROUTE_PREFIX}/{kind}")),
            Self::Share {
                kind,
                id: Some(id),
            } => Some(format!("{SHARE_ROUTE_PREFIX}/{kind}/{id}")),
            Self::NotFound => None,
        }
    }
}

/// Resolves a request path (query string ignored) to one of the three pages.
///
/// A single trailing slash is accepted. Empty segments, unknown prefixes and
/// extra segments resolve to [`DashboardRoute::NotFound`].
pub fn resolve_dashboard_route(path: &str) -> DashboardRoute {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    if path == DASHBOARD_ROUTE_PATH || path.is_empty() {
        return DashboardRoute::Dashboard;
    }
    let Some(rest) = path.strip_prefix('/') else {
        return DashboardRoute::NotFound;
    };
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    let segments = rest.split('/').collect::<Vec<_>>();
    if segments.iter().any(|segment| segment.is_empty()) {
        return DashboardRoute::NotFound;
    }
    match segments.as_slice() {
        ["share", kind] => DashboardRoute::Share {
            kind: (*kind).to_string(),
            id: None,
        },
        ["share", kind, id] => DashboardRoute::Share {
            kind: (*kind).to_string(),
            id: Some((*id).to_string()),
        },
        _ => DashboardRoute::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_dashboard_route, DashboardRoute};

    #[test]
    fn unit_resolve_root_to_dashboard() {
        assert_eq!(resolve_dashboard_route("/"), DashboardRoute::Dashboard);
        assert_eq!(
            resolve_dashboard_route("/?view=services&zoom=0.56"),
            DashboardRoute::Dashboard
        );
    }

    #[test]
    fn functional_resolve_share_routes_pass_parameters_through() {
        assert_eq!(
            resolve_dashboard_route("/share/diagram"),
            DashboardRoute::Share {
                kind: "diagram".to_string(),
                id: None,
            }
        );
        assert_eq!(
            resolve_dashboard_route("/share/diagram/42"),
            DashboardRoute::Share {
                kind: "diagram".to_string(),
                id: Some("42".to_string()),
            }
        );
        assert_eq!(
            resolve_dashboard_route("/share/anything-goes/not-a-number/"),
            DashboardRoute::Share {
                kind: "anything-goes".to_string(),
                id: Some("not-a-number".to_string()),
            }
        );
    }

    #[test]
    fn regression_unmatched_paths_resolve_to_not_found() {
        for path in [
            "/share",
            "/share/",
            "/share//42",
            "/share/diagram/42/extra",
            "/dashboard",
            "share/diagram",
        ] {
            assert_eq!(
                resolve_dashboard_route(path),
                DashboardRoute::NotFound,
                "{path}"
            );
        }
    }

    #[test]
    fn unit_route_path_round_trips_canonical_form() {
        let route = resolve_dashboard_route("/share/stage/3/");
        assert_eq!(route.path().as_deref(), Some("/share/stage/3"));
        assert_eq!(route.as_str(), "share");
        assert_eq!(DashboardRoute::NotFound.path(), None);
    }
}
