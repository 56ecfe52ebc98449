use super::*;

/// Dashboard view state as carried in the query string of `/`.
///
/// Every field is optional and lenient: unknown or malformed values fall back
/// to defaults instead of failing the request. Repeated keys keep the last value.
#[derive(Debug, Clone, Default)]
pub(super) struct DashboardControlsQuery {
    view: String,
    stage: String,
    zoom: String,
    screen: String,
    expanded: String,
    legend: String,
    share: String,
    session: String,
}

/// Last value of `key` in decoded query pairs.
pub(super) fn last_query_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .rev()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

/// Decoded query pairs, or none when the query string cannot be decoded.
pub(super) fn query_pairs(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Vec<(String, String)> {
    match query {
        Ok(Query(pairs)) => pairs,
        Err(error) => {
            tracing::debug!(%error, "ignoring undecodable query string");
            Vec::new()
        }
    }
}

pub(super) fn sanitize_session_key(raw: &str) -> String {
    let mut normalized = String::new();
    for ch in raw.trim().chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            normalized.push(ch);
        } else {
            normalized.push('_');
        }
    }
    let normalized = normalized.trim_matches('_').to_string();
    if normalized.is_empty() {
        DEFAULT_SESSION_KEY.to_string()
    } else {
        normalized
    }
}

impl DashboardControlsQuery {
    pub(super) fn from_pairs(pairs: &[(String, String)]) -> Self {
        let value = |key: &str| last_query_value(pairs, key).unwrap_or_default().to_string();
        Self {
            view: value("view"),
            stage: value("stage"),
            zoom: value("zoom"),
            screen: value("screen"),
            expanded: value("expanded"),
            legend: value("legend"),
            share: value("share"),
            session: value("session"),
        }
    }

    pub(super) fn from_query_result(
        query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    ) -> Self {
        Self::from_pairs(&query_pairs(query))
    }

    pub(super) fn view(&self) -> DashboardView {
        DashboardView::parse(&self.view).unwrap_or_default()
    }

    pub(super) fn zoom_profile(&self) -> ZoomProfile {
        ZoomProfile::parse(&self.screen).unwrap_or_default()
    }

    pub(super) fn zoom(&self) -> ZoomController {
        let profile = self.zoom_profile();
        self.zoom
            .trim()
            .parse::<f64>()
            .ok()
            .map(|value| ZoomController::with_value(profile, value))
            .unwrap_or_else(|| ZoomController::new(profile))
    }

    pub(super) fn stage(&self) -> Option<StageId> {
        let raw = self.stage.trim();
        if raw.is_empty() || raw == "all" {
            return None;
        }
        let stage = raw.parse::<u8>().ok().and_then(StageId::new);
        if stage.is_none() {
            tracing::debug!(stage = raw, "ignoring unknown stage in dashboard query");
        }
        stage
    }

    pub(super) fn expanded_panels(&self) -> PanelExpansionSet {
        self.expanded
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .filter_map(|value| {
                let step = value.parse::<u8>().ok().and_then(StepId::new);
                if step.is_none() {
                    tracing::debug!(step = value, "ignoring unknown step in dashboard query");
                }
                step
            })
            .collect()
    }

    pub(super) fn legend_expanded(&self) -> bool {
        !matches!(self.legend.trim(), "collapsed")
    }

    pub(super) fn share_modal_open(&self) -> bool {
        matches!(self.share.trim(), "open")
    }

    pub(super) fn session_key(&self) -> String {
        sanitize_session_key(&self.session)
    }

    pub(super) fn view_state(&self, copied: bool) -> ViewState {
        let mut state = ViewState::new(self.zoom_profile());
        state.switch_to(self.view());
        state.zoom = self.zoom();
        if let Some(stage) = self.stage() {
            state.stage.select_stage(stage);
        }
        state.panels = self.expanded_panels();
        state.legend_expanded = self.legend_expanded();
        state.share_modal_open = self.share_modal_open();
        state.copied = copied;
        state
    }
}

#[cfg(test)]
mod tests {
    use super::{sanitize_session_key, DashboardControlsQuery};
    use mep_dashboard::{DashboardView, StageId, StepId, ZoomProfile};

    #[test]
    fn unit_view_defaults_to_concept_for_invalid_values() {
        let services = DashboardControlsQuery {
            view: "services".to_string(),
            ..DashboardControlsQuery::default()
        };
        assert_eq!(services.view(), DashboardView::Services);

        let invalid = DashboardControlsQuery {
            view: "kanban".to_string(),
            ..DashboardControlsQuery::default()
        };
        assert_eq!(invalid.view(), DashboardView::Concept);
        assert_eq!(DashboardControlsQuery::default().view(), DashboardView::Concept);
    }

    #[test]
    fn unit_zoom_defaults_and_clamps_values() {
        let default_zoom = DashboardControlsQuery::default();
        assert_eq!(default_zoom.zoom().value(), 0.48);

        let valid = DashboardControlsQuery {
            zoom: "0.64".to_string(),
            ..DashboardControlsQuery::default()
        };
        assert_eq!(valid.zoom().value(), 0.64);

        let too_high = DashboardControlsQuery {
            zoom: "9.99".to_string(),
            ..DashboardControlsQuery::default()
        };
        assert_eq!(too_high.zoom().value(), 1.2);

        let too_low_compact = DashboardControlsQuery {
            zoom: "0.01".to_string(),
            screen: "compact".to_string(),
            ..DashboardControlsQuery::default()
        };
        assert_eq!(too_low_compact.zoom_profile(), ZoomProfile::Compact);
        assert_eq!(too_low_compact.zoom().value(), 0.15);

        let invalid = DashboardControlsQuery {
            zoom: "wide".to_string(),
            ..DashboardControlsQuery::default()
        };
        assert_eq!(invalid.zoom().value(), 0.48);
    }

    #[test]
    fn regression_stage_ignores_out_of_range_and_malformed_values() {
        let valid = DashboardControlsQuery {
            stage: " 3 ".to_string(),
            ..DashboardControlsQuery::default()
        };
        assert_eq!(valid.stage(), StageId::new(3));

        for raw in ["0", "6", "256", "three", "all", ""] {
            let controls = DashboardControlsQuery {
                stage: raw.to_string(),
                ..DashboardControlsQuery::default()
            };
            assert_eq!(controls.stage(), None, "{raw}");
        }
    }

    #[test]
    fn unit_expanded_panels_keep_known_steps_only() {
        let controls = DashboardControlsQuery {
            expanded: "1, 4,,99,x,4".to_string(),
            ..DashboardControlsQuery::default()
        };
        let panels = controls.expanded_panels();
        assert_eq!(panels.len(), 2);
        assert!(panels.is_expanded(StepId::new(1).expect("step 1")));
        assert!(panels.is_expanded(StepId::new(4).expect("step 4")));
    }

    #[test]
    fn unit_legend_and_share_flags_parse_known_tokens() {
        let defaults = DashboardControlsQuery::default();
        assert!(defaults.legend_expanded());
        assert!(!defaults.share_modal_open());

        let toggled = DashboardControlsQuery {
            legend: "collapsed".to_string(),
            share: "open".to_string(),
            ..DashboardControlsQuery::default()
        };
        assert!(!toggled.legend_expanded());
        assert!(toggled.share_modal_open());
    }

    #[test]
    fn regression_repeated_query_keys_keep_last_value() {
        let pairs = [
            ("stage", "1"),
            ("zoom", "0.64"),
            ("stage", "2"),
            ("unknown", "x"),
        ]
        .map(|(key, value)| (key.to_string(), value.to_string()));
        let controls = DashboardControlsQuery::from_pairs(&pairs);
        assert_eq!(controls.stage(), StageId::new(2));
        assert_eq!(controls.zoom().value(), 0.64);
        assert_eq!(controls.view(), DashboardView::Concept);
        assert_eq!(controls.session_key(), "default");
    }

    #[test]
    fn unit_sanitize_session_key_replaces_unsafe_characters() {
        assert_eq!(sanitize_session_key(" review/42 "), "review_42");
        assert_eq!(sanitize_session_key("&&"), "default");
        assert_eq!(sanitize_session_key(""), "default");
    }

    #[test]
    fn functional_view_state_combines_all_controls() {
        let controls = DashboardControlsQuery {
            view: "services".to_string(),
            stage: "5".to_string(),
            zoom: "0.72".to_string(),
            expanded: "8".to_string(),
            share: "open".to_string(),
            ..DashboardControlsQuery::default()
        };
        let state = controls.view_state(true);
        assert_eq!(state.view, DashboardView::Services);
        assert_eq!(state.stage.selected(), StageId::new(5));
        assert_eq!(state.zoom.percent(), 72);
        assert_eq!(state.panels.to_query_value(), "8");
        assert!(state.legend_expanded);
        assert!(state.share_modal_open);
        assert!(state.copied);
    }
}
