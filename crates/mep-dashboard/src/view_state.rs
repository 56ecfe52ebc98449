use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use crate::reference_catalog::{StageId, StepId};

pub const DEFAULT_ZOOM: f64 = 0.48;
pub const MAX_ZOOM: f64 = 1.2;

/// Errors returned when a view-state transition names an id outside the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ViewStateError {
    #[error("unknown stage id {0}; expected 1..=5")]
    UnknownStage(u8),
    #[error("unknown step id {0}; expected 1..=8")]
    UnknownStep(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardView {
    Services,
    #[default]
    Concept,
}

impl DashboardView {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::Concept => "concept",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "services" => Some(Self::Services),
            "concept" => Some(Self::Concept),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Services => "Ecosystem Services",
            Self::Concept => "Concept Flow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
/// Screen class the zoom step and floor are tuned for.
pub enum ZoomProfile {
    #[default]
    Desktop,
    Compact,
}

impl ZoomProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Compact => "compact",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "desktop" => Some(Self::Desktop),
            "compact" | "mobile" => Some(Self::Compact),
            _ => None,
        }
    }

    pub fn step(self) -> f64 {
        match self {
            Self::Desktop => 0.08,
            Self::Compact => 0.06,
        }
    }

    pub fn min(self) -> f64 {
        match self {
            Self::Desktop => 0.12,
            Self::Compact => 0.15,
        }
    }

    pub fn max(self) -> f64 {
        MAX_ZOOM
    }
}

fn snap_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Bounded display-scale multiplier for the concept diagram.
pub struct ZoomController {
    profile: ZoomProfile,
    value: f64,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZoomProfile::default())
    }
}

impl ZoomController {
    pub fn new(profile: ZoomProfile) -> Self {
        Self {
            profile,
            value: DEFAULT_ZOOM,
        }
    }

    /// Builds a controller from an untrusted value, clamping it into the profile range.
    /// Non-finite input falls back to the default zoom.
    pub fn with_value(profile: ZoomProfile, value: f64) -> Self {
        let value = if value.is_finite() {
            snap_to_hundredths(value.clamp(profile.min(), profile.max()))
        } else {
            DEFAULT_ZOOM
        };
        Self { profile, value }
    }

    pub fn profile(&self) -> ZoomProfile {
        self.profile
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn zoom_in(&mut self) {
        self.value = snap_to_hundredths(self.value + self.profile.step()).min(self.profile.max());
    }

    pub fn zoom_out(&mut self) {
        self.value = snap_to_hundredths(self.value - self.profile.step()).max(self.profile.min());
    }

    pub fn reset(&mut self) {
        self.value = DEFAULT_ZOOM;
    }

    pub fn percent(&self) -> u32 {
        (self.value * 100.0).round() as u32
    }

    pub fn can_zoom_in(&self) -> bool {
        self.value < self.profile.max()
    }

    pub fn can_zoom_out(&self) -> bool {
        self.value > self.profile.min()
    }

    pub fn zoomed_in(mut self) -> Self {
        self.zoom_in();
        self
    }

    pub fn zoomed_out(mut self) -> Self {
        self.zoom_out();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Highlighted workflow stage; `None` shows every stage.
pub struct StageSelector {
    selected: Option<StageId>,
}

impl StageSelector {
    pub fn selected(&self) -> Option<StageId> {
        self.selected
    }

    pub fn is_view_all(&self) -> bool {
        self.selected.is_none()
    }

    /// Selecting the already-selected stage keeps it selected; only `None` clears.
    pub fn select(&mut self, stage: Option<u8>) -> Result<(), ViewStateError> {
        self.selected = match stage {
            Some(raw) => Some(StageId::new(raw).ok_or(ViewStateError::UnknownStage(raw))?),
            None => None,
        };
        Ok(())
    }

    pub fn select_stage(&mut self, stage: StageId) {
        self.selected = Some(stage);
    }

    pub fn view_all(&mut self) {
        self.selected = None;
    }

    /// True when no stage is selected or the selected stage owns `step`.
    pub fn highlights_step(&self, step: StepId) -> bool {
        self.selected
            .map(|stage| stage.descriptor().includes_step(step))
            .unwrap_or(true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Expanded/collapsed state of each step card; all collapsed initially.
pub struct PanelExpansionSet {
    expanded: BTreeSet<StepId>,
}

impl PanelExpansionSet {
    pub fn is_expanded(&self, step: StepId) -> bool {
        self.expanded.contains(&step)
    }

    pub fn toggle(&mut self, raw: u8) -> Result<bool, ViewStateError> {
        let step = StepId::new(raw).ok_or(ViewStateError::UnknownStep(raw))?;
        Ok(self.toggle_step(step))
    }

    /// Flips one entry and returns its new state.
    pub fn toggle_step(&mut self, step: StepId) -> bool {
        if self.expanded.remove(&step) {
            false
        } else {
            self.expanded.insert(step);
            true
        }
    }

    pub fn toggled(&self, step: StepId) -> Self {
        let mut next = self.clone();
        next.toggle_step(step);
        next
    }

    pub fn expanded_steps(&self) -> impl Iterator<Item = StepId> + '_ {
        self.expanded.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Comma-separated ids, as carried in the `expanded` query parameter.
    pub fn to_query_value(&self) -> String {
        self.expanded
            .iter()
            .map(|step| step.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<StepId> for PanelExpansionSet {
    fn from_iter<T: IntoIterator<Item = StepId>>(iter: T) -> Self {
        Self {
            expanded: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Per-session dashboard view state.
pub struct ViewState {
    pub view: DashboardView,
    pub stage: StageSelector,
    pub zoom: ZoomController,
    pub panels: PanelExpansionSet,
    pub legend_expanded: bool,
    pub share_modal_open: bool,
    pub copied: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ZoomProfile::default())
    }
}

impl ViewState {
    /// Initial state: concept view, all stages, default zoom, panels collapsed,
    /// legend open, share modal closed.
    pub fn new(profile: ZoomProfile) -> Self {
        Self {
            view: DashboardView::default(),
            stage: StageSelector::default(),
            zoom: ZoomController::new(profile),
            panels: PanelExpansionSet::default(),
            legend_expanded: true,
            share_modal_open: false,
            copied: false,
        }
    }

    pub fn switch_to(&mut self, view: DashboardView) {
        self.view = view;
    }

    pub fn toggle_legend(&mut self) {
        self.legend_expanded = !self.legend_expanded;
    }

    pub fn open_share_modal(&mut self) {
        self.share_modal_open = true;
    }

    pub fn close_share_modal(&mut self) {
        self.share_modal_open = false;
    }
}
