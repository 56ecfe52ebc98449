//! Leptos SSR renderers for the MEP Digital Ecosystem dashboard.
//!
//! Every interactive control is rendered as a link carrying the next view
//! state in its query string, so the pages work without client hydration.

use leptos::prelude::*;
use mep_dashboard::{
    DashboardView, StageId, StepId, ViewState, COPY_FEEDBACK_RESET_MS, DIAGRAM_DEFINITION, LEGEND,
    SERVICES, STAGES, STEPS,
};

mod pages;

pub use pages::{
    render_mep_dashboard_document, render_mep_document, render_mep_not_found_document,
    render_mep_not_found_page, render_mep_share_document, render_mep_share_page,
    MepSharePageContext, MEP_COPY_SCRIPT, MEP_DASHBOARD_TITLE, MEP_NOT_FOUND_TITLE,
    MEP_SHARE_TITLE,
};

pub const MEP_DEFAULT_SESSION_KEY: &str = "default";
pub const MEP_COPY_ENDPOINT: &str = "/api/copy";
pub const MEP_DIAGRAM_DEFINITION_ENDPOINT: &str = "/api/diagram-definition";

#[derive(Debug, Clone, PartialEq)]
/// Public struct `MepDashboardShellContext` in `mep-dashboard-ui`.
pub struct MepDashboardShellContext {
    pub state: ViewState,
    pub session_key: String,
    pub copy_reset_ms: u64,
}

impl Default for MepDashboardShellContext {
    fn default() -> Self {
        Self {
            state: ViewState::new(Default::default()),
            session_key: MEP_DEFAULT_SESSION_KEY.to_string(),
            copy_reset_ms: COPY_FEEDBACK_RESET_MS,
        }
    }
}

/// Builds the dashboard link that reproduces `state`.
///
/// Parameter order is fixed so rendered links are stable across requests.
pub fn mep_dashboard_href(state: &ViewState, session_key: &str) -> String {
    let mut href = format!(
        "/?view={}&zoom={:.2}&screen={}",
        state.view.as_str(),
        state.zoom.value(),
        state.zoom.profile().as_str()
    );
    if let Some(stage) = state.stage.selected() {
        href.push_str(&format!("&stage={stage}"));
    }
    if !state.panels.is_empty() {
        href.push_str(&format!("&expanded={}", state.panels.to_query_value()));
    }
    if !state.legend_expanded {
        href.push_str("&legend=collapsed");
    }
    if state.share_modal_open {
        href.push_str("&share=open");
    }
    href.push_str(&format!("&session={session_key}"));
    href
}

fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn hidden_attr(visible: bool) -> &'static str {
    bool_attr(!visible)
}

fn href_with(state: &ViewState, session_key: &str, change: impl FnOnce(&mut ViewState)) -> String {
    let mut next = state.clone();
    change(&mut next);
    mep_dashboard_href(&next, session_key)
}

struct StageChipModel {
    id: String,
    dom_id: String,
    name: &'static str,
    color: &'static str,
    icon: &'static str,
    selected: &'static str,
    step_count: String,
    href: String,
}

struct StepCardModel {
    id: String,
    dom_id: String,
    panel_id: String,
    title: &'static str,
    icon: &'static str,
    accent: &'static str,
    background: &'static str,
    stage_name: &'static str,
    highlighted: &'static str,
    expanded: &'static str,
    panel_hidden: &'static str,
    toggle_label: &'static str,
    toggle_href: String,
    pain_points: &'static [&'static str],
    inputs: &'static [&'static str],
    outputs: &'static [&'static str],
    stakeholders: &'static [&'static str],
}

fn stage_chip_models(state: &ViewState, session_key: &str) -> Vec<StageChipModel> {
    STAGES
        .iter()
        .map(|stage| StageChipModel {
            id: stage.id.to_string(),
            dom_id: format!("mep-stage-chip-{}", stage.id),
            name: stage.name,
            color: stage.color,
            icon: stage.icon,
            selected: bool_attr(state.stage.selected() == Some(stage.id)),
            step_count: stage.step_ids.len().to_string(),
            href: href_with(state, session_key, |next| {
                next.switch_to(DashboardView::Concept);
                next.stage.select_stage(stage.id);
            }),
        })
        .collect()
}

fn step_card_models(state: &ViewState, session_key: &str) -> Vec<StepCardModel> {
    STEPS
        .iter()
        .map(|step| {
            let expanded = state.panels.is_expanded(step.id);
            StepCardModel {
                id: step.id.to_string(),
                dom_id: format!("mep-step-card-{}", step.id),
                panel_id: format!("mep-step-panel-{}", step.id),
                title: step.title,
                icon: step.icon,
                accent: step.colors.accent,
                background: step.colors.background,
                stage_name: step.stage().map(|stage| stage.name).unwrap_or("unassigned"),
                highlighted: bool_attr(state.stage.highlights_step(step.id)),
                expanded: bool_attr(expanded),
                panel_hidden: hidden_attr(expanded),
                toggle_label: if expanded { "Hide details" } else { "Show details" },
                toggle_href: href_with(state, session_key, |next| {
                    next.panels = next.panels.toggled(step.id);
                }),
                pain_points: step.pain_points,
                inputs: step.inputs,
                outputs: step.outputs,
                stakeholders: step.stakeholders,
            }
        })
        .collect()
}

fn selected_stage_summary(selected: Option<StageId>) -> (String, &'static str, &'static str) {
    match selected {
        Some(stage) => {
            let descriptor = stage.descriptor();
            (stage.to_string(), descriptor.name, descriptor.description)
        }
        None => (
            "all".to_string(),
            "All stages",
            "Every workflow stage is shown; pick a stage to highlight its steps.",
        ),
    }
}

fn detail_list(
    list_id: String,
    kind: &'static str,
    heading: &'static str,
    items: &'static [&'static str],
) -> impl IntoView {
    let item_count = items.len().to_string();
    view! {
        <section data-detail-kind=kind data-item-count=item_count>
            <h4>{heading}</h4>
            <ul id=list_id>
                {items.iter().map(|item| view! { <li>{*item}</li> }).collect_view()}
            </ul>
        </section>
    }
}

/// Public `fn` `render_mep_dashboard_shell` in `mep-dashboard-ui`.
pub fn render_mep_dashboard_shell() -> String {
    render_mep_dashboard_shell_with_context(MepDashboardShellContext::default())
}

/// Public `fn` `render_mep_dashboard_shell_with_context` in `mep-dashboard-ui`.
pub fn render_mep_dashboard_shell_with_context(context: MepDashboardShellContext) -> String {
    let state = &context.state;
    let session_key = context.session_key.clone();
    let view_attr = state.view.as_str();
    let concept_visible = matches!(state.view, DashboardView::Concept);
    let services_visible = matches!(state.view, DashboardView::Services);
    let screen_attr = state.zoom.profile().as_str();

    let concept_tab_href = href_with(state, &session_key, |next| {
        next.switch_to(DashboardView::Concept)
    });
    let services_tab_href = href_with(state, &session_key, |next| {
        next.switch_to(DashboardView::Services)
    });

    let zoom_value = format!("{:.2}", state.zoom.value());
    let zoom_value_canvas = zoom_value.clone();
    let zoom_percent = format!("{}%", state.zoom.percent());
    let zoom_percent_attr = state.zoom.percent().to_string();
    let zoom_min = format!("{:.2}", state.zoom.profile().min());
    let zoom_max = format!("{:.2}", state.zoom.profile().max());
    let zoom_step = format!("{:.2}", state.zoom.profile().step());
    let zoom_in_disabled = bool_attr(!state.zoom.can_zoom_in());
    let zoom_out_disabled = bool_attr(!state.zoom.can_zoom_out());
    let zoom_in_href = href_with(state, &session_key, |next| next.zoom.zoom_in());
    let zoom_out_href = href_with(state, &session_key, |next| next.zoom.zoom_out());
    let zoom_reset_href = href_with(state, &session_key, |next| next.zoom.reset());
    let canvas_style = format!(
        "transform: scale({:.2}); transform-origin: top left;",
        state.zoom.value()
    );

    let (selected_stage_attr, selected_stage_name, selected_stage_description) =
        selected_stage_summary(state.stage.selected());
    let view_all_selected = bool_attr(state.stage.is_view_all());
    let view_all_href = href_with(state, &session_key, |next| next.stage.view_all());
    let stage_chips = stage_chip_models(state, &session_key);
    let step_cards = step_card_models(state, &session_key);
    let highlighted_step_count = StepId::all()
        .filter(|step| state.stage.highlights_step(*step))
        .count()
        .to_string();
    let expanded_step_count = state.panels.len().to_string();

    let legend_state = if state.legend_expanded {
        "expanded"
    } else {
        "collapsed"
    };
    let legend_hidden = hidden_attr(state.legend_expanded);
    let legend_aria_expanded = bool_attr(state.legend_expanded);
    let legend_toggle_href = href_with(state, &session_key, |next| next.toggle_legend());

    let share_open = bool_attr(state.share_modal_open);
    let share_hidden = hidden_attr(state.share_modal_open);
    let share_open_href = href_with(state, &session_key, |next| next.open_share_modal());
    let share_close_href = href_with(state, &session_key, |next| next.close_share_modal());
    let share_stage_href = state
        .stage
        .selected()
        .map(|stage| format!("/share/stage/{stage}"))
        .unwrap_or_else(|| "/share/stage".to_string());
    let copied_attr = bool_attr(state.copied);
    let copy_label = if state.copied { "Copied!" } else { "Copy diagram definition" };
    let copy_reset_ms = context.copy_reset_ms.to_string();
    let copy_session_key = session_key.clone();

    let shell = view! {
        <div
            id="mep-dashboard-shell"
            data-app="mep-digital-ecosystem"
            data-view=view_attr
            data-screen=screen_attr
            data-session-key=session_key
        >
            <header id="mep-dashboard-header">
                <h1>MEP Digital Ecosystem</h1>
                <p>"Concept-stage workflow, services and stage navigator"</p>
                <nav id="mep-view-tabs" role="tablist" aria-label="Dashboard views">
                    <a
                        id="mep-view-tab-concept"
                        role="tab"
                        data-view-option="concept"
                        aria-selected=bool_attr(concept_visible)
                        href=concept_tab_href
                    >
                        {DashboardView::Concept.label()}
                    </a>
                    <a
                        id="mep-view-tab-services"
                        role="tab"
                        data-view-option="services"
                        aria-selected=bool_attr(services_visible)
                        href=services_tab_href
                    >
                        {DashboardView::Services.label()}
                    </a>
                </nav>
                <a
                    id="mep-share-open"
                    data-action="open-share"
                    aria-controls="mep-share-modal"
                    aria-expanded=share_open
                    href=share_open_href
                >
                    Share
                </a>
            </header>
            <main id="mep-dashboard-main">
                <section
                    id="mep-concept-flow"
                    data-component="ConceptFlow"
                    data-panel-visible=bool_attr(concept_visible)
                    aria-hidden=hidden_attr(concept_visible)
                >
                    <nav
                        id="mep-stage-navigator"
                        data-component="StageNavigator"
                        data-selected-stage=selected_stage_attr.clone()
                        aria-label="Workflow stages"
                    >
                        <a
                            id="mep-stage-view-all"
                            data-stage-id="all"
                            data-stage-selected=view_all_selected
                            href=view_all_href
                        >
                            View All
                        </a>
                        {stage_chips
                            .into_iter()
                            .map(|chip| {
                                view! {
                                    <a
                                        id=chip.dom_id
                                        data-stage-id=chip.id
                                        data-stage-selected=chip.selected
                                        data-stage-color=chip.color
                                        data-stage-icon=chip.icon
                                        data-stage-step-count=chip.step_count
                                        href=chip.href
                                    >
                                        {chip.name}
                                    </a>
                                }
                            })
                            .collect_view()}
                    </nav>
                    <section id="mep-stage-summary" data-selected-stage=selected_stage_attr>
                        <h2 id="mep-stage-summary-name">{selected_stage_name}</h2>
                        <p id="mep-stage-summary-description">{selected_stage_description}</p>
                    </section>
                    <section
                        id="mep-zoom-controls"
                        data-component="ZoomControls"
                        role="group"
                        aria-label="Diagram zoom"
                        data-zoom-value=zoom_value
                        data-zoom-percent=zoom_percent_attr
                        data-zoom-min=zoom_min
                        data-zoom-max=zoom_max
                        data-zoom-step=zoom_step
                    >
                        <a
                            id="mep-zoom-out"
                            data-action="zoom-out"
                            aria-disabled=zoom_out_disabled
                            href=zoom_out_href
                        >
                            Zoom Out
                        </a>
                        <span id="mep-zoom-percent">{zoom_percent}</span>
                        <a
                            id="mep-zoom-in"
                            data-action="zoom-in"
                            aria-disabled=zoom_in_disabled
                            href=zoom_in_href
                        >
                            Zoom In
                        </a>
                        <a id="mep-zoom-reset" data-action="zoom-reset" href=zoom_reset_href>
                            Reset
                        </a>
                    </section>
                    <section
                        id="mep-diagram-canvas"
                        data-zoom=zoom_value_canvas
                        data-highlighted-step-count=highlighted_step_count
                        data-expanded-step-count=expanded_step_count
                        style=canvas_style
                    >
                        {step_cards
                            .into_iter()
                            .map(|card| {
                                let toggle_controls = card.panel_id.clone();
                                let pain_list_id = format!("mep-step-{}-pain-points", card.id);
                                let inputs_list_id = format!("mep-step-{}-inputs", card.id);
                                let outputs_list_id = format!("mep-step-{}-outputs", card.id);
                                let stakeholders_list_id =
                                    format!("mep-step-{}-stakeholders", card.id);
                                view! {
                                    <article
                                        id=card.dom_id
                                        data-component="StepCard"
                                        data-step-id=card.id
                                        data-step-stage=card.stage_name
                                        data-step-highlighted=card.highlighted
                                        data-step-expanded=card.expanded
                                        data-step-icon=card.icon
                                        data-step-accent=card.accent
                                        data-step-background=card.background
                                    >
                                        <h3>{card.title}</h3>
                                        <a
                                            data-action="toggle-step"
                                            aria-controls=toggle_controls
                                            aria-expanded=card.expanded
                                            href=card.toggle_href
                                        >
                                            {card.toggle_label}
                                        </a>
                                        <div id=card.panel_id aria-hidden=card.panel_hidden>
                                            {detail_list(pain_list_id, "pain-points", "Pain Points", card.pain_points)}
                                            {detail_list(inputs_list_id, "inputs", "Inputs", card.inputs)}
                                            {detail_list(outputs_list_id, "outputs", "Outputs", card.outputs)}
                                            {detail_list(stakeholders_list_id, "stakeholders", "Stakeholders", card.stakeholders)}
                                        </div>
                                    </article>
                                }
                            })
                            .collect_view()}
                    </section>
                </section>
                <section
                    id="mep-services-grid"
                    data-component="ServicesGrid"
                    data-service-count=SERVICES.len().to_string()
                    data-panel-visible=bool_attr(services_visible)
                    aria-hidden=hidden_attr(services_visible)
                >
                    {SERVICES
                        .iter()
                        .map(|service| {
                            let service_id = format!("mep-service-{}", service.key);
                            view! {
                                <article
                                    id=service_id
                                    data-component="ServiceCard"
                                    data-service-key=service.key
                                    data-service-icon=service.icon
                                    data-service-color=service.color
                                >
                                    <h3>{service.name}</h3>
                                    <p>{service.summary}</p>
                                </article>
                            }
                        })
                        .collect_view()}
                </section>
                <aside id="mep-legend" data-component="Legend" data-legend-state=legend_state>
                    <a
                        id="mep-legend-toggle"
                        data-action="toggle-legend"
                        aria-controls="mep-legend-entries"
                        aria-expanded=legend_aria_expanded
                        href=legend_toggle_href
                    >
                        Legend
                    </a>
                    <ul id="mep-legend-entries" aria-hidden=legend_hidden>
                        {LEGEND
                            .iter()
                            .map(|entry| {
                                view! {
                                    <li
                                        data-legend-key=entry.key
                                        data-legend-color=entry.color
                                        data-legend-icon=entry.icon
                                    >
                                        {entry.label}
                                    </li>
                                }
                            })
                            .collect_view()}
                        {STAGES
                            .iter()
                            .map(|stage| {
                                let legend_key = format!("stage-{}", stage.id);
                                view! {
                                    <li
                                        data-legend-key=legend_key
                                        data-legend-color=stage.color
                                        data-legend-icon=stage.icon
                                    >
                                        {stage.name}
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                </aside>
            </main>
            <section
                id="mep-share-modal"
                data-component="ShareModal"
                role="dialog"
                aria-label="Share and export"
                data-modal-open=share_open
                aria-hidden=share_hidden
            >
                <h2>Share this view</h2>
                <ul id="mep-share-links">
                    <li><a id="mep-share-link-diagram" href="/share/diagram">Concept flow diagram</a></li>
                    <li><a id="mep-share-link-stage" href=share_stage_href>Selected stage</a></li>
                </ul>
                <button
                    id="mep-copy-definition"
                    type="button"
                    data-action="copy-definition"
                    data-copy-endpoint=MEP_COPY_ENDPOINT
                    data-copy-source=MEP_DIAGRAM_DEFINITION_ENDPOINT
                    data-copy-strategy="navigator-clipboard"
                    data-copy-fallback="textarea-exec-command"
                    data-copy-reset-ms=copy_reset_ms
                    data-session-key=copy_session_key
                    data-copied=copied_attr
                >
                    {copy_label}
                </button>
                <pre id="mep-diagram-definition">{DIAGRAM_DEFINITION}</pre>
                <a id="mep-share-close" data-action="close-share" href=share_close_href>
                    Close
                </a>
            </section>
        </div>
    };
    shell.to_html()
}
