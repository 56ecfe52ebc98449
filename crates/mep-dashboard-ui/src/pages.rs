//! Share page, not-found page and the HTML document wrapper.

use leptos::prelude::*;
use mep_dashboard::{stage_by_id, step_by_id};

use crate::{
    render_mep_dashboard_shell_with_context, MepDashboardShellContext, MEP_DEFAULT_SESSION_KEY,
};

pub const MEP_DASHBOARD_TITLE: &str = "MEP Digital Ecosystem";
pub const MEP_SHARE_TITLE: &str = "MEP Digital Ecosystem - Shared View";
pub const MEP_NOT_FOUND_TITLE: &str = "MEP Digital Ecosystem - Not Found";

/// Client-side copy: clipboard API first, hidden textarea + `execCommand`
/// second, then reports the copy to the gateway so the flag is shared.
pub const MEP_COPY_SCRIPT: &str = r#"
(function () {
  const button = document.getElementById("mep-copy-definition");
  if (!button) { return; }
  const resetMs = Number(button.dataset.copyResetMs || "2000");
  let resetTimer = null;
  function fallbackCopy(text) {
    const area = document.createElement("textarea");
    area.value = text;
    area.setAttribute("readonly", "");
    area.style.position = "absolute";
    area.style.left = "-9999px";
    document.body.appendChild(area);
    area.select();
    try { document.execCommand("copy"); } catch (_) {}
    document.body.removeChild(area);
  }
  function markCopied() {
    button.dataset.copied = "true";
    button.textContent = "Copied!";
    if (resetTimer) { clearTimeout(resetTimer); }
    resetTimer = setTimeout(function () {
      button.dataset.copied = "false";
      button.textContent = "Copy diagram definition";
      resetTimer = null;
    }, resetMs);
  }
  button.addEventListener("click", async function () {
    const source = document.getElementById("mep-diagram-definition");
    const text = source ? source.textContent : "";
    try {
      await navigator.clipboard.writeText(text);
    } catch (_) {
      fallbackCopy(text);
    }
    markCopied();
    fetch(button.dataset.copyEndpoint, {
      method: "POST",
      headers: { "content-type": "application/json" },
      body: JSON.stringify({ session_key: button.dataset.sessionKey }),
    }).catch(function () {});
  });
})();
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Public struct `MepSharePageContext` in `mep-dashboard-ui`.
pub struct MepSharePageContext {
    pub kind: String,
    pub id: Option<String>,
}

struct ShareSummary {
    resolved: bool,
    title: String,
    description: String,
    dashboard_href: String,
}

/// Best-effort catalog summary for `stage` and `step` shares; anything else is
/// only echoed back.
fn share_summary(kind: &str, id: Option<&str>) -> ShareSummary {
    let parsed = id.and_then(|raw| raw.trim().parse::<u8>().ok());
    let dashboard = format!("/?view=concept&session={MEP_DEFAULT_SESSION_KEY}");
    match (kind, parsed) {
        ("stage", Some(raw)) => match stage_by_id(raw) {
            Some(stage) => ShareSummary {
                resolved: true,
                title: stage.name.to_string(),
                description: stage.description.to_string(),
                dashboard_href: format!("{dashboard}&stage={}", stage.id),
            },
            None => unresolved(kind, dashboard),
        },
        ("step", Some(raw)) => match step_by_id(raw) {
            Some(step) => ShareSummary {
                resolved: true,
                title: step.title.to_string(),
                description: format!(
                    "{} inputs, {} outputs, {} stakeholders",
                    step.inputs.len(),
                    step.outputs.len(),
                    step.stakeholders.len()
                ),
                dashboard_href: format!("{dashboard}&expanded={}", step.id),
            },
            None => unresolved(kind, dashboard),
        },
        _ => unresolved(kind, dashboard),
    }
}

fn unresolved(kind: &str, dashboard_href: String) -> ShareSummary {
    ShareSummary {
        resolved: false,
        title: format!("Shared {kind}"),
        description: "Open the dashboard to explore the full workflow.".to_string(),
        dashboard_href,
    }
}

/// Public `fn` `render_mep_share_page` in `mep-dashboard-ui`.
pub fn render_mep_share_page(context: MepSharePageContext) -> String {
    let kind = context.kind;
    let id = context.id.unwrap_or_default();
    let has_id = !id.is_empty();
    let summary = share_summary(&kind, has_id.then_some(id.as_str()));
    let id_display = if has_id { id.clone() } else { "none".to_string() };
    let kind_attr = kind.clone();

    let page = view! {
        <div
            id="mep-share-page"
            data-app="mep-digital-ecosystem"
            data-share-type=kind_attr
            data-share-id=id
            data-share-has-id=if has_id { "true" } else { "false" }
            data-share-resolved=if summary.resolved { "true" } else { "false" }
        >
            <header id="mep-share-header">
                <h1>{summary.title}</h1>
                <p id="mep-share-description">{summary.description}</p>
            </header>
            <dl id="mep-share-parameters">
                <dt>Type</dt>
                <dd id="mep-share-type-value">{kind}</dd>
                <dt>Identifier</dt>
                <dd id="mep-share-id-value">{id_display}</dd>
            </dl>
            <a id="mep-share-back" href=summary.dashboard_href>
                Open dashboard
            </a>
        </div>
    };
    page.to_html()
}

/// Public `fn` `render_mep_not_found_page` in `mep-dashboard-ui`.
pub fn render_mep_not_found_page(requested_path: &str) -> String {
    let requested_path = requested_path.to_string();
    let requested_path_text = requested_path.clone();
    let page = view! {
        <div id="mep-not-found" data-app="mep-digital-ecosystem" data-requested-path=requested_path>
            <h1>Page not found</h1>
            <p id="mep-not-found-path">{requested_path_text}</p>
            <a id="mep-not-found-home" href="/">
                Back to dashboard
            </a>
        </div>
    };
    page.to_html()
}

/// Wraps a rendered fragment in a complete HTML document.
pub fn render_mep_document(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
</head>
<body>
{body}
<script>{MEP_COPY_SCRIPT}</script>
</body>
</html>
"#
    )
}

/// Full dashboard document for `context`.
pub fn render_mep_dashboard_document(context: MepDashboardShellContext) -> String {
    render_mep_document(
        MEP_DASHBOARD_TITLE,
        &render_mep_dashboard_shell_with_context(context),
    )
}

pub fn render_mep_share_document(context: MepSharePageContext) -> String {
    render_mep_document(MEP_SHARE_TITLE, &render_mep_share_page(context))
}

pub fn render_mep_not_found_document(requested_path: &str) -> String {
    render_mep_document(
        MEP_NOT_FOUND_TITLE,
        &render_mep_not_found_page(requested_path),
    )
}
