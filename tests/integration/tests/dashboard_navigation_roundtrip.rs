use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use mep_dashboard::DIAGRAM_DEFINITION;
use mep_gateway::{build_dashboard_router, run_dashboard_server, DashboardServerConfig};
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn spawn_dashboard(copy_reset: Duration) -> Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("bind ephemeral listener")?;
    let addr = listener.local_addr().context("resolve listener addr")?;
    let app = build_dashboard_router(DashboardServerConfig {
        bind: addr.to_string(),
        copy_feedback_reset: copy_reset,
    });
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    Ok((addr, handle))
}

/// Returns the unescaped `href` of the element carrying `id`.
fn href_for(body: &str, id: &str) -> String {
    let marker = format!("id=\"{id}\"");
    let start = body.find(&marker).unwrap_or_else(|| panic!("missing element {id}"));
    let tail = &body[start..];
    let href_start = tail.find("href=\"").expect("element has href") + "href=\"".len();
    let href_end = tail[href_start..].find('"').expect("href is terminated");
    tail[href_start..href_start + href_end].replace("&amp;", "&")
}

async fn fetch(client: &reqwest::Client, addr: SocketAddr, path: &str) -> (u16, String) {
    let response = client
        .get(format!("http://{addr}{path}"))
        .send()
        .await
        .expect("send request");
    let status = response.status().as_u16();
    (status, response.text().await.expect("read body"))
}

#[tokio::test]
async fn integration_following_rendered_links_walks_the_dashboard_state() {
    let (addr, handle) = spawn_dashboard(Duration::from_millis(2_000))
        .await
        .expect("spawn dashboard");
    let client = reqwest::Client::new();

    let (status, body) = fetch(&client, addr, "/").await;
    assert_eq!(status, 200);
    assert!(body.contains("data-zoom-percent=\"48\""));

    let zoom_in = href_for(&body, "mep-zoom-in");
    let (_, body) = fetch(&client, addr, &zoom_in).await;
    assert!(body.contains("data-zoom-percent=\"56\""));

    let stage_three = href_for(&body, "mep-stage-chip-3");
    let (_, body) = fetch(&client, addr, &stage_three).await;
    assert!(body.contains("data-selected-stage=\"3\""));
    assert!(body.contains("data-zoom-percent=\"56\""));

    let reselect = href_for(&body, "mep-stage-chip-3");
    let (_, body) = fetch(&client, addr, &reselect).await;
    assert!(body.contains("data-selected-stage=\"3\""));

    let reset = href_for(&body, "mep-zoom-reset");
    let (_, body) = fetch(&client, addr, &reset).await;
    assert!(body.contains("data-zoom-percent=\"48\""));
    assert!(body.contains("data-selected-stage=\"3\""));

    let view_all = href_for(&body, "mep-stage-view-all");
    let (_, body) = fetch(&client, addr, &view_all).await;
    assert!(body.contains("data-selected-stage=\"all\""));

    handle.abort();
}

#[tokio::test]
async fn integration_share_copy_and_catalog_surfaces_agree() {
    let (addr, handle) = spawn_dashboard(Duration::from_millis(150))
        .await
        .expect("spawn dashboard");
    let client = reqwest::Client::new();

    let (status, body) = fetch(&client, addr, "/share/diagram/42").await;
    assert_eq!(status, 200);
    assert!(body.contains("data-share-type=\"diagram\""));
    assert!(body.contains("data-share-id=\"42\""));

    let (status, _) = fetch(&client, addr, "/share/diagram/42/extra").await;
    assert_eq!(status, 404);

    let catalog = client
        .get(format!("http://{addr}/api/catalog"))
        .send()
        .await
        .expect("catalog request")
        .json::<Value>()
        .await
        .expect("catalog json");
    assert_eq!(catalog["stages"].as_array().map(Vec::len), Some(5));
    assert_eq!(catalog["steps"].as_array().map(Vec::len), Some(8));

    let copied = client
        .post(format!("http://{addr}/api/copy"))
        .json(&json!({ "session_key": "e2e" }))
        .send()
        .await
        .expect("copy request")
        .json::<Value>()
        .await
        .expect("copy json");
    assert_eq!(copied["copied"], true);
    assert_eq!(copied["payload"], DIAGRAM_DEFINITION);

    let (_, body) = fetch(&client, addr, "/?share=open&session=e2e").await;
    assert!(body.contains("data-copied=\"true\""));

    tokio::time::sleep(Duration::from_millis(400)).await;
    let (_, body) = fetch(&client, addr, "/?share=open&session=e2e").await;
    assert!(body.contains("data-copied=\"false\""));

    handle.abort();
}

#[tokio::test]
async fn regression_invalid_bind_address_is_reported() {
    let error = run_dashboard_server(DashboardServerConfig {
        bind: "not-an-address".to_string(),
        copy_feedback_reset: Duration::from_millis(2_000),
    })
    .await
    .expect_err("invalid bind must fail");
    assert!(format!("{error:#}").contains("invalid --bind"));
}
