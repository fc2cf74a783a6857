use std::path::PathBuf;

use overlay::manifest::parse_manifest;
use reqwest::StatusCode;

use super::*;
use crate::config::HostConfig;

const MANIFEST: &str = r#"{"name":"Field guide","pages":[{"number":1,"imageUrl":"/pages/1.png"}]}"#;
const INDEX: &str = "<!doctype html><title>viewer</title>";

fn scratch_root(name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!("pageview-routes-{}-{name}", std::process::id()));
    if root.exists() {
        std::fs::remove_dir_all(&root).unwrap();
    }
    std::fs::create_dir_all(root.join("pages")).unwrap();
    std::fs::create_dir_all(root.join("site")).unwrap();
    std::fs::write(root.join("pages/data.json"), MANIFEST).unwrap();
    std::fs::write(root.join("pages/1.png"), b"\x89PNG").unwrap();
    std::fs::write(root.join("site/index.html"), INDEX).unwrap();
    std::fs::write(root.join("site/viewer.js"), "export default 1;").unwrap();
    root
}

async fn spawn(name: &str, with_document: bool) -> String {
    let root = scratch_root(name);
    let config = HostConfig { port: 0, pages_dir: root.join("pages"), site_dir: root.join("site") };
    let document = with_document.then(|| parse_manifest(MANIFEST).unwrap());
    let router = app(HostState::new(config, document));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn serves_manifest_from_pages_dir() {
    let base = spawn("manifest", true).await;
    let res = reqwest::get(format!("{base}/pages/data.json")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), MANIFEST);
}

#[tokio::test]
async fn serves_page_images() {
    let base = spawn("image", true).await;
    let res = reqwest::get(format!("{base}/pages/1.png")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.bytes().await.unwrap().as_ref(), b"\x89PNG");
}

#[tokio::test]
async fn missing_page_image_is_not_found() {
    let base = spawn("missing-image", true).await;
    let res = reqwest::get(format!("{base}/pages/9.png")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn serves_site_assets() {
    let base = spawn("assets", true).await;
    let res = reqwest::get(format!("{base}/viewer.js")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "export default 1;");
}

#[tokio::test]
async fn deep_links_fall_back_to_index() {
    let base = spawn("deep-link", true).await;
    for path in ["/", "/page/3", "/nowhere"] {
        let res = reqwest::get(format!("{base}{path}")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{path}");
        assert_eq!(res.text().await.unwrap(), INDEX, "{path}");
    }
}

#[tokio::test]
async fn healthz_reports_document() {
    let base = spawn("health", true).await;
    let body: serde_json::Value = reqwest::get(format!("{base}/healthz")).await.unwrap().json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["document"], "Field guide");
    assert_eq!(body["pages"], 1);
}

#[tokio::test]
async fn healthz_without_document() {
    let base = spawn("health-empty", false).await;
    let body: serde_json::Value = reqwest::get(format!("{base}/healthz")).await.unwrap().json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["document"].is_null());
    assert_eq!(body["pages"], 0);
}
