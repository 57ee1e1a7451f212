use crate::utils::TestApp;
use minter_wallets::wallet_browser::SESSION_TOKEN_HEADER;
use reqwest::StatusCode;

#[tokio::test]
async fn serves_page_with_session_token() {
    let app = TestApp::spawn().await;
    let resp = app.client.get(format!("{}/", app.base)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "text/html; charset=utf-8");

    let page = resp.text().await.unwrap();
    assert!(page.contains(app.server.session_token().as_str()));
    assert!(!page.contains("__SESSION_TOKEN__"));
    assert!(page.contains(r#"id="mint-btn""#));
}

#[tokio::test]
async fn api_requires_session_token() {
    let app = TestApp::spawn().await;
    for path in ["/api/ui/view", "/api/ui/alerts", "/api/wallet/request"] {
        let resp = app.client.get(format!("{}{path}", app.base)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{path}");
    }

    let resp = app
        .client
        .post(format!("{}/api/ui/mint", app.base))
        .header(SESSION_TOKEN_HEADER, "not-the-token")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn initial_view() {
    let app = TestApp::spawn().await;
    let view = app.view().await;
    assert_eq!(view["state"]["state"], "disconnected");
    assert_eq!(view["connect_button"], "label");
    assert_eq!(view["spinner"], "spinning-btn");
    assert_eq!(view["ring"], "red");
    assert_eq!(view["mint_enabled"], true);
    assert!(view["error_banner"].is_null());
    assert!(view["success_banner"].is_null());
}

#[tokio::test]
async fn hover_shows_wallet_icon() {
    let app = TestApp::spawn().await;
    let _: serde_json::Value =
        app.post_json("/api/ui/hover", &serde_json::json!({ "show_icon": true })).await;
    assert_eq!(app.view().await["connect_button"], "wallet_icon");

    let _: serde_json::Value =
        app.post_json("/api/ui/hover", &serde_json::json!({ "show_icon": false })).await;
    assert_eq!(app.view().await["connect_button"], "label");
}
