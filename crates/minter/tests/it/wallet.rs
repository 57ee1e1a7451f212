use std::time::Duration;

use crate::utils::{TestApp, wait_for};
use alloy_primitives::{Address, address};
use minter_wallets::{mock::MockProvider, wallet_browser::BrowserApiResponse};
use serde_json::{Value, json};

const ALICE: Address = address!("0xABC0000000000000000000000000000000000001");
const TIMEOUT: Duration = Duration::from_secs(5);

fn wallet() -> MockProvider {
    MockProvider::new()
        .with_result("eth_accounts", json!([ALICE]))
        .with_result("eth_chainId", json!("0x5"))
        .with_result("eth_blockNumber", json!("0x1"))
        .with_result("eth_getLogs", json!([]))
}

async fn post(app: &TestApp, path: &str) -> BrowserApiResponse {
    app.post_json(path, &Value::Null).await
}

async fn wait_for_state(app: &TestApp, state: Value) {
    wait_for(|| async { app.view().await["state"] == state }, TIMEOUT).await;
}

#[tokio::test]
async fn load_connects_authorized_account() {
    let app = TestApp::spawn().await;
    app.open_page(Some(wallet())).await;
    assert_eq!(post(&app, "/api/ui/load").await, BrowserApiResponse::ok());

    wait_for_state(&app, json!({ "state": "connected", "activity": "idle" })).await;
    let view = app.view().await;
    assert_eq!(view["account"], json!(ALICE));
    assert_eq!(view["chain_id"], "0x5");
    assert_eq!(view["wrong_network"], false);
    assert_eq!(view["connect_button"], "hidden");
    assert_eq!(view["ring"], "indigo");
    assert!(app.server.controller().is_subscribed());
    assert!(app.alerts().await.is_empty());
}

#[tokio::test]
async fn refresh_after_revoking_disconnects() {
    let app = TestApp::spawn().await;
    let wallet = wallet()
        .with_result("eth_accounts", json!([]))
        .with_error("eth_sendTransaction", -32000, "insufficient funds");
    wallet.push_result("eth_accounts", json!([ALICE]));
    app.open_page(Some(wallet)).await;

    post(&app, "/api/ui/load").await;
    wait_for_state(&app, json!({ "state": "connected", "activity": "idle" })).await;
    post(&app, "/api/ui/mint").await;
    wait_for_state(&app, json!({ "state": "connected", "activity": "error" })).await;

    post(&app, "/api/ui/load").await;
    wait_for_state(&app, json!({ "state": "disconnected" })).await;
    let view = app.view().await;
    assert!(view["account"].is_null());
    assert!(view["error_banner"].is_null());
    assert_eq!(view["request"]["is_minting"], false);
    assert!(!app.server.controller().is_subscribed());
}

#[tokio::test]
async fn load_without_injected_wallet_alerts() {
    let app = TestApp::spawn().await;
    app.open_page(None).await;
    post(&app, "/api/ui/load").await;

    let mut alerts = Vec::new();
    for _ in 0..500 {
        alerts.extend(app.alerts().await);
        if !alerts.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(alerts, vec!["Make sure that metamask is installed.".to_string()]);
    assert_eq!(app.view().await["state"]["state"], "disconnected");
}

#[tokio::test]
async fn wrong_network_warns_but_connects() {
    let app = TestApp::spawn().await;
    app.open_page(Some(wallet().with_result("eth_chainId", json!("0x1")))).await;
    post(&app, "/api/ui/load").await;

    wait_for_state(&app, json!({ "state": "connected", "activity": "idle" })).await;
    assert_eq!(app.alerts().await, vec!["You are not connected to the Goerli Test Network!"]);
    let view = app.view().await;
    assert_eq!(view["wrong_network"], true);
    assert_eq!(view["mint_enabled"], true);
}

#[tokio::test]
async fn connect_then_mint() {
    let app = TestApp::spawn().await;
    let wallet = wallet()
        .with_result("eth_requestAccounts", json!([ALICE]))
        .with_result("eth_sendTransaction", json!("0xdeadbeef"))
        .with_result(
            "eth_getTransactionReceipt",
            json!({ "transactionHash": "0xdeadbeef", "blockNumber": "0x2", "status": "0x1" }),
        );
    // authorized once the user accepted the prompt
    wallet.push_result("eth_accounts", json!([]));
    app.open_page(Some(wallet)).await;

    post(&app, "/api/ui/load").await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(app.view().await["state"]["state"], "disconnected");

    assert_eq!(post(&app, "/api/ui/connect").await, BrowserApiResponse::ok());
    wait_for_state(&app, json!({ "state": "connected", "activity": "idle" })).await;

    assert_eq!(post(&app, "/api/ui/mint").await, BrowserApiResponse::ok());
    wait_for_state(&app, json!({ "state": "connected", "activity": "success" })).await;

    let view = app.view().await;
    assert_eq!(view["request"]["transaction_hash"], "0xdeadbeef");
    assert_eq!(view["request"]["success_message"], "Mining successful. Hash: 0xdeadbeef");
    assert!(view["request"]["error_message"].is_null());
    assert_eq!(
        view["success_banner"],
        json!({
            "text": "Mining successful. Hash: 0xdeadbeef.",
            "href": "https://goerli.etherscan.io/tx/0xdeadbeef"
        })
    );
    assert_eq!(view["ring"], "green");
    assert_eq!(view["spinner"], "spinning-btn");
}

#[tokio::test]
async fn failed_mint_shows_wallet_message() {
    let app = TestApp::spawn().await;
    app.open_page(Some(wallet().with_error("eth_sendTransaction", -32000, "insufficient funds")))
        .await;
    post(&app, "/api/ui/load").await;
    wait_for_state(&app, json!({ "state": "connected", "activity": "idle" })).await;

    post(&app, "/api/ui/mint").await;
    wait_for_state(&app, json!({ "state": "connected", "activity": "error" })).await;

    let view = app.view().await;
    assert_eq!(view["request"]["error_message"], "insufficient funds");
    assert_eq!(view["request"]["is_minting"], false);
    assert_eq!(view["error_banner"], "insufficient funds.");
    assert!(view["success_banner"].is_null());
}

#[tokio::test]
async fn rejected_transaction_shows_wallet_message() {
    let app = TestApp::spawn().await;
    app.open_page(Some(wallet().with_error(
        "eth_sendTransaction",
        4001,
        "MetaMask Tx Signature: User denied transaction signature.",
    )))
    .await;
    post(&app, "/api/ui/load").await;
    wait_for_state(&app, json!({ "state": "connected", "activity": "idle" })).await;

    post(&app, "/api/ui/mint").await;
    wait_for_state(&app, json!({ "state": "connected", "activity": "error" })).await;
    assert_eq!(
        app.view().await["error_banner"],
        "MetaMask Tx Signature: User denied transaction signature.."
    );
}

#[tokio::test]
async fn mint_disabled_while_minting() {
    let app = TestApp::spawn().await;
    // never mined
    app.open_page(Some(
        wallet()
            .with_result("eth_sendTransaction", json!("0xdeadbeef"))
            .with_result("eth_getTransactionReceipt", Value::Null),
    ))
    .await;
    post(&app, "/api/ui/load").await;
    wait_for_state(&app, json!({ "state": "connected", "activity": "idle" })).await;

    assert_eq!(post(&app, "/api/ui/mint").await, BrowserApiResponse::ok());
    let view = app.view().await;
    assert_eq!(view["state"], json!({ "state": "connected", "activity": "minting" }));
    assert_eq!(view["mint_enabled"], false);
    assert_eq!(view["spinner"], "spinning-btn-faster");

    assert_eq!(
        post(&app, "/api/ui/mint").await,
        BrowserApiResponse::error("a mint is already in progress")
    );
}

#[tokio::test]
async fn mint_without_wallet_alerts() {
    let app = TestApp::spawn().await;
    app.open_page(None).await;

    assert_eq!(post(&app, "/api/ui/mint").await, BrowserApiResponse::error("no wallet connected"));
    assert_eq!(app.alerts().await, vec!["Please connect to your Metamask wallet."]);
    assert_eq!(app.view().await["request"]["is_minting"], false);
}
