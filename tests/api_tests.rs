//! End-to-end REST tests against a live server.

#![allow(clippy::panic, clippy::indexing_slicing)]

mod common;

use common::{MANAGER, POOL, SUPPLY, TestServer, spawn_server};
use reqwest::Client;
use serde_json::{Value, json};
use tokio_test::assert_ok;

async fn post(client: &Client, server: &TestServer, path: &str, body: Value) -> (u16, Value) {
    let resp = assert_ok!(client.post(server.url(path)).json(&body).send().await);
    let status = resp.status().as_u16();
    let body = assert_ok!(resp.json::<Value>().await);
    (status, body)
}

async fn get(client: &Client, server: &TestServer, path: &str) -> (u16, Value) {
    let resp = assert_ok!(client.get(server.url(path)).send().await);
    let status = resp.status().as_u16();
    let body = assert_ok!(resp.json::<Value>().await);
    (status, body)
}

async fn approve(client: &Client, server: &TestServer, asset: &str, owner: &str, amount: u128) {
    let (status, _) = post(
        client,
        server,
        &format!("/api/v1/tokens/{asset}/approve"),
        json!({ "owner": owner, "amount": amount.to_string() }),
    )
    .await;
    assert_eq!(status, 200);
}

async fn liquidity(
    client: &Client,
    server: &TestServer,
    op: &str,
    caller: &str,
    a: u128,
    b: u128,
) -> (u16, Value) {
    post(
        client,
        server,
        &format!("/api/v1/liquidity/{op}"),
        json!({ "caller": caller, "amount_a": a.to_string(), "amount_b": b.to_string() }),
    )
    .await
}

async fn seed_pool(client: &Client, server: &TestServer, a: u128, b: u128) {
    approve(client, server, "a", MANAGER, a).await;
    approve(client, server, "b", MANAGER, b).await;
    let (status, _) = liquidity(client, server, "add", MANAGER, a, b).await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn health_reports_healthy() {
    let server = spawn_server().await;
    let (status, body) = get(&Client::new(), &server, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["manager"], MANAGER);
    assert_eq!(body["pool_account"], POOL);
    assert_eq!(body["token_a"], "TKA");
    assert_eq!(body["ws_subscribers"], 0);
}

#[tokio::test]
async fn fresh_pool_is_empty() {
    let server = spawn_server().await;
    let (status, body) = get(&Client::new(), &server, "/api/v1/pool").await;
    assert_eq!(status, 200);
    assert_eq!(body["manager"], MANAGER);
    assert_eq!(body["pool_account"], POOL);
    assert_eq!(body["token_a"]["symbol"], "TKA");
    assert_eq!(body["token_b"]["total_supply"], SUPPLY.to_string());
    assert_eq!(body["reserve_a"], "0");
    assert_eq!(body["reserve_b"], "0");
}

#[tokio::test]
async fn manager_adds_and_removes_liquidity() {
    let server = spawn_server().await;
    let client = Client::new();
    seed_pool(&client, &server, 1_000, 1_000).await;

    let (status, body) = liquidity(&client, &server, "remove", MANAGER, 700, 1_000).await;
    assert_eq!(status, 200);
    assert_eq!(body["reserve_a"], "300");
    assert_eq!(body["reserve_b"], "0");

    let (status, body) = liquidity(&client, &server, "remove", MANAGER, 400, 0).await;
    assert_eq!(status, 422);
    assert_eq!(body["error"]["code"], 4002);

    let (_, body) = get(&client, &server, "/api/v1/pool").await;
    assert_eq!(body["reserve_a"], "300");

    let (_, body) = get(&client, &server, &format!("/api/v1/tokens/a/balances/{MANAGER}")).await;
    assert_eq!(body["balance"], (SUPPLY - 300).to_string());
}

#[tokio::test]
async fn non_manager_is_forbidden() {
    let server = spawn_server().await;
    let client = Client::new();
    seed_pool(&client, &server, 500, 500).await;

    let (status, body) = liquidity(&client, &server, "remove", "0xintruder", 1, 1).await;
    assert_eq!(status, 403);
    assert_eq!(body["error"]["code"], 2001);

    let (status, _) = liquidity(&client, &server, "add", "0xintruder", 0, 0).await;
    assert_eq!(status, 403);
}

#[tokio::test]
async fn add_without_allowance_changes_nothing() {
    let server = spawn_server().await;
    let client = Client::new();
    approve(&client, &server, "a", MANAGER, 1_000).await;

    let (status, body) = liquidity(&client, &server, "add", MANAGER, 1_000, 1_000).await;
    assert_eq!(status, 422);
    assert_eq!(body["error"]["code"], 4001);

    let (_, pool) = get(&client, &server, "/api/v1/pool").await;
    assert_eq!(pool["reserve_a"], "0");
    let (_, allowance) = get(
        &client,
        &server,
        &format!("/api/v1/tokens/a/allowances/{MANAGER}/{POOL}"),
    )
    .await;
    assert_eq!(allowance["allowance"], "1000");
}

#[tokio::test]
async fn trader_swaps_at_one_to_one() {
    let server = spawn_server().await;
    let client = Client::new();
    seed_pool(&client, &server, 1_000, 1_000).await;

    let (status, _) = post(
        &client,
        &server,
        "/api/v1/tokens/b/transfer",
        json!({ "from": MANAGER, "to": "0xtrader", "amount": "250" }),
    )
    .await;
    assert_eq!(status, 200);
    approve(&client, &server, "b", "0xtrader", 250).await;

    let (status, body) = post(
        &client,
        &server,
        "/api/v1/swap/b-for-a",
        json!({ "trader": "0xtrader", "amount_in": "250" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["token_in"], "TKB");
    assert_eq!(body["token_out"], "TKA");
    assert_eq!(body["amount_out"], "250");
    assert_eq!(body["reserve_a"], "750");
    assert_eq!(body["reserve_b"], "1250");

    let (_, balance) = get(&client, &server, "/api/v1/tokens/a/balances/0xtrader").await;
    assert_eq!(balance["balance"], "250");
}

#[tokio::test]
async fn swap_on_empty_pool_is_rejected() {
    let server = spawn_server().await;
    let client = Client::new();
    approve(&client, &server, "a", MANAGER, 10).await;

    let (status, body) = post(
        &client,
        &server,
        "/api/v1/swap/a-for-b",
        json!({ "trader": MANAGER, "amount_in": "10" }),
    )
    .await;
    assert_eq!(status, 422);
    assert_eq!(body["error"]["code"], 4003);
    assert_eq!(body["error"]["message"], "no tokens in the liquidity pool");
}

#[tokio::test]
async fn swap_draining_reserve_then_reverse_is_empty() {
    let server = spawn_server().await;
    let client = Client::new();
    seed_pool(&client, &server, 1_000, 1_000).await;
    approve(&client, &server, "a", MANAGER, 1_000).await;

    let (status, body) = post(
        &client,
        &server,
        "/api/v1/swap/a-for-b",
        json!({ "trader": MANAGER, "amount_in": "1000" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["reserve_a"], "2000");
    assert_eq!(body["reserve_b"], "0");

    approve(&client, &server, "b", MANAGER, 1).await;
    let (status, body) = post(
        &client,
        &server,
        "/api/v1/swap/b-for-a",
        json!({ "trader": MANAGER, "amount_in": "1" }),
    )
    .await;
    assert_eq!(status, 422);
    assert_eq!(body["error"]["code"], 4003);
}

#[tokio::test]
async fn malformed_requests_are_bad_requests() {
    let server = spawn_server().await;
    let client = Client::new();

    let (status, body) = post(
        &client,
        &server,
        "/api/v1/swap/a-for-b",
        json!({ "trader": MANAGER, "amount_in": "-1" }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], 1001);

    let (status, _) = get(&client, &server, "/api/v1/tokens/c/balances/0xanyone").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn pool_custody_cannot_be_moved_through_token_endpoints() {
    let server = spawn_server().await;
    let client = Client::new();
    seed_pool(&client, &server, 1_000, 1_000).await;

    let (status, body) = post(
        &client,
        &server,
        "/api/v1/tokens/a/transfer",
        json!({ "from": POOL, "to": "0xthief", "amount": "1000" }),
    )
    .await;
    assert_eq!(status, 403);
    assert_eq!(body["error"]["code"], 2001);

    let (status, _) = post(
        &client,
        &server,
        "/api/v1/tokens/b/approve",
        json!({ "owner": POOL, "spender": "0xthief", "amount": "1000" }),
    )
    .await;
    assert_eq!(status, 403);

    let (status, _) = post(
        &client,
        &server,
        "/api/v1/swap/a-for-b",
        json!({ "trader": POOL, "amount_in": "10" }),
    )
    .await;
    assert_eq!(status, 403);

    let (_, pool) = get(&client, &server, "/api/v1/pool").await;
    assert_eq!(pool["reserve_a"], "1000");
    assert_eq!(pool["reserve_b"], "1000");

    let (_, balance) = get(&client, &server, "/api/v1/tokens/a/balances/0xthief").await;
    assert_eq!(balance["balance"], "0");
    let (_, allowance) = get(
        &client,
        &server,
        &format!("/api/v1/tokens/b/allowances/{POOL}/0xthief"),
    )
    .await;
    assert_eq!(allowance["allowance"], "0");
}
