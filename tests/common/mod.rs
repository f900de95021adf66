//! Shared harness: boots the full application on an ephemeral port.

#![allow(dead_code, clippy::panic)]

use std::net::SocketAddr;
use std::time::Duration;

use simple_dex::api;
use simple_dex::app_state::AppState;
use simple_dex::config::{DexConfig, TokenConfig};
use simple_dex::domain::{AccountId, EventBus};
use simple_dex::service::DexService;

/// Manager account used by every test server.
pub const MANAGER: &str = "0xmanager";
/// Pool custody account used by every test server.
pub const POOL: &str = "0xpool";
/// Genesis supply minted to the manager for each token.
pub const SUPPLY: u128 = 1_000_000;

/// Running test server.
#[derive(Debug)]
pub struct TestServer {
    /// Bound address.
    pub addr: SocketAddr,
}

impl TestServer {
    /// `http://` URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// `ws://` URL of the event stream.
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

fn config() -> DexConfig {
    DexConfig {
        listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        event_bus_capacity: 64,
        request_timeout: Duration::from_secs(5),
        manager: AccountId::new(MANAGER),
        pool_account: AccountId::new(POOL),
        token_a: TokenConfig {
            symbol: "TKA".to_string(),
            name: "Token A".to_string(),
        },
        token_b: TokenConfig {
            symbol: "TKB".to_string(),
            name: "Token B".to_string(),
        },
        token_decimals: 18,
        initial_supply: SUPPLY,
    }
}

/// Deploys a fresh pool and serves it in the background.
pub async fn spawn_server() -> TestServer {
    let config = config();
    let Ok(service) = DexService::from_config(&config, EventBus::new(config.event_bus_capacity))
    else {
        panic!("genesis failed");
    };
    let app = api::build_app(AppState::new(service), config.request_timeout);

    let Ok(listener) = tokio::net::TcpListener::bind(config.listen_addr).await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    TestServer { addr }
}
