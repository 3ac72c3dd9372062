#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use catalog::{
    abstract_trait::sync::{DynUpstreamClient, UpstreamClientTrait},
    config::UpstreamConfig,
    di::DependenciesInjectDeps,
    repository::{InMemoryCatalog, Repositories},
    state::AppState,
    sync::{CredentialDeriver, Credentials, FixedClock, RawResponse},
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use shared::errors::UpstreamError;
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;

pub const SELLABLE: &str = "sellable";

/// 16 Oct 2026; username `tesprogrammer161026C23`.
pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

pub const FIXED_USERNAME: &str = "tesprogrammer161026C23";
pub const FIXED_PASSWORD: &str = "8a3b68fba422efea2362cb233e9dfa14";

pub fn pen_payload() -> Value {
    json!({
        "data": [
            {"nama_produk": "Pen", "harga": "5000", "kategori": "Stationery", "status": "sellable"}
        ]
    })
}

/// A router served on an ephemeral localhost port; aborted on drop.
pub struct TestServer {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn upstream_config(url: String, timeout: Duration) -> UpstreamConfig {
    UpstreamConfig {
        api_url: url,
        username_suffix: Some("C23".to_string()),
        timeout,
        ..UpstreamConfig::default()
    }
}

/// Upstream stand-in that always answers with the same payload.
pub struct StaticClient(pub Value);

#[async_trait]
impl UpstreamClientTrait for StaticClient {
    async fn fetch(&self, _credentials: &Credentials) -> Result<RawResponse, UpstreamError> {
        Ok(RawResponse(self.0.clone()))
    }
}

pub fn in_memory_state(store: &InMemoryCatalog, client: DynUpstreamClient) -> AppState {
    let deps = DependenciesInjectDeps {
        repositories: Repositories::in_memory(store),
        clock: Arc::new(FixedClock(fixed_date())),
        client,
        deriver: CredentialDeriver::new("bisacoding", "tesprogrammer", Some("C23".into())),
        sellable_status: SELLABLE.to_string(),
    };

    AppState::from_deps(deps)
}
