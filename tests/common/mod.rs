#![allow(dead_code)]

use mockwire::server::MockServer;
use mockwire::{llm, mcp};

pub async fn start_llm() -> MockServer {
    MockServer::start(llm::route)
        .await
        .expect("mock LLM server starts")
}

pub async fn start_mcp() -> MockServer {
    MockServer::start(mcp::route)
        .await
        .expect("mock MCP server starts")
}

pub fn client() -> reqwest::Client {
    reqwest::Client::new()
}

pub async fn get_text(base_url: &str, path: &str) -> (u16, String) {
    let response = client()
        .get(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("request sends");

    let status = response.status().as_u16();
    let body = response.text().await.expect("body reads");
    (status, body)
}
