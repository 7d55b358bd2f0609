//! Minimal HTTP test doubles for exercising clients of a chat-completion
//! LLM API and an MCP command-discovery API without touching real
//! services. Each double answers with canned, input-derived or fixture
//! responses so test assertions stay deterministic.
//!
//! The crate ships two binaries (`mock-llm-server`, `mock-mcp-server`)
//! and exposes the same routers through [`server::MockServer`] so tests
//! can run either double in-process on an ephemeral port.

pub mod http;
pub mod llm;
pub mod mcp;
pub mod server;
