//! Standalone MCP double. Takes one optional positional argument: the
//! port to listen on (default 8081).

use std::process::ExitCode;

use mockwire::{mcp, server};

const DEFAULT_PORT: u16 = 8081;

#[tokio::main]
async fn main() -> ExitCode {
    let port = match server::port_from_args(DEFAULT_PORT) {
        Ok(port) => port,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = server::run("MCP", port, mcp::route).await {
        eprintln!("failed to start mock MCP server on port {}: {}", port, err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
