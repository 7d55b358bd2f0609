//! Standalone LLM double. Takes one optional positional argument: the
//! port to listen on (default 8080).

use std::process::ExitCode;

use mockwire::{llm, server};

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> ExitCode {
    let port = match server::port_from_args(DEFAULT_PORT) {
        Ok(port) => port,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = server::run("LLM", port, llm::route).await {
        eprintln!("failed to start mock LLM server on port {}: {}", port, err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
