// SPDX-License-Identifier: MPL-2.0

//! Demo program: print the state of a matrix and optionally route a source.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example matrix_status -- <host> [<output index> <source name>]
//! ```
//!
//! # Example
//!
//! ```bash
//! RUST_LOG=nohassle_matrix=debug cargo run --example matrix_status -- 192.168.1.60 0 "Apple TV"
//! ```

use std::env;

use nohassle_matrix::{DeviceIndex, MatrixController, SelectOutcome};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("nohassle_matrix=info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 && args.len() != 4 {
        eprintln!("Usage: {} <host> [<output index> <source name>]", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  cargo run --example matrix_status -- 192.168.1.60 0 \"Apple TV\"");
        std::process::exit(1);
    }

    let host = &args[1];
    println!("Connecting to matrix {host}...");

    let matrix = MatrixController::http(host).build_and_probe().await?;

    if let [_, _, output, source] = args.as_slice() {
        let device = DeviceIndex::new(output.parse()?);
        match matrix.select_source(device, source).await? {
            SelectOutcome::Routed(index) => println!("Routed source {index} to output {device}"),
            SelectOutcome::UnknownSource => println!("No source named {source:?}"),
        }
    }

    let state = matrix.refresh().await;

    match state.is_on() {
        Some(true) => println!("Power: on"),
        Some(false) => println!("Power: off"),
        None => println!("Power: unknown"),
    }

    if let Some(sources) = state.sources() {
        println!("Sources:");
        for (index, name) in sources.iter().enumerate() {
            println!("  [{index}] {name}");
        }
    }

    println!("Outputs:");
    for output in state.outputs() {
        println!(
            "  [{}] {} ({})",
            output.index(),
            output.media_title(state.power()),
            matrix.output_unique_id(output.index())
        );
    }

    Ok(())
}
