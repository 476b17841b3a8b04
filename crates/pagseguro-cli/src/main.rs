//! PagSeguro command-line client
//!
//! Reads merchant credentials from the environment (or `.env`) and runs a
//! single checkout, notification lookup or payment-link command, printing
//! the outcome as JSON.

mod commands;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagseguro::PagSeguroClient;

use crate::commands::Command;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let client = PagSeguroClient::from_env()?;
    tracing::info!(
        environment = ?client.config().environment,
        base_url = %client.config().base_url,
        "PagSeguro client configured"
    );

    let output = commands::run(client, command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
