//! Basic SDK usage example.
//!
//! Reads `FOLO_SESSION_TOKEN` from the environment, prints the unread count
//! and the first page of subscriptions.
//!
//! Run with: cargo run --example basic_usage

use folo_core::FoloTool;
use folo_sdk::{FoloClient, FoloResult};
use serde_json::json;

#[tokio::main]
async fn main() -> FoloResult<()> {
    tracing_subscriber::fmt::init();

    let client = FoloClient::from_env()?;
    if !client.has_session_token() {
        eprintln!("Set FOLO_SESSION_TOKEN to query your account");
    }

    println!("Unread counts:");
    let args = FoloTool::UnreadCount.validate_arguments(None).map_err(|e| {
        folo_sdk::FoloError::Config(e.to_string())
    })?;
    let outcome = client.forward(FoloTool::UnreadCount.route(), &args).await?;
    println!("{}", outcome.into_text()?);

    println!("\nSubscriptions (articles view):");
    let args = FoloTool::SubscriptionList
        .validate_arguments(Some(json!({"view": 0})))
        .map_err(|e| folo_sdk::FoloError::Config(e.to_string()))?;
    let outcome = client
        .forward(FoloTool::SubscriptionList.route(), &args)
        .await?;
    println!("{}", outcome.into_text()?);

    Ok(())
}
