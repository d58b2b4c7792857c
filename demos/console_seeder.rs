//! End-to-end seeder demo with a console publisher
//!
//! Run with: cargo run --example console_seeder
//!
//! Registers a default account with two seeder identities, posts an update,
//! and runs the delivery poller on a short cadence until every task has been
//! "posted" to stdout. Delays are compressed to a few seconds so the demo
//! finishes quickly; a real deployment keeps the 60s..30min window.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use seeder::{
    Credential, DeliveryConfig, FanoutConfig, PublishError, Publisher, RegistryConfig,
    SeederService, ServiceConfig,
};

/// Publisher that prints instead of talking to a real network
struct ConsolePublisher;

#[async_trait]
impl Publisher for ConsolePublisher {
    async fn post(&self, text: &str, credential: &Credential) -> Result<(), PublishError> {
        println!("[post] token={} text={:?}", credential.token, text);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("seeder=debug".parse()?),
        )
        .init();

    let config = ServiceConfig {
        registry: RegistryConfig::default().default_network_id("10001"),
        fanout: FanoutConfig::default()
            .delay_window(Duration::from_secs(1), Duration::from_secs(5)),
        delivery: DeliveryConfig::default()
            .poll_interval(Duration::from_secs(1))
            .post_template("[seeded] {text}"),
    };
    let service = SeederService::with_config(config, Arc::new(ConsolePublisher));

    let account = service.register_account(Some("10001".into())).await;
    println!("Registered account {}", account.id);

    for name in ["first_seeder", "second_seeder"] {
        let seeder = service
            .authorize_seeder(name, vec![Credential::new(format!("tok-{name}"), "secret")], None)
            .await?;
        println!("Authorized {} as {}", name, seeder.id);
    }

    let update = service.post_update(account.id, "Hello from Seeder!").await?;
    println!("Posted {} with {} pending tasks", update.id, service.tasks().len().await);

    service.spawn_poller();

    // Wait until both tasks have gone out
    loop {
        tokio::time::sleep(Duration::from_millis(500)).await;
        let stats = service.delivery_stats();
        if stats.delivered >= 2 {
            println!(
                "Done: {} delivered over {} passes",
                stats.delivered, stats.passes
            );
            break;
        }
    }

    Ok(())
}
