use anyhow::Context;
use chrono::Utc;
use console::style;
use dialoguer::Confirm;

use client::api::ApiClient;
use client::config::ClientConfig;
use client::receipt::{self, ReceiptData};

pub async fn generate(client: &ApiClient, config: &ClientConfig) -> anyhow::Result<()> {
    let dashboard = client.dashboard().await?;
    let user = dashboard.user;

    if user.registered_events.is_empty() {
        println!("No registrations yet, nothing to certify.");
        return Ok(());
    }

    let rendered = receipt::render(
        &ReceiptData {
            participant: &user,
            registrations: &user.registered_events,
            events: &dashboard.events,
            team: None,
        },
        Utc::now(),
    )?;
    let path = rendered
        .save(&config.download.dir)
        .context("Failed to save certificate")?;

    println!(
        "{} {}",
        style("Certificate saved:").green().bold(),
        path.display()
    );

    let open_now = Confirm::new()
        .with_prompt("Open it now?")
        .default(true)
        .interact()?;
    if open_now {
        open::that(&path).context("Failed to open the certificate")?;
    }
    Ok(())
}
