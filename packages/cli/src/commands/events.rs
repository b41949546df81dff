use anyhow::bail;
use console::style;
use dialoguer::Confirm;

use client::api::ApiClient;
use common::constants::MAX_EVENTS_PER_USER;
use common::event::{Event, EventStatus, EventType};

fn status_label(event: &Event) -> console::StyledObject<&'static str> {
    match event.status() {
        EventStatus::Open => style("open").green(),
        EventStatus::Full => style("full").red(),
        EventStatus::Inactive => style("inactive").dim(),
    }
}

pub async fn list(client: &ApiClient) -> anyhow::Result<()> {
    let events = client.events().await?;
    if events.is_empty() {
        println!("No events published yet.");
        return Ok(());
    }

    for event in &events {
        let badge = event.event_type.as_str().to_uppercase();
        println!(
            "{}  {} [{}] ({})",
            style(&event.id).dim(),
            style(&event.name).bold(),
            badge,
            status_label(event)
        );
        if !event.description.is_empty() {
            println!("    {}", event.description);
        }
        let mut details = Vec::new();
        if let Some(date) = &event.date {
            details.push(date.format("%d/%m/%Y").to_string());
        }
        if let Some(time) = &event.time {
            details.push(time.clone());
        }
        if let Some(venue) = &event.venue {
            details.push(venue.clone());
        }
        details.push(format!(
            "{}/{} registered",
            event.current_participants, event.max_participants
        ));
        if event.event_type == EventType::Team {
            let (min, max) = event.team_size_bounds();
            details.push(format!("teams of {min}-{max}"));
        }
        println!("    {}", details.join(" | "));
    }
    Ok(())
}

pub async fn register_solo(client: &ApiClient, event_id: &str) -> anyhow::Result<()> {
    let event = client.event(event_id).await?;
    if event.event_type != EventType::Solo {
        bail!(
            "{} is a team event, create a team with `technovaganza team {}`",
            event.name,
            event_id
        );
    }

    let user = client.dashboard().await?.user;
    if user.is_registered_for(event_id) {
        bail!("You are already registered for {}", event.name);
    }
    if user.at_event_limit() {
        bail!("You can register for maximum {MAX_EVENTS_PER_USER} events");
    }
    if event.is_full() {
        bail!("{} is full", event.name);
    }

    let confirmed = Confirm::new()
        .with_prompt(format!("Register for {}?", event.name))
        .default(true)
        .interact()?;
    if !confirmed {
        return Ok(());
    }

    let resp = client.register_solo(event_id).await?;
    println!(
        "{} {}",
        style("Registered!").green().bold(),
        resp.message.unwrap_or_default()
    );
    Ok(())
}
