use console::style;
use dialoguer::{Confirm, Input, Password, Select};

use client::api::ApiClient;
use client::api::ExportDownload;
use client::api::models::CreateEventRequest;
use client::config::ClientConfig;
use client::export::save_export;
use common::event::EventType;

pub async fn login(client: &ApiClient) -> anyhow::Result<()> {
    let username: String = Input::new().with_prompt("Username").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;

    client.admin_login(&username, &password).await?;
    println!("{}", style("Admin session started.").green().bold());
    Ok(())
}

pub async fn create_event(client: &ApiClient) -> anyhow::Result<()> {
    let kind = Select::new()
        .with_prompt("Event type")
        .items(&["solo", "team"])
        .default(0)
        .interact()?;

    let name: String = Input::new().with_prompt("Name").interact_text()?;
    let description: String = Input::new().with_prompt("Description").interact_text()?;
    let date: String = Input::new()
        .with_prompt("Date (YYYY-MM-DD)")
        .interact_text()?;
    let time: String = Input::new().with_prompt("Time (e.g. 10:00 AM)").interact_text()?;
    let venue: String = Input::new().with_prompt("Venue").interact_text()?;
    let amount: u32 = Input::new()
        .with_prompt("Event fee (0 for none)")
        .default(0)
        .interact_text()?;
    let max_participants: u32 = Input::new()
        .with_prompt("Maximum participants")
        .interact_text()?;

    let request = if kind == 0 {
        CreateEventRequest::solo(name, description, date, time, venue, amount, max_participants)
    } else {
        let min_team_size: u32 = Input::new().with_prompt("Minimum team size").interact_text()?;
        let max_team_size: u32 = Input::new().with_prompt("Maximum team size").interact_text()?;
        CreateEventRequest::team(
            name,
            description,
            date,
            time,
            venue,
            amount,
            max_participants,
            min_team_size,
            max_team_size,
        )
    };

    let event = client.admin_create_event(&request).await?;
    match event {
        Some(event) => println!(
            "{} {} ({})",
            style("Event created:").green().bold(),
            event.name,
            event.id
        ),
        None => println!("{}", style("Event created.").green().bold()),
    }
    Ok(())
}

pub async fn list_events(client: &ApiClient) -> anyhow::Result<()> {
    let events = client.admin_events().await?;
    if events.is_empty() {
        println!("No events.");
        return Ok(());
    }
    for event in &events {
        let badge = event.event_type.as_str().to_uppercase();
        let mut line = format!(
            "{}  {} [{}] {}/{}",
            style(&event.id).dim(),
            style(&event.name).bold(),
            badge,
            event.current_participants,
            event.max_participants
        );
        if event.event_type == EventType::Team {
            let (min, max) = event.team_size_bounds();
            line.push_str(&format!("  teams of {min}-{max}"));
        }
        if !event.is_active {
            line.push_str(&format!("  {}", style("inactive").red()));
        }
        println!("{line}");
    }
    Ok(())
}

pub async fn delete_event(client: &ApiClient, event_id: &str) -> anyhow::Result<()> {
    let confirmed = Confirm::new()
        .with_prompt(format!(
            "{} Delete event {event_id} and all its registrations?",
            style("This cannot be undone.").red().bold()
        ))
        .default(false)
        .interact()?;
    if !confirmed {
        return Ok(());
    }
    client.admin_delete_event(event_id).await?;
    println!("Event deleted.");
    Ok(())
}

pub async fn statistics(client: &ApiClient, range: &str) -> anyhow::Result<()> {
    let stats = client.admin_statistics(range).await?;
    println!("Statistics ({range})");
    println!("  Total events:  {}", stats.total_events);
    println!("  Active events: {}", stats.active_events);
    println!("  Solo events:   {}", stats.solo_events);
    println!("  Team events:   {}", stats.team_events);
    println!("  Participants:  {}", stats.total_users);
    println!("  Teams:         {}", stats.total_teams);
    Ok(())
}

fn save(config: &ClientConfig, download: ExportDownload) -> anyhow::Result<()> {
    let path = save_export(&config.download.dir, &download.filename, &download.bytes)?;
    println!(
        "{} {}",
        style("Export saved:").green().bold(),
        path.display()
    );
    Ok(())
}

pub async fn export_event(
    client: &ApiClient,
    config: &ClientConfig,
    event_id: &str,
    college: Option<&str>,
) -> anyhow::Result<()> {
    save(config, client.export_event_participants(event_id, college).await?)
}

pub async fn export_all(
    client: &ApiClient,
    config: &ClientConfig,
    college: Option<&str>,
) -> anyhow::Result<()> {
    save(config, client.export_all_participants(college).await?)
}

pub async fn export_college(
    client: &ApiClient,
    config: &ClientConfig,
    name: &str,
) -> anyhow::Result<()> {
    save(config, client.export_by_college(name).await?)
}
