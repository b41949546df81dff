use console::style;

use client::api::ApiClient;
use common::constants::MAX_EVENTS_PER_USER;
use common::fee::calculate_amount;

pub async fn show(client: &ApiClient) -> anyhow::Result<()> {
    let dashboard = client.dashboard().await?;
    let user = dashboard.user;

    println!("{}", style(&user.name).bold());
    println!("PID: {}   Roll: {}", style(&user.pid).cyan(), user.rollno);
    println!("{} | {}", user.branch, user.batch);
    if let Some(college) = &user.college {
        println!("{college}");
    }

    let count = user.registered_events.len() as u32;
    println!();
    println!(
        "Events: {count}/{MAX_EVENTS_PER_USER}   Fee: {}",
        style(format!("Rs. {}", calculate_amount(count))).green().bold()
    );

    if user.registered_events.is_empty() {
        println!("\nNo registrations yet. Browse with `technovaganza events`.");
        return Ok(());
    }

    println!();
    for (index, reg) in user.registered_events.iter().enumerate() {
        let name = dashboard
            .events
            .iter()
            .find(|e| e.id == reg.event_id.id())
            .map(|e| e.name.as_str())
            .unwrap_or("Event");
        let badge = reg.event_type.as_str().to_uppercase();
        print!("{}. {} [{}]", index + 1, style(name).bold(), badge);
        if let Some(team_id) = &reg.team_id {
            print!("  team {team_id}");
        }
        println!(
            "  registered {}",
            reg.registration_date.format("%d/%m/%Y")
        );
    }
    Ok(())
}
