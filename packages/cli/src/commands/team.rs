use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use console::style;
use dialoguer::{Confirm, Input, Select};

use client::api::ApiClient;
use client::team::{MemberValidator, SlotId, TeamSession};
use client::team::TeamBuilder;
use common::constants::MAX_EVENTS_PER_USER;
use common::event::EventType;

pub async fn create(client: &Arc<ApiClient>, event_id: &str) -> anyhow::Result<()> {
    let event = client.event(event_id).await?;
    if event.event_type != EventType::Team {
        bail!(
            "{} is a solo event, register with `technovaganza solo {}`",
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

    let (min, max) = event.team_size_bounds();
    println!(
        "Creating a team for {} ({min}-{max} members). You are the leader; add the others by PID.",
        style(&event.name).bold()
    );

    let builder = TeamBuilder::new(event, &user.pid)?;
    let session = TeamSession::new(
        builder,
        Arc::clone(client) as Arc<dyn MemberValidator>,
    );

    loop {
        print_roster(&session).await;

        let action = Select::new()
            .with_prompt("Action")
            .items(&[
                "Set team name",
                "Edit a member",
                "Add a member slot",
                "Remove a member slot",
                "Submit team",
                "Quit without submitting",
            ])
            .default(0)
            .interact()?;

        match action {
            0 => {
                let name: String = Input::new().with_prompt("Team name").interact_text()?;
                session.set_team_name(&name).await;
            }
            1 => {
                if let Some(slot) = pick_slot(&session, "Which member?").await? {
                    let current = {
                        let builder = session.builder().await;
                        builder
                            .slots()
                            .iter()
                            .find(|s| s.id() == slot)
                            .map(|s| s.text().to_string())
                            .unwrap_or_default()
                    };
                    let text: String = Input::new()
                        .with_prompt("Member PID")
                        .with_initial_text(current)
                        .allow_empty(true)
                        .interact_text()?;
                    report(session.edit_slot(slot, &text).await);
                    report(session.blur_slot(slot).await);
                    session.settle().await;
                }
            }
            2 => match session.add_slot().await {
                Ok(_) => {}
                Err(e) => println!("{}", style(e).red()),
            },
            3 => {
                if let Some(slot) = pick_slot(&session, "Remove which member?").await? {
                    report(session.remove_slot(slot).await);
                }
            }
            4 => match session.submit(client.as_ref()).await {
                Ok(team) => {
                    println!("{}", style("Team created!").green().bold());
                    if let Some(team) = team {
                        println!("Team ID: {}", style(&team.tid).cyan().bold());
                        for member in &team.members {
                            println!("  {} ({})", member.name, member.pid);
                        }
                    }
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    session.reset().await;

                    let user = client.dashboard().await?.user;
                    println!(
                        "You are now registered for {} of {MAX_EVENTS_PER_USER} events.",
                        user.registered_events.len()
                    );
                    return Ok(());
                }
                Err(e) => println!("{}", style(e).red()),
            },
            _ => {
                let quit = Confirm::new()
                    .with_prompt("Discard this team?")
                    .default(false)
                    .interact()?;
                if quit {
                    session.reset().await;
                    return Ok(());
                }
            }
        }
    }
}

fn report<E: std::fmt::Display>(result: Result<(), E>) {
    if let Err(e) = result {
        println!("{}", style(e).red());
    }
}

async fn print_roster(session: &TeamSession) {
    let builder = session.builder().await;
    let name = builder.team_name().trim();
    println!();
    println!(
        "Team: {}",
        if name.is_empty() {
            style("(unnamed)").dim()
        } else {
            style(name).bold()
        }
    );
    println!("  Leader: {} (you)", builder.leader_pid());
    for (index, slot) in builder.slots().iter().enumerate() {
        let status = if session.is_validating(slot.id()) {
            style("validating...".to_string()).yellow()
        } else if let Some(profile) = slot.profile() {
            style(format!(
                "{} - {} ({}/{MAX_EVENTS_PER_USER} events)",
                profile.name, profile.branch, profile.events_count
            ))
            .green()
        } else if slot.is_empty() {
            style("(empty)".to_string()).dim()
        } else {
            style("not validated".to_string()).red()
        };
        println!("  Member {}: {} {}", index + 1, slot.text(), status);
    }
}

async fn pick_slot(session: &TeamSession, prompt: &str) -> anyhow::Result<Option<SlotId>> {
    let (ids, labels): (Vec<SlotId>, Vec<String>) = {
        let builder = session.builder().await;
        builder
            .slots()
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                let text = if slot.is_empty() { "(empty)" } else { slot.text() };
                (slot.id(), format!("Member {}: {}", index + 1, text))
            })
            .unzip()
    };
    if ids.is_empty() {
        return Ok(None);
    }
    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(Some(ids[index]))
}
