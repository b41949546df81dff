use anyhow::Context;
use console::style;
use dialoguer::{Input, Password, Select};

use client::api::ApiClient;
use client::session::Role;
use common::constants::{BATCHES, BRANCHES, COLLEGES};
use common::signup::Signup;

fn select_from(prompt: &str, items: &[&str]) -> anyhow::Result<String> {
    let index = Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?;
    Ok(items[index].to_string())
}

pub async fn register(client: &ApiClient) -> anyhow::Result<()> {
    let name: String = Input::new().with_prompt("Full name").interact_text()?;
    let rollno: String = Input::new().with_prompt("Roll number").interact_text()?;
    let mobile: String = Input::new().with_prompt("Mobile number").interact_text()?;
    let batch = select_from("Batch", BATCHES)?;
    let branch = select_from("Branch", BRANCHES)?;
    let college = select_from("College", COLLEGES)?;
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;
    let confirm = Password::new().with_prompt("Confirm password").interact()?;

    let signup = Signup {
        name,
        rollno,
        mobile,
        batch,
        branch,
        college,
        email,
        password,
    };
    signup.validate(&confirm)?;

    let resp = client.register(&signup).await?;
    let pid = resp.user.map(|u| u.pid).unwrap_or_default();
    println!(
        "{} Your participant ID is {}. Keep it handy, team leaders add members by PID.",
        style("Account created.").green().bold(),
        style(&pid).cyan().bold()
    );
    Ok(())
}

pub async fn login(client: &ApiClient) -> anyhow::Result<()> {
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;

    let resp = client.login(&email, &password).await?;
    match resp.user {
        Some(user) => println!(
            "{} Logged in as {} ({}).",
            style("Welcome back!").green().bold(),
            user.name,
            user.pid
        ),
        None => println!("{}", style("Logged in.").green().bold()),
    }
    Ok(())
}

pub fn logout(client: &ApiClient) -> anyhow::Result<()> {
    client
        .session()
        .clear_all()
        .context("Failed to clear sessions")?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(client: &ApiClient) -> anyhow::Result<()> {
    let session = client.session();
    let mut signed_in = false;

    if let Some(profile) = session.cached_profile(Role::Participant) {
        let name = profile["name"].as_str().unwrap_or("?");
        let pid = profile["pid"].as_str().unwrap_or("?");
        println!("Participant: {name} ({pid})");
        signed_in = true;
    } else if session.token(Role::Participant).is_some() {
        println!("Participant: signed in");
        signed_in = true;
    }

    if session.token(Role::Admin).is_some() {
        let username = session
            .cached_profile(Role::Admin)
            .and_then(|p| p["username"].as_str().map(String::from))
            .unwrap_or_else(|| "administrator".to_string());
        println!("Admin: {username}");
        signed_in = true;
    }

    if !signed_in {
        println!("Not logged in.");
    }
    Ok(())
}
