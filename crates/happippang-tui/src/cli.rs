//! Non-interactive commands run instead of the TUI.

use std::io::{self, Write};

use anyhow::{anyhow, bail, Result};

use happippang_core::auth::flows;
use happippang_core::{Config, Services};

/// `--login`: prompt for credentials and store a new session
pub async fn login(services: &Services, config: &mut Config) -> Result<()> {
    println!("\n=== Happippang Login ===\n");

    let username = prompt_username(config.last_username.as_deref())?;
    let password = rpassword::prompt_password("Password: ")?;

    println!("\nAuthenticating...");
    flows::login(services.client(), &username, &password)
        .await
        .map_err(|e| anyhow!(e.user_message()))?;

    config.last_username = Some(username.trim().to_string());
    config.save()?;

    println!("Login successful!\n");
    Ok(())
}

fn prompt_username(last: Option<&str>) -> Result<String> {
    match last {
        Some(last) => print!("Username [{}]: ", last),
        None => print!("Username: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    Ok(match last {
        Some(last) if input.is_empty() => last.to_string(),
        _ => input.to_string(),
    })
}

/// `--logout`: revoke and forget the stored session
pub async fn logout(services: &Services) -> Result<()> {
    match flows::logout(services.client()).await {
        Ok(()) => println!("Logged out."),
        Err(e) => println!("Logged out locally (server said: {}).", e.user_message()),
    }
    Ok(())
}

/// `--whoami`: resolve the current user the way the app does on start
pub async fn whoami(services: &Services) -> Result<()> {
    let auth = services.auth_scope();
    let state = auth.initialize(services.client()).await;
    match state.user {
        Some(user) => {
            println!("{} ({:?})", user.display_name(), user.role);
            Ok(())
        }
        None => bail!("Not logged in. Run with --login first."),
    }
}
