//! Account commands.

use anyhow::{Context as _, Result};
use dialoguer::Password;
use pasapas_auth::{Credentials, Registration};
use serde_json::json;

use super::{AuthArgs, AuthCommand};
use crate::context::Context;

/// Run the auth command.
pub async fn run(args: AuthArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AuthCommand::Register {
            email,
            role,
            password,
        } => {
            let password = password_or_prompt(password)?;
            let registration = Registration::new(Credentials::new(&email, &password), role);

            let mut sf = ctx.storefront()?;
            let landing = sf.register(&registration).await?;
            ctx.output.success(&format!("Account created for {}", email));
            ctx.output.kv("next", landing.path());
            if ctx.output.is_json() {
                ctx.output.json(&json!({ "next": landing.path() }));
            }
            Ok(())
        }
        AuthCommand::Login { email, password } => {
            let password = password_or_prompt(password)?;
            let mut sf = ctx.storefront()?;
            let landing = sf.login(&Credentials::new(&email, &password)).await?;
            ctx.output.success(&format!("Logged in as {}", email));
            ctx.output.kv("next", landing.path());
            if ctx.output.is_json() {
                ctx.output.json(&json!({ "next": landing.path() }));
            }
            Ok(())
        }
        AuthCommand::Logout => {
            let mut sf = ctx.storefront()?;
            sf.logout()?;
            ctx.output.success("Logged out");
            Ok(())
        }
        AuthCommand::Whoami => {
            let sf = ctx.storefront()?;
            match sf.session().user() {
                Some(user) => {
                    if ctx.output.is_json() {
                        ctx.output.json(&json!({ "id": user.id, "role": user.role.as_str() }));
                    }
                    ctx.output.kv("id", user.id.as_str());
                    ctx.output.kv("role", user.role.as_str());
                }
                None => ctx.output.info("Not logged in"),
            }
            Ok(())
        }
    }
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .context("Failed to read the password"),
    }
}
