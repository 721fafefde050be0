// simplelogin-cli/src/commands/setup.rs
use super::{non_blank, InputError};
use crate::output::print_success;
use anyhow::Result;
use dialoguer::Password;
use simplelogin_client::{Config, Settings};

/// Store the API key (prompting when not given) and base URL
pub fn run_set_key(
    api_key: Option<String>,
    base_url: Option<String>,
    current: &Settings,
) -> Result<()> {
    let key = match non_blank(api_key) {
        Some(key) => key,
        None => Password::new()
            .with_prompt("Enter your SimpleLogin API key")
            .interact()?,
    };

    if key.trim().is_empty() {
        return Err(InputError::EmptyApiKey.into());
    }

    let mut config = Config::load()?;
    config.api_key = Some(key.trim().to_string());
    config.base_url = Some(non_blank(base_url).unwrap_or_else(|| current.base_url.clone()));

    let path = config.save()?;
    print_success(&format!("API key saved to {}", path.display()));
    Ok(())
}
