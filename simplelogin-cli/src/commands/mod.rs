// simplelogin-cli/src/commands/mod.rs
pub mod account;
pub mod alias;
pub mod setup;

pub use account::{handle_mailboxes, handle_whoami};
pub use alias::{handle_alias, AliasCommands};
pub use setup::run_set_key;

use anyhow::Result;
use simplelogin_client::{connect, Client, Settings};
use std::time::Duration;
use thiserror::Error;

/// Time budget for a single-request command
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Custom alias creation may chain options, mailboxes and create
pub const CUSTOM_TIMEOUT: Duration = Duration::from_secs(45);

/// Input rejected before anything is sent
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Missing API key. Use set-key or --api-key or SIMPLELOGIN_API_KEY.")]
    MissingApiKey,

    #[error("API key cannot be empty")]
    EmptyApiKey,

    #[error("--email or --id is required")]
    MissingDeleteTarget,

    #[error("--prefix must not be empty")]
    EmptyPrefix,
}

/// An authenticated client, or an input error when no key is configured
pub fn authenticated_client(settings: &Settings) -> Result<Client> {
    if !settings.has_api_key() {
        return Err(InputError::MissingApiKey.into());
    }
    connect(settings)
}

/// Blank command-line strings mean "not given"
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_messages() {
        assert_eq!(
            InputError::MissingDeleteTarget.to_string(),
            "--email or --id is required"
        );
        let err: anyhow::Error = InputError::EmptyPrefix.into();
        assert!(err.downcast_ref::<InputError>().is_some());
        assert_eq!(format!("{:#}", err), "--prefix must not be empty");
    }

    #[test]
    fn test_client_requires_api_key() {
        let settings = Settings {
            base_url: "https://app.simplelogin.io".to_string(),
            api_key: String::new(),
        };
        let err = authenticated_client(&settings).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<InputError>(),
            Some(InputError::MissingApiKey)
        ));
    }
}
