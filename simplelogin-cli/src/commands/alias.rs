// simplelogin-cli/src/commands/alias.rs
use super::{authenticated_client, non_blank, InputError, COMMAND_TIMEOUT, CUSTOM_TIMEOUT};
use crate::output::{emit, Deletion, OutputFormat};
use crate::prompt::TerminalSelector;
use anyhow::Result;
use simplelogin_client::{
    create_custom_alias, sorted_suffixes, with_deadline, CustomAliasPlan, RandomMode,
    ResolveError, Settings, SuffixChoice, FIRST_PAGE,
};

#[derive(clap::Subcommand, Clone, Debug)]
pub enum AliasCommands {
    /// List available alias suffix options
    Options {
        /// Website hostname to tailor suggestions
        #[arg(long)]
        hostname: Option<String>,
    },
    /// Create a random alias
    Random {
        /// Website hostname to attach to the alias creation request
        #[arg(long)]
        hostname: Option<String>,
        /// Random alias mode: uuid or word (defaults to the account setting)
        #[arg(long)]
        mode: Option<RandomMode>,
        /// Note for the alias
        #[arg(long)]
        note: Option<String>,
    },
    /// Create a custom alias from prefix + suffix
    Custom {
        /// Alias prefix
        #[arg(long)]
        prefix: String,
        /// Signed suffix token (from options), used as-is
        #[arg(long)]
        signed_suffix: Option<String>,
        /// Plain suffix to look up in the current options
        #[arg(long)]
        suffix: Option<String>,
        /// Mailbox IDs owning the alias (comma-separated) [default: default mailbox]
        #[arg(long, value_delimiter = ',')]
        mailbox_ids: Vec<u64>,
        /// Note for the alias
        #[arg(long)]
        note: Option<String>,
        /// Display name for the alias
        #[arg(long)]
        name: Option<String>,
        /// Website hostname to attach to the alias creation request
        #[arg(long)]
        hostname: Option<String>,
    },
    /// Delete an alias by email or id
    Delete {
        /// Email of the alias to delete
        #[arg(long, required_unless_present = "id", conflicts_with = "id")]
        email: Option<String>,
        /// Numeric alias ID
        #[arg(long)]
        id: Option<u64>,
        /// Website hostname to attach to the request
        #[arg(long)]
        hostname: Option<String>,
    },
    /// List one page of aliases
    Aliases {
        /// Page index
        #[arg(long, default_value_t = FIRST_PAGE)]
        page: u32,
        /// Website hostname filter
        #[arg(long)]
        hostname: Option<String>,
    },
}

pub async fn handle_alias(
    settings: &Settings,
    format: OutputFormat,
    cmd: AliasCommands,
) -> Result<()> {
    let client = authenticated_client(settings)?;

    match cmd {
        AliasCommands::Options { hostname } => {
            let mut options =
                with_deadline(COMMAND_TIMEOUT, client.alias_options(hostname.as_deref())).await?;
            options.suffixes = sorted_suffixes(&options);
            emit(&options, format)
        }
        AliasCommands::Random {
            hostname,
            mode,
            note,
        } => {
            let note = non_blank(note);
            let alias = with_deadline(
                COMMAND_TIMEOUT,
                client.create_random_alias(hostname.as_deref(), mode, note.as_deref()),
            )
            .await?;
            emit(&alias, format)
        }
        AliasCommands::Custom {
            prefix,
            signed_suffix,
            suffix,
            mailbox_ids,
            note,
            name,
            hostname,
        } => {
            if prefix.trim().is_empty() {
                return Err(InputError::EmptyPrefix.into());
            }
            let plan = CustomAliasPlan {
                hostname: non_blank(hostname),
                prefix,
                suffix: SuffixChoice::from_flags(signed_suffix.as_deref(), suffix.as_deref()),
                mailbox_ids,
                note: non_blank(note),
                name: non_blank(name),
            };
            let mut selector = TerminalSelector;
            let alias = with_deadline::<_, ResolveError, _>(
                CUSTOM_TIMEOUT,
                create_custom_alias(&client, plan, &mut selector),
            )
            .await?;
            emit(&alias, format)
        }
        AliasCommands::Delete {
            email,
            id,
            hostname,
        } => {
            let hostname = hostname.as_deref();
            let deletion = match (non_blank(email), id) {
                (Some(email), _) => {
                    let deleted_id = with_deadline(
                        COMMAND_TIMEOUT,
                        client.delete_alias_by_email(&email, hostname),
                    )
                    .await?;
                    Deletion {
                        target: email,
                        deleted_id,
                    }
                }
                (None, Some(id)) => {
                    with_deadline(COMMAND_TIMEOUT, client.delete_alias(id, hostname)).await?;
                    Deletion {
                        target: format!("#{}", id),
                        deleted_id: Some(id),
                    }
                }
                (None, None) => return Err(InputError::MissingDeleteTarget.into()),
            };
            emit(&deletion, format)
        }
        AliasCommands::Aliases { page, hostname } => {
            let aliases = with_deadline(
                COMMAND_TIMEOUT,
                client.list_aliases(page, hostname.as_deref()),
            )
            .await?;
            emit(&aliases, format)
        }
    }
}
