// simplelogin-cli/src/commands/account.rs
use super::{authenticated_client, COMMAND_TIMEOUT};
use crate::output::{emit, MailboxList, OutputFormat};
use anyhow::Result;
use simplelogin_client::{select_default_mailbox, with_deadline, Settings};

pub async fn handle_whoami(settings: &Settings, format: OutputFormat) -> Result<()> {
    let client = authenticated_client(settings)?;
    let info = with_deadline(COMMAND_TIMEOUT, client.user_info()).await?;
    emit(&info, format)
}

pub async fn handle_mailboxes(settings: &Settings, format: OutputFormat) -> Result<()> {
    let client = authenticated_client(settings)?;
    let mailboxes = with_deadline(COMMAND_TIMEOUT, client.mailboxes()).await?;
    let default_id = select_default_mailbox(&mailboxes);
    emit(
        &MailboxList {
            mailboxes,
            default_id,
        },
        format,
    )
}
