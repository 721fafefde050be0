// simplelogin-client/src/resolve.rs
//! Turning what the user typed into what `POST /api/v3/alias/custom/new` needs:
//! a signed suffix taken from the options endpoint and at least one mailbox id.

use log::debug;
use simplelogin_api::{
    Alias, AliasOptions, CreateCustomAliasRequest, Error as ApiError, HttpClient,
    SimpleLoginClient, SuffixOption,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("suffix {0:?} not found in available options")]
    SuffixNotFound(String),

    #[error("no suffixes available")]
    NoSuffixes,

    #[error("invalid selection {0:?}")]
    InvalidSelection(String),

    #[error("failed to read selection: {0}")]
    Prompt(#[from] std::io::Error),
}

impl ResolveError {
    /// True when the input was rejected locally rather than by the server
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Api(e) => e.is_validation(),
            Self::Prompt(_) | Self::NoSuffixes => false,
            Self::SuffixNotFound(_) | Self::InvalidSelection(_) => true,
        }
    }
}

/// How the suffix of a custom alias is chosen
#[derive(Debug, Clone, PartialEq)]
pub enum SuffixChoice {
    /// Used verbatim, never checked against the options endpoint
    Signed(String),
    /// Looked up by exact match in the current options
    Plain(String),
    /// Picked through a [`SuffixSelector`]
    Interactive,
}

impl SuffixChoice {
    /// Blank values count as absent; a signed suffix wins over a plain one
    pub fn from_flags(signed: Option<&str>, plain: Option<&str>) -> Self {
        if let Some(signed) = signed.map(str::trim).filter(|s| !s.is_empty()) {
            return Self::Signed(signed.to_string());
        }
        match plain.filter(|p| !p.trim().is_empty()) {
            Some(plain) => Self::Plain(plain.to_string()),
            None => Self::Interactive,
        }
    }
}

/// External selection of a suffix, typically a terminal prompt
pub trait SuffixSelector {
    /// `options` are sorted ascending by suffix. Returns the raw answer,
    /// expected to be a 1-based index.
    fn select(&mut self, options: &[SuffixOption]) -> std::io::Result<String>;
}

/// Everything needed to create one custom alias
#[derive(Debug, Clone)]
pub struct CustomAliasPlan {
    pub hostname: Option<String>,
    pub prefix: String,
    pub suffix: SuffixChoice,
    /// Empty means "use the account's default mailbox"
    pub mailbox_ids: Vec<u64>,
    pub note: Option<String>,
    pub name: Option<String>,
}

/// Suffixes in display order
pub fn sorted_suffixes(options: &AliasOptions) -> Vec<SuffixOption> {
    let mut suffixes = options.suffixes.clone();
    suffixes.sort_by(|a, b| a.suffix.cmp(&b.suffix));
    suffixes
}

/// Exact, case-sensitive match on the plain suffix
pub fn find_signed_suffix<'a>(options: &'a AliasOptions, plain: &str) -> Option<&'a str> {
    options
        .suffixes
        .iter()
        .find(|s| s.suffix == plain)
        .map(|s| s.signed_suffix.as_str())
}

/// Parse a 1-based answer into a 0-based index below `len`
pub fn parse_selection(answer: &str, len: usize) -> Result<usize, ResolveError> {
    let answer = answer.trim();
    match answer.parse::<usize>() {
        Ok(n) if n >= 1 && n <= len => Ok(n - 1),
        _ => Err(ResolveError::InvalidSelection(answer.to_string())),
    }
}

pub async fn resolve_signed_suffix<C, S>(
    client: &SimpleLoginClient<C>,
    hostname: Option<&str>,
    choice: &SuffixChoice,
    selector: &mut S,
) -> Result<String, ResolveError>
where
    C: HttpClient,
    S: SuffixSelector + ?Sized,
{
    match choice {
        SuffixChoice::Signed(signed) => Ok(signed.clone()),
        SuffixChoice::Plain(plain) => {
            let options = client.alias_options(hostname).await?;
            find_signed_suffix(&options, plain)
                .map(str::to_string)
                .ok_or_else(|| ResolveError::SuffixNotFound(plain.clone()))
        }
        SuffixChoice::Interactive => {
            let options = client.alias_options(hostname).await?;
            if options.suffixes.is_empty() {
                return Err(ResolveError::NoSuffixes);
            }

            let suffixes = sorted_suffixes(&options);
            let answer = selector.select(&suffixes)?;
            let index = parse_selection(&answer, suffixes.len())?;
            debug!("selected suffix {}", suffixes[index].suffix);
            Ok(suffixes[index].signed_suffix.clone())
        }
    }
}

/// Keep explicit ids; otherwise fall back to the default mailbox
pub async fn resolve_mailbox_ids<C: HttpClient>(
    client: &SimpleLoginClient<C>,
    mailbox_ids: Vec<u64>,
) -> Result<Vec<u64>, ResolveError> {
    if !mailbox_ids.is_empty() {
        return Ok(mailbox_ids);
    }
    let id = client.default_mailbox_id().await?;
    debug!("using default mailbox {}", id);
    Ok(vec![id])
}

/// Resolve suffix, then mailboxes, then create. Stops at the first failure.
pub async fn create_custom_alias<C, S>(
    client: &SimpleLoginClient<C>,
    plan: CustomAliasPlan,
    selector: &mut S,
) -> Result<Alias, ResolveError>
where
    C: HttpClient,
    S: SuffixSelector + ?Sized,
{
    let hostname = plan.hostname.as_deref();

    let signed_suffix = resolve_signed_suffix(client, hostname, &plan.suffix, selector).await?;
    let mailbox_ids = resolve_mailbox_ids(client, plan.mailbox_ids).await?;

    let body = CreateCustomAliasRequest {
        alias_prefix: plan.prefix,
        signed_suffix,
        mailbox_ids,
        note: plan.note.filter(|n| !n.trim().is_empty()),
        name: plan.name.filter(|n| !n.trim().is_empty()),
    };

    Ok(client.create_custom_alias(hostname, &body).await?)
}
