// simplelogin-cli/src/output.rs
use crate::commands::InputError;
use serde::Serialize;
use simplelogin_client::{
    Alias, AliasOptions, Error, Mailbox, ResolveError, SuffixOption, UserInfo,
};
use std::fmt;
use std::io::IsTerminal;

/// Output format option
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Auto-detect based on TTY
    Auto,
    /// Force JSON output
    Json,
    /// Force human-readable output
    Human,
}

impl OutputFormat {
    /// Collapse `Auto` into a concrete format
    pub fn resolve(self) -> Self {
        match self {
            Self::Auto if std::io::stdout().is_terminal() => Self::Human,
            Self::Auto => Self::Json,
            other => other,
        }
    }
}

/// Types that can be rendered for a person as well as serialized
pub trait Formattable: Serialize {
    fn to_human(&self) -> String;
}

/// Format output based on the specified format
pub fn format_output<T: Formattable>(data: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format.resolve() {
        OutputFormat::Human => Ok(data.to_human()),
        _ => Ok(serde_json::to_string(&Response::ok(data))?),
    }
}

/// Print a successful result to stdout
pub fn emit<T: Formattable>(data: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", format_output(data, format)?);
    Ok(())
}

/// Standard JSON response envelope
#[derive(Debug, Serialize)]
pub struct Response<T> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorResponse>,
}

impl<T> Response<T> {
    pub fn ok(result: T) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(error: ErrorResponse) -> Response<()> {
        Response::<()> {
            ok: false,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    type_: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

impl ErrorResponse {
    pub fn from_error(err: &anyhow::Error) -> Self {
        let api = api_error(err);
        let type_ = if is_validation(err) {
            "validation_failed"
        } else {
            match api {
                Some(Error::Api { .. }) => "api_error",
                Some(Error::Transport(_)) => "transport_error",
                Some(Error::Decode(_)) => "decode_error",
                Some(Error::NoMailboxes) => "not_found",
                Some(Error::DeadlineExceeded(_)) => "deadline_exceeded",
                _ => "error",
            }
        };

        Self {
            type_,
            message: format!("{:#}", err),
            status: api.and_then(Error::status),
        }
    }
}

fn api_error(err: &anyhow::Error) -> Option<&Error> {
    err.downcast_ref::<Error>().or_else(|| match err.downcast_ref::<ResolveError>() {
        Some(ResolveError::Api(e)) => Some(e),
        _ => None,
    })
}

fn is_validation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<InputError>().is_some()
        || err
            .downcast_ref::<ResolveError>()
            .is_some_and(ResolveError::is_validation)
        || err.downcast_ref::<Error>().is_some_and(Error::is_validation)
}

/// Exit codes for the calling shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
    InvalidInput = 2,
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::InvalidInput => write!(f, "invalid_input"),
        }
    }
}

impl ExitCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }

    pub fn for_error(err: &anyhow::Error) -> Self {
        if is_validation(err) {
            Self::InvalidInput
        } else {
            Self::Failure
        }
    }
}

/// Print a failure to stderr in the requested format
pub fn report_error(err: &anyhow::Error, format: OutputFormat) {
    match format.resolve() {
        OutputFormat::Human => print_error(&format!("{:#}", err)),
        _ => {
            let resp = Response::<()>::error(ErrorResponse::from_error(err));
            match serde_json::to_string(&resp) {
                Ok(line) => eprintln!("{}", line),
                Err(_) => eprintln!("{:#}", err),
            }
        }
    }
}

/// Print a styled success message
pub fn print_success(message: &str) {
    let term = console::Term::stdout();
    let _ = term.write_str(&format!("{} {}\n", console::style("✓").green(), message));
}

/// Print a styled error message
pub fn print_error(message: &str) {
    let term = console::Term::stderr();
    let _ = term.write_str(&format!("{} {}\n", console::style("Error:").red(), message));
}

/// "public"/"custom" plus a premium marker, as shown in suffix lists
pub fn suffix_label(s: &SuffixOption) -> String {
    let kind = if s.is_custom { "custom" } else { "public" };
    let premium = if s.is_premium { " (premium)" } else { "" };
    format!("{} [{}]{}", s.suffix, kind, premium)
}

impl Formattable for UserInfo {
    fn to_human(&self) -> String {
        format!("{} ({}) premium={}", self.name, self.email, self.is_premium)
    }
}

impl Formattable for AliasOptions {
    fn to_human(&self) -> String {
        let mut out = format!(
            "can_create: {}\nprefix_suggestion: {}\nsuffixes:",
            self.can_create, self.prefix_suggestion
        );
        for s in &self.suffixes {
            out.push_str(&format!("\n  - {}", suffix_label(s)));
        }
        out
    }
}

impl Formattable for Alias {
    fn to_human(&self) -> String {
        self.email.clone()
    }
}

impl Formattable for Vec<Alias> {
    fn to_human(&self) -> String {
        if self.is_empty() {
            return "No aliases on this page".to_string();
        }
        self.iter()
            .map(|a| {
                let created = a
                    .created_at()
                    .map(|t| t.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                let state = if a.enabled { "enabled" } else { "disabled" };
                let mut line = format!("{:>8}  {}  {}  {}", a.id, a.email, state, created);
                if let Some(note) = a.note.as_deref().filter(|n| !n.is_empty()) {
                    line.push_str(&format!("  # {}", note));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Mailboxes plus the one alias creation would pick by default
#[derive(Debug, Serialize)]
pub struct MailboxList {
    pub mailboxes: Vec<Mailbox>,
    pub default_id: Option<u64>,
}

impl Formattable for MailboxList {
    fn to_human(&self) -> String {
        if self.mailboxes.is_empty() {
            return "No mailboxes found in account".to_string();
        }
        self.mailboxes
            .iter()
            .map(|m| {
                let marker = if Some(m.id) == self.default_id { "*" } else { " " };
                let verified = if m.verified { "verified" } else { "unverified" };
                format!("{} {:>6}  {}  {}", marker, m.id, m.email, verified)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Outcome of a delete command
#[derive(Debug, Serialize)]
pub struct Deletion {
    pub target: String,
    pub deleted_id: Option<u64>,
}

impl Formattable for Deletion {
    fn to_human(&self) -> String {
        match self.deleted_id {
            Some(_) => format!("Alias deleted: {}", self.target),
            None => format!("No alias found for {}; nothing deleted", self.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserInfo {
        UserInfo {
            name: "John".to_string(),
            email: "john@example.com".to_string(),
            is_premium: true,
            in_trial: false,
            max_alias_free_plan: 10,
            profile_picture_url: None,
        }
    }

    #[test]
    fn test_format_output_json() {
        let result = format_output(&user(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["result"]["email"], "john@example.com");
    }

    #[test]
    fn test_format_output_human() {
        let result = format_output(&user(), OutputFormat::Human).unwrap();
        assert_eq!(result, "John (john@example.com) premium=true");
    }

    #[test]
    fn test_options_human() {
        let options = AliasOptions {
            can_create: true,
            prefix_suggestion: "shop".to_string(),
            suffixes: vec![SuffixOption {
                signed_suffix: "sig".to_string(),
                suffix: ".yeah@sl.lan".to_string(),
                is_custom: true,
                is_premium: true,
            }],
        };
        assert_eq!(
            options.to_human(),
            "can_create: true\nprefix_suggestion: shop\nsuffixes:\n  - .yeah@sl.lan [custom] (premium)"
        );
    }

    #[test]
    fn test_deletion_human() {
        let gone = Deletion {
            target: "t@sl".to_string(),
            deleted_id: None,
        };
        assert!(gone.to_human().contains("nothing deleted"));
    }

    #[test]
    fn test_exit_codes() {
        let err = anyhow::Error::new(ResolveError::InvalidSelection("9".to_string()));
        assert_eq!(ExitCode::for_error(&err), ExitCode::InvalidInput);

        let err = anyhow::Error::new(ResolveError::NoSuffixes);
        assert_eq!(ExitCode::for_error(&err), ExitCode::Failure);

        let err = anyhow::Error::new(InputError::MissingApiKey);
        assert_eq!(ExitCode::for_error(&err).code(), 2);

        let err = anyhow::Error::new(Error::Api {
            status: 400,
            message: "bad input".to_string(),
        });
        assert_eq!(ExitCode::for_error(&err), ExitCode::Failure);
    }

    #[test]
    fn test_error_response_classification() {
        let err = anyhow::Error::new(ResolveError::Api(Error::Api {
            status: 401,
            message: "Wrong api key".to_string(),
        }));
        let value = serde_json::to_value(Response::<()>::error(ErrorResponse::from_error(&err))).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["error"]["type"], "api_error");
        assert_eq!(value["error"]["status"], 401);
        assert_eq!(value["error"]["message"], "HTTP 401: Wrong api key");
    }
}
