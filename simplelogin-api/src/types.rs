// simplelogin-api/src/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account details from `/api/user_info`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub in_trial: bool,
    #[serde(default)]
    pub max_alias_free_plan: u32,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

/// An email alias as returned by create and list calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alias {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub creation_timestamp: i64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub nb_block: u64,
    #[serde(default)]
    pub nb_forward: u64,
    #[serde(default)]
    pub nb_reply: u64,
    #[serde(default)]
    pub pinned: bool,
}

impl Alias {
    /// Creation time, if the timestamp is in range
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.creation_timestamp, 0)
    }
}

/// One suffix offered by `/api/v5/alias/options`.
///
/// `signed_suffix` is server-signed and must be sent back verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuffixOption {
    pub signed_suffix: String,
    pub suffix: String,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub is_premium: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasOptions {
    pub can_create: bool,
    #[serde(default)]
    pub prefix_suggestion: String,
    #[serde(default)]
    pub suffixes: Vec<SuffixOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mailbox {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MailboxesResponse {
    #[serde(default)]
    pub mailboxes: Vec<Mailbox>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AliasesResponse {
    #[serde(default)]
    pub aliases: Vec<Alias>,
}

/// Server-side body of a failed request
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Generation scheme for random aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomMode {
    Uuid,
    Word,
}

impl RandomMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
            Self::Word => "word",
        }
    }
}

impl fmt::Display for RandomMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RandomMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uuid" => Ok(Self::Uuid),
            "word" => Ok(Self::Word),
            other => Err(format!("unknown random mode '{}', expected uuid or word", other)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct CreateRandomAliasRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Body of `POST /api/v3/alias/custom/new`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCustomAliasRequest {
    pub alias_prefix: String,
    pub signed_suffix: String,
    pub mailbox_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_custom_alias_request_keys() {
        let req = CreateCustomAliasRequest {
            alias_prefix: "p".to_string(),
            signed_suffix: ".x@y.sig".to_string(),
            mailbox_ids: vec![3, 1, 2],
            note: None,
            name: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({"alias_prefix": "p", "signed_suffix": ".x@y.sig", "mailbox_ids": [3, 1, 2]})
        );

        let back: CreateCustomAliasRequest = serde_json::from_value(value).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn test_custom_alias_request_optional_fields() {
        let req = CreateCustomAliasRequest {
            alias_prefix: "p".to_string(),
            signed_suffix: "s".to_string(),
            mailbox_ids: vec![1],
            note: Some("Note".to_string()),
            name: Some("Name".to_string()),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["note"], "Note");
        assert_eq!(value["name"], "Name");
    }

    #[test]
    fn test_random_alias_request_omits_empty_note() {
        let value = serde_json::to_value(CreateRandomAliasRequest::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_alias_deserialize_nullable_fields() {
        let alias: Alias = serde_json::from_value(json!({
            "id": 42,
            "email": "shop.abc@sl.lan",
            "name": null,
            "enabled": true,
            "creation_timestamp": 1700000000,
            "note": null,
            "nb_block": 1,
            "nb_forward": 2,
            "nb_reply": 3,
            "pinned": false,
            "mailbox": {"id": 1, "email": "me@example.com"}
        }))
        .unwrap();
        assert_eq!(alias.id, 42);
        assert!(alias.name.is_none());
        assert!(alias.note.is_none());
        assert_eq!(alias.nb_forward, 2);
        assert_eq!(alias.created_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_random_mode_parse() {
        assert_eq!("WORD".parse::<RandomMode>().unwrap(), RandomMode::Word);
        assert_eq!(" uuid ".parse::<RandomMode>().unwrap(), RandomMode::Uuid);
        assert!("emoji".parse::<RandomMode>().is_err());
        assert_eq!(RandomMode::Word.to_string(), "word");
    }

    #[test]
    fn test_user_info_missing_picture() {
        let info: UserInfo = serde_json::from_value(json!({
            "name": "John",
            "email": "john@example.com",
            "is_premium": true,
            "in_trial": false,
            "max_alias_free_plan": 10
        }))
        .unwrap();
        assert!(info.is_premium);
        assert!(info.profile_picture_url.is_none());
    }
}
