// simplelogin-api/src/lib.rs
pub mod client;
pub mod deadline;
pub mod error;
pub mod http;
pub mod types;

pub use client::{select_default_mailbox, SimpleLoginClient, AUTH_HEADER, DEFAULT_BASE_URL, FIRST_PAGE};
pub use deadline::with_deadline;
pub use error::Error;
pub use http::{HttpClient, HttpError, HttpRequest, HttpResponse, Method};
pub use types::{
    Alias, AliasOptions, CreateCustomAliasRequest, Mailbox, RandomMode, SuffixOption, UserInfo,
};

// Re-export reqwest client when feature is enabled
#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;

pub type Result<T> = std::result::Result<T, Error>;
