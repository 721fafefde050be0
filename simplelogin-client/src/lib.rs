pub mod client;
pub mod config;
pub mod resolve;

pub use client::{connect, Client, REQUEST_TIMEOUT};
pub use config::{Config, Settings};
pub use resolve::{
    create_custom_alias, find_signed_suffix, parse_selection, resolve_mailbox_ids,
    resolve_signed_suffix, sorted_suffixes, CustomAliasPlan, ResolveError, SuffixChoice,
    SuffixSelector,
};

// Re-export API types for convenience
pub use simplelogin_api::{
    select_default_mailbox, with_deadline, Alias, AliasOptions, Error, Mailbox, RandomMode,
    SuffixOption, UserInfo, FIRST_PAGE,
};
