//! Credential handling: Basic/Bearer header builders and the OAuth2 token cache

pub mod headers;
pub mod token_cache;

pub use headers::{HeaderSet, basic_auth_header, bearer_header};
pub use token_cache::{TokenCache, TokenKey};
