//! Authentication module
//!
//! Supports: HTTP Basic
//!
//! Credentials are turned into a header map once, up front. The same map is
//! then attached unchanged to the search request and to every page fetch.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
