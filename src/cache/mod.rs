//! Query cache.
//!
//! Holds admin API responses for the lifetime of a session:
//!
//! - **Lists**: one entry per `(resource, page, page size, search)`
//! - **Details**: one entry per `(resource, id)`
//! - **Dropdowns**: one entry per `(resource, keyword)`
//!
//! Writes invalidate by resource: [`QueryCache::invalidate`] drops every list
//! and dropdown of the written resource and bumps its generation counter.
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! list_limit = 100
//! detail_limit = 100
//! dropdown_limit = 50
//! max_age_secs = 86400
//! ```

mod config;
mod keys;
pub(crate) mod lock;
mod store;

pub use config::CacheConfig;
pub use keys::{DetailKey, DropdownKey, ListKey, QueryKey};
pub use store::QueryCache;
