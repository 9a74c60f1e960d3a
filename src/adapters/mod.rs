//! Adapters - Implementations of port interfaces and the HTTP surface.
//!
//! - `moresleep` - submission system client (TalkSource)
//! - `elasticsearch` - search engine client (SearchIndex)
//! - `memory` - in-memory TalkSource and SearchIndex
//! - `http` - axum routers for the API and the admin console

pub mod elasticsearch;
pub mod http;
pub mod memory;
pub mod moresleep;

pub use elasticsearch::{ElasticsearchClient, ElasticsearchConfig};
pub use memory::{InMemorySearchIndex, InMemoryTalkSource};
pub use moresleep::{MoresleepClient, MoresleepConfig};
