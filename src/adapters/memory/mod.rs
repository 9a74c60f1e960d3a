//! In-memory adapters for tests and local runs without upstream services.

mod search_index;
mod talk_source;

pub use search_index::InMemorySearchIndex;
pub use talk_source::InMemoryTalkSource;
