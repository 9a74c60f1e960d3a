//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the indexing core and the outside world. Adapters implement these ports.
//!
//! - `TalkSource` - Upstream submission system (conferences, talks, speakers)
//! - `SearchIndex` - Search engine index lifecycle and document writes

mod search_index;
mod talk_source;

pub use search_index::{SearchIndex, SearchIndexError};
pub use talk_source::{SourceError, TalkSource};
