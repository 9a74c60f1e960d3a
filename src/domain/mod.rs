//! Domain layer containing the talk model and its privacy projections.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (timestamps, tagged field values)
//! - `conference` - Conferences and lookup helpers
//! - `speaker` / `talk` - Entities with public/private projections
//! - `talk_status` - Submission lifecycle and public eligibility
//! - `privacy` - Email heuristics and field-bag redaction
//! - `document` - Search document shape for projected talks
//! - `index_mapping` - Canonical index mapping schema
//!
//! Everything here is pure: no I/O, and projections never fail.

pub mod conference;
pub mod document;
pub mod foundation;
pub mod index_mapping;
pub mod privacy;
pub mod speaker;
pub mod talk;
pub mod talk_status;

pub use conference::Conference;
pub use document::TalkDocument;
pub use index_mapping::talk_index_mapping;
pub use speaker::Speaker;
pub use talk::{private_views, public_views, Talk};
pub use talk_status::TalkStatus;
