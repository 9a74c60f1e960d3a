//! Talk - a conference talk submission and its public/private projections.
//!
//! Two independent redaction layers apply before anything reaches the public
//! index:
//!
//! 1. Status: only approved talks are eligible ([`public_views`]).
//! 2. Fields: private data is dropped and email-like fields are redacted
//!    ([`Talk::to_public`]).
//!
//! The private index receives every talk regardless of status, with private
//! data merged in ([`private_views`]).

use super::conference::Conference;
use super::foundation::{FieldMap, Timestamp};
use super::privacy::{merge_private, redact_public};
use super::speaker::Speaker;
use super::talk_status::TalkStatus;

/// A talk submission with all fields needed for indexing.
///
/// Conference slug and name are denormalized onto the talk because the
/// per-talk upstream record only carries the conference id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Talk {
    pub id: String,
    pub conference_id: String,
    pub conference_slug: String,
    pub conference_name: String,
    pub status: TalkStatus,
    pub speakers: Vec<Speaker>,
    pub created: Option<Timestamp>,
    pub last_updated: Option<Timestamp>,
    pub data: FieldMap,
    pub private_data: FieldMap,
}

impl Talk {
    /// Creates a talk with no speakers, timestamps or data.
    pub fn new(id: impl Into<String>, conference_id: impl Into<String>, status: TalkStatus) -> Self {
        Self {
            id: id.into(),
            conference_id: conference_id.into(),
            conference_slug: String::new(),
            conference_name: String::new(),
            status,
            speakers: Vec::new(),
            created: None,
            last_updated: None,
            data: FieldMap::new(),
            private_data: FieldMap::new(),
        }
    }

    /// Attaches the talk to its conference: id, slug and name.
    ///
    /// The id is overwritten as well, since conference-scoped purges match on
    /// it and upstream session records may leave it blank.
    pub fn with_conference(mut self, conference: &Conference) -> Self {
        self.conference_id = conference.id.clone();
        self.conference_slug = conference.slug.clone();
        self.conference_name = conference.name.clone();
        self
    }

    /// Returns true if this talk may appear in the public index at all.
    pub fn is_public(&self) -> bool {
        self.status.is_public()
    }

    /// Copy for the public index: private data dropped, email fields
    /// redacted, speakers reduced to their public views.
    ///
    /// This is the field-level layer only; callers still have to honor
    /// [`Talk::is_public`].
    pub fn to_public(&self) -> Talk {
        Talk {
            speakers: self.speakers.iter().map(Speaker::to_public).collect(),
            data: redact_public(&self.data),
            private_data: FieldMap::new(),
            ..self.header()
        }
    }

    /// Copy for the private index: private data merged into `data` (private
    /// wins on collision), speakers reduced to their merged views.
    pub fn to_private(&self) -> Talk {
        Talk {
            speakers: self.speakers.iter().map(Speaker::to_private).collect(),
            data: merge_private(&self.data, &self.private_data),
            private_data: FieldMap::new(),
            ..self.header()
        }
    }

    fn header(&self) -> Talk {
        Talk {
            id: self.id.clone(),
            conference_id: self.conference_id.clone(),
            conference_slug: self.conference_slug.clone(),
            conference_name: self.conference_name.clone(),
            status: self.status,
            speakers: Vec::new(),
            created: self.created,
            last_updated: self.last_updated,
            data: FieldMap::new(),
            private_data: FieldMap::new(),
        }
    }
}

/// Public-index document set: approved talks only, each field-redacted.
pub fn public_views(talks: &[Talk]) -> Vec<Talk> {
    talks
        .iter()
        .filter(|talk| talk.is_public())
        .map(Talk::to_public)
        .collect()
}

/// Private-index document set: every talk, private data merged.
pub fn private_views(talks: &[Talk]) -> Vec<Talk> {
    talks.iter().map(Talk::to_private).collect()
}
