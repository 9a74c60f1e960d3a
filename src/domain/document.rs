//! Search document shape for an already-projected talk.
//!
//! Data fields are flattened to the top level so they line up with the
//! canonical index mapping (`title`, `abstract`, `room`, ...). Only `data` is
//! ever written; `private_data` is not part of the document, so serializing a
//! talk that skipped projection still cannot leak private fields.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::foundation::FieldMap;
use super::speaker::Speaker;
use super::talk::Talk;

/// Top-level talk document keys. Data fields with these names are skipped.
pub const RESERVED_TALK_FIELDS: [&str; 8] = [
    "id",
    "conferenceId",
    "conferenceSlug",
    "conferenceName",
    "status",
    "speakers",
    "created",
    "lastUpdated",
];

/// Top-level speaker document keys. Data fields with these names are skipped.
pub const RESERVED_SPEAKER_FIELDS: [&str; 2] = ["id", "name"];

/// Borrowing serializer for a talk's index document.
#[derive(Debug, Clone, Copy)]
pub struct TalkDocument<'a>(&'a Talk);

impl<'a> TalkDocument<'a> {
    pub fn new(talk: &'a Talk) -> Self {
        Self(talk)
    }

    /// Document id used by the search engine.
    pub fn id(&self) -> &'a str {
        &self.0.id
    }
}

impl Serialize for TalkDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let talk = self.0;
        let speakers: Vec<SpeakerDocument<'_>> = talk.speakers.iter().map(SpeakerDocument).collect();

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &talk.id)?;
        map.serialize_entry("conferenceId", &talk.conference_id)?;
        map.serialize_entry("conferenceSlug", &talk.conference_slug)?;
        map.serialize_entry("conferenceName", &talk.conference_name)?;
        map.serialize_entry("status", &talk.status)?;
        map.serialize_entry("speakers", &speakers)?;
        if let Some(created) = &talk.created {
            map.serialize_entry("created", created)?;
        }
        if let Some(last_updated) = &talk.last_updated {
            map.serialize_entry("lastUpdated", last_updated)?;
        }
        flatten_into(&mut map, &talk.data, &RESERVED_TALK_FIELDS)?;
        map.end()
    }
}

struct SpeakerDocument<'a>(&'a Speaker);

impl Serialize for SpeakerDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let speaker = self.0;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &speaker.id)?;
        map.serialize_entry("name", &speaker.name)?;
        flatten_into(&mut map, &speaker.data, &RESERVED_SPEAKER_FIELDS)?;
        map.end()
    }
}

fn flatten_into<M: SerializeMap>(map: &mut M, data: &FieldMap, reserved: &[&str]) -> Result<(), M::Error> {
    for (name, value) in data {
        if reserved.contains(&name.as_str()) {
            continue;
        }
        map.serialize_entry(name, value)?;
    }
    Ok(())
}
