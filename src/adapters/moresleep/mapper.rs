//! Converts moresleep wire types into domain entities.

use std::collections::BTreeMap;

use crate::domain::foundation::{FieldMap, FieldValue, Timestamp};
use crate::domain::{Conference, Speaker, Talk, TalkStatus};
use crate::ports::SourceError;

use super::models::{ConferenceResponse, DataValue, SessionResponse, SpeakerResponse};

/// Data fields holding a point in time. They are `date` fields in the index
/// mapping, so values that are not dates are dropped.
const TIME_FIELDS: [&str; 2] = ["startTime", "endTime"];

pub fn map_conference(response: ConferenceResponse) -> Conference {
    Conference::new(response.id, response.name, response.slug)
}

pub fn map_conferences(responses: Vec<ConferenceResponse>) -> Vec<Conference> {
    responses.into_iter().map(map_conference).collect()
}

pub fn map_speaker(response: SpeakerResponse) -> Speaker {
    let (data, private_data) = split_data(response.data);
    Speaker {
        id: response.id,
        name: response.name,
        data,
        private_data,
    }
}

/// Maps one session. Conference slug and name are left empty.
///
/// Fails only when the status is not one of the known values.
pub fn map_talk(response: SessionResponse) -> Result<Talk, SourceError> {
    let status: TalkStatus = response
        .status
        .parse()
        .map_err(|e| SourceError::parse(format!("session {}: {}", response.id, e)))?;

    let (data, mut private_data) = split_data(response.data);
    if let Some(posted_by) = response.posted_by.filter(|p| !p.is_empty()) {
        private_data.insert("postedBy".to_string(), FieldValue::Text(posted_by));
    }

    let mut talk = Talk::new(response.id, response.conference_id, status);
    talk.speakers = response.speakers.into_iter().map(map_speaker).collect();
    talk.created = response.created;
    talk.last_updated = response.last_updated;
    talk.data = data;
    talk.private_data = private_data;
    Ok(talk)
}

pub fn map_talks(responses: Vec<SessionResponse>) -> Result<Vec<Talk>, SourceError> {
    responses.into_iter().map(map_talk).collect()
}

/// Splits raw data into (public, private) maps, dropping unindexable values.
fn split_data(raw: BTreeMap<String, DataValue>) -> (FieldMap, FieldMap) {
    let mut public = FieldMap::new();
    let mut private = FieldMap::new();

    for (key, entry) in raw {
        let Some(value) = FieldValue::from_json(entry.value) else {
            continue;
        };
        let value = if TIME_FIELDS.contains(&key.as_str()) {
            match as_date(value) {
                Some(date) => date,
                None => continue,
            }
        } else {
            value
        };

        if entry.private_data {
            private.insert(key, value);
        } else {
            public.insert(key, value);
        }
    }

    (public, private)
}

/// Text that parses becomes a timestamp, numbers pass as epoch millis.
fn as_date(value: FieldValue) -> Option<FieldValue> {
    match value {
        FieldValue::Text(raw) => match Timestamp::parse_flexible(&raw) {
            Ok(Some(ts)) => Some(FieldValue::Timestamp(ts)),
            _ => None,
        },
        FieldValue::Number(millis) => Some(FieldValue::Number(millis)),
        _ => None,
    }
}
