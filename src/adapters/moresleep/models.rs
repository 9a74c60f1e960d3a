//! Wire types of the moresleep submission API.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::foundation::Timestamp;

/// A data field as moresleep sends it: the raw value plus its visibility flag.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataValue {
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub private_data: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConferenceResponse {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConferencesResponse {
    #[serde(default)]
    pub conferences: Vec<ConferenceResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    #[serde(default)]
    pub conference_id: String,
    #[serde(default)]
    pub status: String,
    /// Submitter email.
    #[serde(default)]
    pub posted_by: Option<String>,
    #[serde(default)]
    pub data: BTreeMap<String, DataValue>,
    #[serde(default)]
    pub speakers: Vec<SpeakerResponse>,
    #[serde(default, deserialize_with = "flexible_time")]
    pub created: Option<Timestamp>,
    #[serde(default, deserialize_with = "flexible_time")]
    pub last_updated: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionsResponse {
    #[serde(default)]
    pub sessions: Vec<SessionResponse>,
}

/// A speaker record. The `email` attribute is never read.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakerResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub data: BTreeMap<String, DataValue>,
}

/// Accepts RFC3339 and the naive layouts moresleep emits; null or empty means absent.
fn flexible_time<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => Timestamp::parse_flexible(&raw).map_err(serde::de::Error::custom),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a timestamp string, got {}",
            other
        ))),
    }
}
