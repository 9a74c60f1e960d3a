//! Speaker - a person presenting a talk.

use super::foundation::FieldMap;
use super::privacy::{merge_private, redact_public};

/// A speaker attached to a talk submission.
///
/// `data` holds fields the speaker marked as shareable, `private_data` the
/// fields marked private. A field name never appears in both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Speaker {
    pub id: String,
    pub name: String,
    pub data: FieldMap,
    pub private_data: FieldMap,
}

impl Speaker {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Copy safe for the public index: private data dropped, email fields redacted.
    pub fn to_public(&self) -> Speaker {
        Speaker {
            id: self.id.clone(),
            name: self.name.clone(),
            data: redact_public(&self.data),
            private_data: FieldMap::new(),
        }
    }

    /// Copy for the private index: private data merged into `data`.
    pub fn to_private(&self) -> Speaker {
        Speaker {
            id: self.id.clone(),
            name: self.name.clone(),
            data: merge_private(&self.data, &self.private_data),
            private_data: FieldMap::new(),
        }
    }
}
