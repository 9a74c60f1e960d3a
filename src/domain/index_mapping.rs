//! Canonical mapping schema for both talk indices.
//!
//! Applied whenever an index is created. Fields not listed here are mapped
//! dynamically by the search engine.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Date formats accepted by every date field: ISO-8601 or epoch millis.
pub const DATE_FORMAT: &str = "strict_date_optional_time||epoch_millis";

static TALK_INDEX_MAPPING: Lazy<Value> = Lazy::new(|| {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1,
            "analysis": {
                "analyzer": {
                    "default": { "type": "standard" }
                }
            }
        },
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                "conferenceId": { "type": "keyword" },
                "conferenceSlug": { "type": "keyword" },
                "title": {
                    "type": "text",
                    "fields": {
                        "keyword": { "type": "keyword", "ignore_above": 256 }
                    }
                },
                "abstract": { "type": "text" },
                "intendedAudience": { "type": "text" },
                "language": { "type": "keyword" },
                "format": { "type": "keyword" },
                "level": { "type": "keyword" },
                "keywords": { "type": "keyword" },
                "status": { "type": "keyword" },
                "room": { "type": "keyword" },
                "startTime": { "type": "date", "format": DATE_FORMAT },
                "endTime": { "type": "date", "format": DATE_FORMAT },
                "speakers": {
                    "type": "nested",
                    "properties": {
                        "id": { "type": "keyword" },
                        "name": {
                            "type": "text",
                            "fields": {
                                "keyword": { "type": "keyword", "ignore_above": 256 }
                            }
                        },
                        "bio": { "type": "text" },
                        "twitter": { "type": "keyword" },
                        "pictureUrl": { "type": "keyword", "index": false }
                    }
                },
                "submitterEmail": { "type": "keyword" },
                "created": { "type": "date", "format": DATE_FORMAT },
                "lastUpdated": { "type": "date", "format": DATE_FORMAT }
            }
        }
    })
});

/// Index creation body (settings + mappings) shared by the public and private index.
pub fn talk_index_mapping() -> &'static Value {
    &TALK_INDEX_MAPPING
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(path: &[&str]) -> &'static Value {
        let mut value = &talk_index_mapping()["mappings"]["properties"];
        for segment in path {
            value = &value[*segment];
        }
        value
    }

    #[test]
    fn keyword_fields_are_keywords() {
        for field in [
            "id",
            "conferenceId",
            "conferenceSlug",
            "language",
            "format",
            "level",
            "keywords",
            "status",
            "room",
            "submitterEmail",
        ] {
            assert_eq!(property(&[field, "type"]), "keyword", "{}", field);
        }
    }

    #[test]
    fn title_has_truncated_keyword_subfield() {
        assert_eq!(property(&["title", "type"]), "text");
        assert_eq!(property(&["title", "fields", "keyword", "ignore_above"]), 256);
    }

    #[test]
    fn date_fields_accept_iso_and_epoch_millis() {
        for field in ["startTime", "endTime", "created", "lastUpdated"] {
            assert_eq!(property(&[field, "type"]), "date");
            assert_eq!(property(&[field, "format"]), DATE_FORMAT);
        }
    }

    #[test]
    fn speakers_are_nested_with_unsearchable_picture() {
        assert_eq!(property(&["speakers", "type"]), "nested");
        assert_eq!(property(&["speakers", "properties", "pictureUrl", "index"]), false);
        assert_eq!(property(&["speakers", "properties", "name", "fields", "keyword", "type"]), "keyword");
    }

    #[test]
    fn has_exactly_the_canonical_top_level_fields() {
        let properties = talk_index_mapping()["mappings"]["properties"]
            .as_object()
            .unwrap();
        assert_eq!(properties.len(), 18);
    }
}
