//! Conference - the unit a batch of talk submissions belongs to.

use serde::{Deserialize, Serialize};

/// A conference as known to the submission system.
///
/// The slug is the external addressing key for conference-scoped reindexing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Conference {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl Conference {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
        }
    }
}

/// Finds a conference by its slug.
pub fn find_by_slug<'a>(conferences: &'a [Conference], slug: &str) -> Option<&'a Conference> {
    conferences.iter().find(|c| c.slug == slug)
}

/// Finds a conference by its identifier.
pub fn find_by_id<'a>(conferences: &'a [Conference], id: &str) -> Option<&'a Conference> {
    conferences.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conferences() -> Vec<Conference> {
        vec![
            Conference::new("conf-1", "JavaZone 2023", "javazone2023"),
            Conference::new("conf-2", "JavaZone 2024", "javazone2024"),
        ]
    }

    #[test]
    fn finds_by_slug() {
        let all = conferences();
        assert_eq!(find_by_slug(&all, "javazone2024").map(|c| c.id.as_str()), Some("conf-2"));
        assert!(find_by_slug(&all, "missing").is_none());
    }

    #[test]
    fn finds_by_id() {
        let all = conferences();
        assert_eq!(find_by_id(&all, "conf-1").map(|c| c.slug.as_str()), Some("javazone2023"));
        assert!(find_by_id(&all, "conf-9").is_none());
    }
}
