use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Caller-supplied fields for a new project entry.
///
/// Identity and creation timestamp are assigned by [`Project::create`],
/// never by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
}

/// A stored catalog entry.
///
/// The identifier is assigned once at creation and never reused;
/// `created_at` never changes after insert. `updated_at` is reserved for
/// a future update operation and stays `None` until then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl Project {
    /// Materializes a draft into a stored record, assigning identity and
    /// creation timestamp.
    pub fn create(draft: ProjectDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            summary: draft.summary,
            tags: draft.tags,
            repo_url: draft.repo_url,
            live_url: draft.live_url,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        }
    }

    /// True if `term` occurs in the title or the summary,
    /// case-insensitively. An empty term matches everything.
    pub fn matches_term(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.summary.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, summary: &str) -> ProjectDraft {
        ProjectDraft {
            title: title.to_string(),
            summary: summary.to_string(),
            tags: vec!["rust".to_string()],
            repo_url: Some("https://example.com/repo".to_string()),
            live_url: None,
        }
    }

    #[test]
    fn create_assigns_identity_and_timestamp() {
        let a = Project::create(draft("Alpha", "first"));
        let b = Project::create(draft("Alpha", "first"));

        assert_ne!(a.id, b.id);
        assert!(a.updated_at.is_none());
        assert_eq!(a.title, "Alpha");
        assert_eq!(a.tags, vec!["rust".to_string()]);
    }

    #[test]
    fn matches_term_searches_title_and_summary() {
        let p = Project::create(draft("Orbit Tracker", "satellite ground station"));

        assert!(p.matches_term("orbit"));
        assert!(p.matches_term("GROUND"));
        assert!(p.matches_term(""));
        assert!(!p.matches_term("compiler"));
    }

    #[test]
    fn serializes_timestamps_as_rfc3339() {
        let p = Project::create(draft("Alpha", "first"));
        let json = serde_json::to_value(&p).unwrap();

        let created = json["created_at"].as_str().unwrap();
        assert!(created.contains('T'));
        assert!(json.get("updated_at").is_none() || json["updated_at"].is_null());
    }
}
