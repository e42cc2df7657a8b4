//! Document assembly.
//!
//! Renders a project's persisted state into a downloadable office
//! document. Both builders are pure functions of their input: no network,
//! no side effects, deterministic byte output for identical input.

pub mod docx;
pub mod pptx;

pub use docx::build_docx;
pub use pptx::build_pptx;

use draftsmith_db::entities::section;

/// Sections in render order: ascending by the explicit order field.
///
/// The sort is stable, so equal order values keep their storage order.
pub(crate) fn ordered_sections(sections: &[section::Model]) -> Vec<&section::Model> {
    let mut ordered: Vec<&section::Model> = sections.iter().collect();
    ordered.sort_by_key(|s| s.sort_order);
    ordered
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use draftsmith_db::entities::{project, project::DocType, section};

    pub fn test_project(doc_type: DocType) -> project::Model {
        project::Model {
            id: 1,
            title: "Report".to_string(),
            topic: "Oceans".to_string(),
            doc_type,
            created_at: chrono::Utc::now().into(),
            owner_id: 1,
        }
    }

    /// Sections deliberately out of storage order relative to their
    /// render order.
    pub fn test_sections() -> Vec<section::Model> {
        vec![
            section::Model {
                id: 2,
                title: "Methods".to_string(),
                sort_order: 2,
                content: Some("Survey data.".to_string()),
                project_id: 1,
            },
            section::Model {
                id: 1,
                title: "Intro".to_string(),
                sort_order: 1,
                content: Some("The deep sea.".to_string()),
                project_id: 1,
            },
            section::Model {
                id: 3,
                title: "Outlook".to_string(),
                sort_order: 3,
                content: None,
                project_id: 1,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::test_sections;

    #[test]
    fn test_ordered_sections_sorts_ascending() {
        let sections = test_sections();
        let ordered = ordered_sections(&sections);

        let titles: Vec<&str> = ordered.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Intro", "Methods", "Outlook"]);
    }

    #[test]
    fn test_ordered_sections_is_stable_on_ties() {
        let mut sections = test_sections();
        for s in &mut sections {
            s.sort_order = 1;
        }

        let ordered = ordered_sections(&sections);
        let ids: Vec<i32> = ordered.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
