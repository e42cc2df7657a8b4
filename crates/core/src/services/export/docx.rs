//! Word document assembly.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};
use draftsmith_common::{AppError, AppResult};
use draftsmith_db::entities::{project, section};

use super::ordered_sections;

/// Build a word-processor document for a project.
///
/// Layout: project title as the top heading, one paragraph stating the
/// topic, then per section (ascending order field) a level-1 heading of
/// the section title and a paragraph of its content.
pub fn build_docx(project: &project::Model, sections: &[section::Model]) -> AppResult<Vec<u8>> {
    let mut docx = Docx::new()
        .add_style(
            Style::new("Title", StyleType::Paragraph)
                .name("Title")
                .size(56)
                .bold(),
        )
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold(),
        )
        .add_paragraph(
            Paragraph::new()
                .style("Title")
                .add_run(Run::new().add_text(project.title.as_str())),
        )
        .add_paragraph(
            Paragraph::new().add_run(Run::new().add_text(format!("Topic: {}", project.topic))),
        );

    for section in ordered_sections(sections) {
        docx = docx
            .add_paragraph(
                Paragraph::new()
                    .style("Heading1")
                    .add_run(Run::new().add_text(section.title.as_str())),
            )
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(section.content.as_deref().unwrap_or(""))),
            );
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| AppError::Internal(format!("Failed to assemble docx: {e}")))?;

    Ok(cursor.into_inner())
}
