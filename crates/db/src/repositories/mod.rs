//! Database repositories.

mod comment;
mod project;
mod refinement_history;
mod section;
mod user;

pub use comment::CommentRepository;
pub use project::{NewSection, ProjectRepository};
pub use refinement_history::RefinementHistoryRepository;
pub use section::{ContentUpdate, SectionRepository};
pub use user::UserRepository;
