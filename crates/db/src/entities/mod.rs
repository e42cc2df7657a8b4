//! Database entities.

pub mod comment;
pub mod project;
pub mod refinement_history;
pub mod section;
pub mod user;

pub use comment::Entity as Comment;
pub use project::Entity as Project;
pub use refinement_history::Entity as RefinementHistory;
pub use section::Entity as Section;
pub use user::Entity as User;
