//! Business logic services.

#![allow(missing_docs)]

pub mod auth;
pub mod export;
pub mod generation;
pub mod project;
pub mod section;

pub use auth::{AuthService, LoginInput, RegisterInput};
pub use export::{build_docx, build_pptx};
pub use generation::{GENERATION_FAILED, GenerationClient};
pub use project::{CreateProjectInput, CreateSectionInput, ProjectService, ProjectWithSections};
pub use section::SectionService;
