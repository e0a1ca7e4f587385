mod project;

pub use project::{Project, ProjectCreate};
