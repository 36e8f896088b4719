//! Domain types for the Showcase catalog.
//!
//! Error taxonomies live with the layers that raise them
//! (`showcase-storage`, `showcase-auth`, the server's HTTP error type);
//! this crate only defines the records they all pass around.

pub mod project;

pub use project::{Project, ProjectDraft};
