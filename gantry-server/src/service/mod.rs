//! Service Module
//!
//! Business logic layer for the server.
//! Services orchestrate between repositories and contain domain logic.

pub mod build;
pub mod job;

// Re-export for convenience
pub use build::{BuildError, BuildListingService, ListingSettings};
pub use job::{JobError, JobService};
