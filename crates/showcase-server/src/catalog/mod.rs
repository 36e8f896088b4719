//! Catalog services orchestrating cache-then-store reads and
//! write-then-invalidate mutations.

pub mod listing;
pub mod mutation;

pub use listing::{DEFAULT_PAGE_SIZE, ListingService, MAX_PAGE_SIZE};
pub use mutation::MutationService;
