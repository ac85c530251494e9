//! FILENAME: orders/src/lib.rs
//! PURPOSE: Main library entry point for the order record model.
//! CONTEXT: Re-exports the shared types used by the persistence and
//! dashboard-engine crates.

pub mod month;
pub mod order;

// Re-export commonly used types at the crate root
pub use month::Month;
pub use order::{OrderRecord, OrderStore};
