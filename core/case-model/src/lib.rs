//! FILENAME: core/case-model/src/lib.rs
//! PURPOSE: Shared record and selection types for the case analytics crates.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod record;
pub mod selection;

// Re-export commonly used types at the crate root
pub use record::{
    non_empty, CaseId, CaseProductLine, CaseRecord, CaseStatus, EntityId, EntityKey, Product,
    ProductId, ProductKey, RepId,
};
pub use selection::{CascadeChange, CascadeLevel, FilterRow, FilterSelection, ModelError};
