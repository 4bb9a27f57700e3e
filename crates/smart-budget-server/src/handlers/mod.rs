//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod backup;
pub mod budget;
pub mod insights;
pub mod months;
pub mod settings;
pub mod transactions;

// Re-export all handlers for use in router
pub use backup::*;
pub use budget::*;
pub use insights::*;
pub use months::*;
pub use settings::*;
pub use transactions::*;
