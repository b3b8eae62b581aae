//! Command implementations

pub mod audit;
pub mod simple;

pub use audit::{AuditResult, NearMiss, run_audit};
pub use simple::run_simple;
