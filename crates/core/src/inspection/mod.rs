//! Inspections over a loaded module model, reported as [`Diagnostic`]s

pub mod diagnostic;
pub mod entrypoints;
pub mod side_annotation;
pub mod unused_mixin;

pub use diagnostic::{sort_diagnostics, CheckId, Diagnostic, Severity};
