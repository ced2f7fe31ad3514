//! Side/environment resolution.
//!
//! Maps classes, methods and fields to the execution side they are restricted
//! to: a directly declared restriction annotation wins, then the module's
//! ambient side, then the nearest restricted ancestor in the class hierarchy.

pub mod annotation;
pub mod resolver;

pub use annotation::{family_of, find_side_annotation, resolve_annotation_side, AnnotationFamily};
pub use resolver::{beginning_check, SideResolver};
