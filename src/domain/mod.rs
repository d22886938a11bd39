//! Domain layer: resource registry, form schemas and their invariants.

pub mod columns;
pub mod entities;
pub mod form;
pub mod resource;
pub mod validation;
