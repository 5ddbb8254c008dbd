//! `supplyhub-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! typed identifiers, the entity/value-object traits and the error taxonomy
//! shared by the catalog and the supplier session.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, Field, FieldIssue, ValidationError};
pub use id::{ProductId, SupplierId};
pub use value_object::ValueObject;
