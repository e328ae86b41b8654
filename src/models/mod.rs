//! Data models for lite-orm.
//!
//! This module re-exports the record and value types used throughout the crate.

pub mod record;
pub mod value;

pub use record::{Field, Record, extract_fields};
pub use value::Value;
