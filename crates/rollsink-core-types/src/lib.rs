//! Core types shared across rollsink crates
//!
//! This crate provides the foundational types used by the record model,
//! the file writer and the logging engine:
//!
//! - **Identity types**: SessionId, ActivityId
//! - **Schema constants**: Canonical field keys and event names for
//!   internal diagnostics

pub mod identity;
pub mod schema;

pub use identity::{ActivityId, SessionId};
