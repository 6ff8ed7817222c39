//! Domain model for tasks and notes.
//!
//! # Responsibility
//! - Define canonical records shared by storage, services and views.
//! - Own data-entry validation so downstream code can assume well-typed input.
//!
//! # Invariants
//! - Every record is identified by a stable UUID assigned at creation.
//! - Enumerated fields are closed Rust enums; strings are parsed, never stored
//!   raw.

pub mod note;
pub mod task;
