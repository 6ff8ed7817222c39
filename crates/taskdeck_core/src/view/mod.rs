//! Task list derivation pipeline.
//!
//! # Responsibility
//! - Turn a caller-owned task collection plus filter/sort selections into
//!   pending/completed groups and whole-collection stats.
//! - Classify due-date urgency for list and calendar rendering.
//!
//! # Invariants
//! - Every function here is pure and total: no I/O, no logging, no panics
//!   for any valid selection, including an empty collection.
//! - Callers re-run the pipeline after each mutation; nothing is cached.

pub mod calendar;
pub mod due;
pub mod filter;
pub mod partition;
pub mod sort;
