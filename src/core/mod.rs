//! Core module - Business logic
//!
//! Goal records, the file-backed goal store and chat prompt building.

pub mod goal;
pub mod prompt;
pub mod store;
