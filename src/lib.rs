//! goaltrack - savings goal tracker
//!
//! A small web service that keeps a list of savings goals in a JSON file
//! and answers free-text questions about them through a generative model.
//!
//! ## Key Concepts
//!
//! - **Open records**: a goal is a JSON object; unknown fields round-trip
//! - **Index addressing**: goals are addressed by position, not by ID
//! - **Whole-file store**: every mutation rewrites `goals.json`
//! - **Injected model**: the chat endpoint talks to any `GenerativeModel`

pub mod cli;
pub mod config;
pub mod core;
pub mod model;
pub mod server;

pub use core::goal::Goal;
pub use core::store::{GoalStore, StoreError};
pub use model::{GeminiClient, GenerativeModel};
pub use server::{router, AppState};
