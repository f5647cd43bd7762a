#![forbid(unsafe_code)]

//! Core domain model and business logic for the library circulation desk.
//!
//! This crate provides:
//! - Domain types (catalog items, members, the day clock)
//! - The circulation desk state machine ([`Library`])
//! - Collection file loading and librarian command parsing
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod clock;
pub mod listing;
pub mod catalog;
pub mod command;
pub mod config;
pub mod logging;
pub mod desk;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use clock::Clock;
pub use listing::create_numbered_list;
pub use catalog::{load_collection, parse_collection, sample_collection};
pub use command::Command;
pub use config::{Config, Policy};
pub use desk::{Flow, Library};
