// src/models/mod.rs

//! Domain models for the board client.

mod board;
mod config;
mod student;

// Re-export all public types
pub use board::{BoardFilter, BoardItem, DateOrder, Tag};
pub use config::{ApiConfig, BoardConfig, Config, SessionConfig};
pub use student::{Student, filter_students};
