// src/lib.rs

//! Inquiry board client library

pub mod controller;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod transport;
pub mod utils;
