//! Core types and utilities for evolving tape programs.

pub mod config;
pub mod error;
pub mod task;

pub use error::{Error, Result};
pub use config::*;
pub use task::*;
