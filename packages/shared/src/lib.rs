//! Shared utilities for Plaza: logger setup and time helpers.

pub mod logger;
pub mod time;
