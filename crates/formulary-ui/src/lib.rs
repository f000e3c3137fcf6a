//! Terminal UI helpers for the formulary system.
//!
//! Provides Ayu-themed color styling and terminal detection for CLI reports.

pub mod styles;
pub mod terminal;
