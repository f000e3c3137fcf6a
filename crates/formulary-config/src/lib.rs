//! Configuration management for the formulary system.
//!
//! This crate handles loading and saving `.formulary/config.yaml` files and
//! discovering the `.formulary/` project directory.

pub mod config;
pub mod project_dir;
