//! Core types for the formulary system.
//!
//! Formulations are ingredient recipes with quantities and rates. This crate
//! holds the record types, the load-time validation rules, and the
//! [`catalog::Catalog`] repository that every consumer receives by reference.

pub mod catalog;
pub mod formulation;
pub mod ingredient;
pub mod loader;
pub mod price;
pub mod validation;
