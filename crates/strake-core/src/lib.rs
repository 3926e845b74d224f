//! Core types for strake declaration-time enforcement.
//!
//! This crate provides the foundational data structures used across all strake crates:
//! - [`value`] — The dynamic value model and its type tags
//! - [`signature`] — Captured call signatures and argument binding
//! - [`violation`] — The violation taxonomy (E001..E010) and serializable reports
//! - [`hash`] — Deterministic type-identity hashing (base62 of xxhash64)
//! - [`config`] — Configuration loading from `strake.json`

pub mod config;
pub mod hash;
pub mod signature;
pub mod value;
pub mod violation;
