//! Shared types, the store adapter trait, and codecs for the scoped settings
//! accessor.
//!
//! This crate holds everything a store adapter needs to implement, so adapter
//! crates do not depend on the manager crate.

#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod prelude;
pub mod store_adapter;
pub mod types;

// vim: ts=4
