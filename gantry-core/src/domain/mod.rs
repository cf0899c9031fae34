//! Core domain types
//!
//! This module contains the core domain structures used across Gantry crates.
//! These types represent the fundamental business entities and are shared between
//! the server (for persistence) and the client (for consumption).

pub mod build;
pub mod job;
pub mod listing;
