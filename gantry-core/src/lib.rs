//! Gantry Core
//!
//! Core types and abstractions for the Gantry build API.
//!
//! This crate contains:
//! - Domain types: Core business entities (Job, Build) and listing configuration
//! - DTOs: Wire representations shared by the server, client and CLI

pub mod domain;
pub mod dto;
