//! Data Transfer Objects
//!
//! Wire representations exchanged between the Gantry server and its clients.

pub mod build;
