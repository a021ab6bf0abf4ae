//! Remote Data Client
//!
//! Typed HTTP access to the fleet REST API.

pub mod client;

pub use client::*;
