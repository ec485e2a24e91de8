//! Core domain types
//!
//! These types represent jobs as the CLI presents them. They are built from
//! DTOs fetched from the node and never mutated afterwards.

pub mod job;
pub mod resource;
