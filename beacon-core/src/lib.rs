//! Beacon Core
//!
//! Job presentation model for the Beacon node CLI.
//!
//! This crate contains:
//! - Domain types: jobs, their specializations and identifiers
//! - DTOs: the node's JSON:API wire shapes
//! - DAG task extraction from pipeline DOT source
//! - Presenter views: task lists, creation times and table rows
//!
//! Nothing here performs I/O.

pub mod dag;
pub mod domain;
pub mod dto;
pub mod presenter;
