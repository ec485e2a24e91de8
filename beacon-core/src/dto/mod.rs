//! Data Transfer Objects for the node API
//!
//! The node speaks JSON:API: every response is a [`Document`] whose `data`
//! holds one resource object or a list of them. DTOs mirror that wire shape
//! and convert into domain types.

pub mod job;

use serde::{Deserialize, Serialize};

/// Top-level JSON:API document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Option<Meta>,
}

/// Pagination metadata of a list document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Total number of resources across all pages
    pub count: u64,
}
