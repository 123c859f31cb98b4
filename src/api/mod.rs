//! Remote store access: HTTP client, wire shapes, pagination, tree fetch.

pub mod client;
pub mod pagination;
pub mod tree;
pub mod types;

pub use client::{ApiClient, ApiError};
pub use pagination::collect_paginated;
pub use tree::{FetchError, fetch_block_tree};
