//! Cursor-following collection over paged endpoints.

use std::future::Future;

use crate::api::client::ApiError;
use crate::api::types::PagedResult;

/// Drain a paged endpoint into one ordered sequence.
///
/// Calls `fetch(None)` first, then follows `next_cursor` while the remote
/// reports more items, appending each page's items in order. A failure on any
/// page discards the partial result and propagates. There is no page-count
/// bound beyond the remote's own termination signal.
pub async fn collect_paginated<T, F, Fut>(mut fetch: F) -> Result<Vec<T>, ApiError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<PagedResult<T>, ApiError>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = fetch(cursor.take()).await?;
        items.extend(page.results);
        if !page.has_more {
            return Ok(items);
        }
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            // A page claiming more items without a continuation token would
            // replay the first page forever.
            None => {
                return Err(ApiError::Server(
                    "pagination reported more items without a continuation cursor".into(),
                ));
            }
        }
    }
}
