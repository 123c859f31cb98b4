//! Recursive acquisition of a page's block tree.

use reqwest::Method;
use thiserror::Error;

use crate::api::client::{ApiClient, ApiError};
use crate::api::pagination::collect_paginated;
use crate::api::types::{BlockObject, PagedResult};
use crate::domain::Block;

/// Bound on nesting depth. The remote store is assumed to be a tree, so
/// reaching this means a cycle or corrupted ancestry.
pub const MAX_TREE_DEPTH: usize = 64;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("block tree under `{block_id}` exceeds {depth} levels of nesting")]
    MalformedTree { block_id: String, depth: usize },
}

/// Fetch the full ordered block tree rooted at a page or block id.
///
/// Children of any block flagged as having descendants are fetched with the
/// same routine; blocks without the flag keep an empty child list that is
/// never re-fetched.
pub async fn fetch_block_tree(client: &ApiClient, root_id: &str) -> Result<Vec<Block>, FetchError> {
    fetch_children(client, root_id, 0).await
}

async fn fetch_children(
    client: &ApiClient,
    parent_id: &str,
    depth: usize,
) -> Result<Vec<Block>, FetchError> {
    if depth >= MAX_TREE_DEPTH {
        return Err(FetchError::MalformedTree {
            block_id: parent_id.to_string(),
            depth,
        });
    }

    let path = format!("v1/blocks/{parent_id}/children");
    let path = path.as_str();
    let objects = collect_paginated(move |cursor| async move {
        let query = cursor.map(|cursor| vec![("start_cursor", cursor)]);
        client
            .fetch_json::<PagedResult<BlockObject>>(Method::GET, path, query.as_deref(), None)
            .await
    })
    .await?;

    let mut blocks = Vec::with_capacity(objects.len());
    for object in objects {
        let children = if object.has_children {
            Box::pin(fetch_children(client, &object.id, depth + 1)).await?
        } else {
            Vec::new()
        };
        blocks.push(object.into_block(children));
    }
    Ok(blocks)
}
