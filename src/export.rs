//! End-to-end export pipeline: sequential listing phase, then a bounded pool
//! of page workers.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::available_parallelism;

use futures::StreamExt;
use reqwest::Method;
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

use crate::api::client::{ApiClient, ApiError};
use crate::api::pagination::collect_paginated;
use crate::api::tree::{FetchError, fetch_block_tree};
use crate::api::types::{PageObject, PagedResult};
use crate::assets::{AssetError, AssetStore};
use crate::config::{ConfigError, Settings};
use crate::domain::PageEntry;
use crate::io::write_atomic;
use crate::render::block::PageRenderer;
use crate::render::frontmatter::frontmatter_for;
use crate::telemetry::TelemetryError;

/// Ceiling on parallel page workers, kept low to stay inside the remote
/// store's rate limits.
const WORKER_CEILING: usize = 3;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("failed to write page `{page_id}`: {source}")]
    Write {
        page_id: String,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome counts for one export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Drives one full database export.
pub struct Exporter {
    client: ApiClient,
    assets: AssetStore,
    settings: Settings,
}

impl Exporter {
    pub fn new(settings: Settings) -> Result<Self, ExportError> {
        let client = ApiClient::new(&settings.base_url, settings.api_key.clone())?;
        let assets = AssetStore::new(
            client.clone(),
            settings.static_dir.clone(),
            &settings.public_url,
        );
        Ok(Self {
            client,
            assets,
            settings,
        })
    }

    /// Run the sequential listing phase, then the worker pool.
    ///
    /// A listing failure is fatal. Page failures are reported with their page
    /// id, write no output file, and never halt sibling pages.
    pub async fn run(&self) -> Result<ExportSummary, ExportError> {
        info!(
            target: "quaderno::export",
            database = %self.settings.database,
            "listing database pages"
        );
        let pages = self.list_pages().await?;
        let total = pages.len();
        let concurrency = worker_count();
        info!(
            target: "quaderno::export",
            pages = total,
            concurrency,
            "starting page export"
        );

        let succeeded = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);
        futures::stream::iter(pages)
            .for_each_concurrent(Some(concurrency), |page| {
                let succeeded = &succeeded;
                let failed = &failed;
                async move {
                    match self.export_page(&page).await {
                        Ok(path) => {
                            succeeded.fetch_add(1, Ordering::Relaxed);
                            info!(
                                target: "quaderno::export",
                                page_id = %page.id,
                                path = %path.display(),
                                "page exported"
                            );
                        }
                        Err(error) => {
                            failed.fetch_add(1, Ordering::Relaxed);
                            warn!(
                                target: "quaderno::export",
                                page_id = %page.id,
                                error = %error,
                                "page export failed"
                            );
                        }
                    }
                }
            })
            .await;

        let summary = ExportSummary {
            total,
            succeeded: succeeded.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
        };
        info!(
            target: "quaderno::export",
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "export finished"
        );
        Ok(summary)
    }

    /// Paginated inventory of the database: page ids plus the header for
    /// pages that will carry one.
    pub async fn list_pages(&self) -> Result<Vec<PageEntry>, ExportError> {
        let path = format!("v1/databases/{}/query", self.settings.database);
        let path = path.as_str();
        let client = &self.client;
        let pages = collect_paginated(move |cursor| async move {
            let body = cursor.map(|cursor| json!({ "start_cursor": cursor }));
            client
                .fetch_json::<PagedResult<PageObject>>(Method::POST, path, None, body)
                .await
        })
        .await?;

        Ok(pages
            .into_iter()
            .map(|page| PageEntry {
                frontmatter: frontmatter_for(&page.properties, self.settings.frontmatter),
                id: page.id,
            })
            .collect())
    }

    /// One page's pipeline: fetch the tree, render it, prepend the header,
    /// persist the document.
    pub async fn export_page(&self, page: &PageEntry) -> Result<PathBuf, ExportError> {
        let blocks = fetch_block_tree(&self.client, &page.id).await?;
        let body = PageRenderer::new(&self.assets).render(&blocks).await?;

        let mut document = match &page.frontmatter {
            Some(frontmatter) => {
                serde_json::to_string(frontmatter).expect("serializing frontmatter should succeed")
            }
            None => String::new(),
        };
        document.push_str(&body);

        let destination = self.settings.content_dir.join(format!("{}.md", page.id));
        write_atomic(&destination, document.as_bytes())
            .await
            .map_err(|source| ExportError::Write {
                page_id: page.id.clone(),
                source,
            })?;
        Ok(destination)
    }
}

/// Worker count: available parallelism capped by the rate-limit ceiling.
fn worker_count() -> usize {
    available_parallelism()
        .map_or(1, NonZeroUsize::get)
        .min(WORKER_CEILING)
}
