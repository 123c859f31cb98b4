//! Materialization of embedded image assets.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::api::client::{ApiClient, ApiError};
use crate::domain::Block;
use crate::io::write_atomic;
use crate::render::block::AssetSink;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset download failed for block `{block_id}`: {source}")]
    Download {
        block_id: String,
        #[source]
        source: ApiError,
    },
    #[error("failed to store asset `{filename}`: {source}")]
    Store {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}

/// Downloads image payloads once and persists them under the static
/// directory, handing back a reference rewritten to the public URL prefix.
#[derive(Debug, Clone)]
pub struct AssetStore {
    client: ApiClient,
    static_dir: PathBuf,
    public_url: String,
}

impl AssetStore {
    pub fn new(client: ApiClient, static_dir: PathBuf, public_url: &str) -> Self {
        Self {
            client,
            static_dir,
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    /// `{block_id}.{extension}` with the extension taken from the source
    /// URL's final path segment; the query string never contributes. URLs
    /// without an extension fall back to the bare block id.
    fn derive_filename(block_id: &str, source: &Url) -> String {
        let extension = source
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .and_then(|segment| segment.rsplit_once('.'))
            .map(|(_, extension)| extension)
            .filter(|extension| !extension.is_empty());
        match extension {
            Some(extension) => format!("{block_id}.{extension}"),
            None => block_id.to_string(),
        }
    }
}

#[async_trait]
impl AssetSink for AssetStore {
    async fn materialize(&self, block: &Block) -> Result<String, AssetError> {
        let Some(source) = block.content.image_url() else {
            return Ok(String::new());
        };
        let parsed = Url::parse(source).map_err(|err| AssetError::Download {
            block_id: block.id.clone(),
            source: ApiError::Url(err),
        })?;
        let bytes = self
            .client
            .fetch_bytes(source)
            .await
            .map_err(|err| AssetError::Download {
                block_id: block.id.clone(),
                source: err,
            })?;

        let filename = Self::derive_filename(&block.id, &parsed);
        let destination = self.static_dir.join(&filename);
        write_atomic(&destination, &bytes)
            .await
            .map_err(|err| AssetError::Store {
                filename: filename.clone(),
                source: err,
            })?;

        Ok(format!("![]({}/{filename}#center)", self.public_url))
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use tempfile::TempDir;

    use super::*;
    use crate::domain::{BlockContent, BlockKind, FileRef};

    fn image_block(id: &str, url: &str) -> Block {
        Block {
            id: id.into(),
            kind: BlockKind::Image,
            content: BlockContent {
                file: Some(FileRef { url: url.into() }),
                ..BlockContent::default()
            },
            children: Vec::new(),
        }
    }

    fn store(server: &MockServer, dir: &TempDir) -> AssetStore {
        let client = ApiClient::new(&server.base_url(), "key".into()).expect("client");
        AssetStore::new(
            client,
            dir.path().to_path_buf(),
            "https://example.com/static/",
        )
    }

    #[test]
    fn filename_strips_the_query_before_taking_the_extension() {
        let source = Url::parse("https://files.example/a/b/cover.png?sig=abc&exp=1").expect("url");
        assert_eq!(AssetStore::derive_filename("blk", &source), "blk.png");
    }

    #[test]
    fn filename_uses_the_last_extension_segment() {
        let source = Url::parse("https://files.example/archive.tar.gz").expect("url");
        assert_eq!(AssetStore::derive_filename("blk", &source), "blk.gz");
    }

    #[test]
    fn extensionless_url_falls_back_to_the_block_id() {
        let source = Url::parse("https://files.example/raw").expect("url");
        assert_eq!(AssetStore::derive_filename("blk", &source), "blk");
    }

    #[tokio::test]
    async fn materialize_round_trips_the_payload() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/img/photo.jpg");
            then.status(200)
                .header("content-type", "image/jpeg")
                .body("JPEGDATA");
        });
        let dir = TempDir::new().expect("static dir");

        let block = image_block("blk1", &format!("{}/img/photo.jpg?tok=1", server.base_url()));
        let reference = store(&server, &dir)
            .materialize(&block)
            .await
            .expect("reference");

        assert_eq!(reference, "![](https://example.com/static/blk1.jpg#center)");
        let stored = std::fs::read(dir.path().join("blk1.jpg")).expect("stored asset");
        assert_eq!(stored, b"JPEGDATA");
    }

    #[tokio::test]
    async fn block_without_a_source_renders_nothing() {
        let server = MockServer::start();
        let dir = TempDir::new().expect("static dir");
        let block = Block {
            id: "blk2".into(),
            kind: BlockKind::Image,
            content: BlockContent::default(),
            children: Vec::new(),
        };
        let reference = store(&server, &dir)
            .materialize(&block)
            .await
            .expect("empty fragment");
        assert!(reference.is_empty());
    }

    #[tokio::test]
    async fn failed_download_is_an_error_not_a_dangling_reference() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/img/gone.png");
            then.status(404).body("not found");
        });
        let dir = TempDir::new().expect("static dir");

        let block = image_block("blk3", &format!("{}/img/gone.png", server.base_url()));
        let err = store(&server, &dir)
            .materialize(&block)
            .await
            .expect_err("download failure");
        assert!(matches!(err, AssetError::Download { .. }));
        assert!(!dir.path().join("blk3.png").exists());
    }
}
