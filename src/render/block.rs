//! Per-block Markdown fragments and recursive page rendering.

use async_trait::async_trait;

use crate::assets::AssetError;
use crate::domain::{Block, BlockKind};
use crate::render::richtext::compose_runs;

/// Indentation unit applied once per nesting level.
pub const INDENT: &str = "\t";

/// Seam for image materialization, so rendering stays testable without a
/// network or filesystem.
#[async_trait]
pub trait AssetSink: Send + Sync {
    /// Markdown reference for an image block, or an empty fragment when the
    /// block carries no resolvable source.
    async fn materialize(&self, block: &Block) -> Result<String, AssetError>;
}

/// Renders one page's block tree to Markdown.
pub struct PageRenderer<'a> {
    assets: &'a dyn AssetSink,
}

impl<'a> PageRenderer<'a> {
    pub fn new(assets: &'a dyn AssetSink) -> Self {
        Self { assets }
    }

    /// Render the tree top-down. Every block with a non-empty fragment
    /// contributes `\n\n{fragment}`; children follow their parent at one more
    /// level of depth either way.
    pub async fn render(&self, blocks: &[Block]) -> Result<String, AssetError> {
        self.render_level(blocks, 0).await
    }

    async fn render_level(&self, blocks: &[Block], depth: usize) -> Result<String, AssetError> {
        let mut page = String::new();
        let mut numbered_index: u32 = 0;
        for block in blocks {
            // The counter survives only unbroken runs of numbered items.
            numbered_index = if block.kind == BlockKind::NumberedListItem {
                numbered_index + 1
            } else {
                0
            };
            let fragment = self.render_block(block, numbered_index, depth).await?;
            if !fragment.is_empty() {
                page.push_str("\n\n");
                page.push_str(&fragment);
            }
            if !block.children.is_empty() {
                let children = Box::pin(self.render_level(&block.children, depth + 1)).await?;
                page.push_str(&children);
            }
        }
        Ok(page)
    }

    async fn render_block(
        &self,
        block: &Block,
        numbered_index: u32,
        depth: usize,
    ) -> Result<String, AssetError> {
        let fragment = match block.kind {
            BlockKind::Divider => "---".to_string(),
            BlockKind::Image => self.assets.materialize(block).await?,
            kind => {
                let text = compose_runs(&block.content.rich_text);
                match kind {
                    BlockKind::Heading1 => format!("# {text}"),
                    BlockKind::Heading2 => format!("## {text}"),
                    BlockKind::Heading3 => format!("### {text}"),
                    BlockKind::Code => format!("```{}\n{text}\n```", block.content.language),
                    BlockKind::BulletedListItem => format!("- {text}"),
                    BlockKind::NumberedListItem => format!("{numbered_index}. {text}"),
                    BlockKind::ToDo if block.content.checked => format!("- [x] {text}"),
                    BlockKind::ToDo => format!("- [ ] {text}"),
                    BlockKind::Quote => format!("> {text}"),
                    _ => text,
                }
            }
        };
        if fragment.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{}{fragment}", INDENT.repeat(depth)))
    }
}
