//! Typed block tree and rich-text runs.

use serde::Deserialize;

/// One node of the remote content tree.
///
/// `children` is populated only when the source flagged descendants; an empty
/// sequence is never re-fetched. The tree is built once per render pass,
/// immutable afterwards, and discarded once the page's Markdown is produced.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub id: String,
    pub kind: BlockKind,
    pub content: BlockContent,
    pub children: Vec<Block>,
}

/// Closed set of recognized block tags.
///
/// Anything outside the set degrades to [`BlockKind::Unrecognized`], which
/// renders its composed rich text unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockKind {
    Divider,
    Image,
    Heading1,
    Heading2,
    Heading3,
    Code,
    BulletedListItem,
    NumberedListItem,
    ToDo,
    Quote,
    #[default]
    Unrecognized,
}

impl BlockKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "divider" => Self::Divider,
            "image" => Self::Image,
            "heading_1" => Self::Heading1,
            "heading_2" => Self::Heading2,
            "heading_3" => Self::Heading3,
            "code" => Self::Code,
            "bulleted_list_item" => Self::BulletedListItem,
            "numbered_list_item" => Self::NumberedListItem,
            "to_do" => Self::ToDo,
            "quote" => Self::Quote,
            _ => Self::Unrecognized,
        }
    }
}

/// Type-specific payload carried under the block's tag key.
///
/// The fields are a union across tags; absent fields deserialize to their
/// defaults so an unexpected payload shape degrades instead of failing the
/// page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockContent {
    #[serde(default)]
    pub rich_text: Vec<RichTextRun>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub file: Option<FileRef>,
    #[serde(default)]
    pub external: Option<FileRef>,
}

impl BlockContent {
    /// Source URL of an image payload. The internally hosted reference wins
    /// over the external one when both are present.
    pub fn image_url(&self) -> Option<&str> {
        let hosted = self
            .file
            .as_ref()
            .map(|file| file.url.as_str())
            .filter(|url| !url.is_empty());
        hosted.or_else(|| {
            self.external
                .as_ref()
                .map(|file| file.url.as_str())
                .filter(|url| !url.is_empty())
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileRef {
    #[serde(default)]
    pub url: String,
}

/// One contiguous span of annotated text; run order within a block is
/// significant and preserved.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichTextRun {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub code: bool,
    #[serde(default)]
    pub color: String,
}

impl Annotations {
    /// Colors with a background variant render as a highlight.
    pub fn is_highlight(&self) -> bool {
        self.color.contains("background")
    }
}
