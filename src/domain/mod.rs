//! Content model owned by one page render pass.

pub mod blocks;
pub mod pages;

pub use blocks::{Annotations, Block, BlockContent, BlockKind, FileRef, RichTextRun};
pub use pages::{Frontmatter, PageEntry};
