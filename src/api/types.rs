//! Wire shapes served by the remote store.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Block, BlockContent, BlockKind, RichTextRun};

/// One page of a remote collection.
///
/// `has_more` is the only termination signal; `next_cursor` is the opaque
/// continuation token for the following page.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PagedResult<T> {
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// A block as served by the children endpoint: a tag, a has-children flag,
/// and the tag-keyed payload among the remaining fields.
#[derive(Debug, Deserialize)]
pub struct BlockObject {
    pub id: String,
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, Value>,
}

impl BlockObject {
    /// Build the owned domain block, attaching already-fetched children.
    pub fn into_block(mut self, children: Vec<Block>) -> Block {
        let content: BlockContent = self
            .payload
            .remove(&self.tag)
            .map(|value| serde_json::from_value(value).unwrap_or_default())
            .unwrap_or_default();
        Block {
            kind: BlockKind::from_tag(&self.tag),
            id: self.id,
            content,
            children,
        }
    }
}

/// A database row: page id plus its property set.
#[derive(Debug, Deserialize)]
pub struct PageObject {
    pub id: String,
    #[serde(default)]
    pub properties: Properties,
}

/// The property schema this exporter understands. Unknown properties are
/// ignored; known ones missing from a row deserialize to their defaults.
#[derive(Debug, Default, Deserialize)]
pub struct Properties {
    #[serde(default, rename = "Title")]
    pub title: TitleProperty,
    #[serde(default, rename = "Date")]
    pub date: DateProperty,
    #[serde(default, rename = "Tags")]
    pub tags: MultiSelectProperty,
    #[serde(default, rename = "Categories")]
    pub categories: MultiSelectProperty,
    #[serde(default, rename = "URL")]
    pub url: UrlProperty,
    #[serde(default, rename = "Published")]
    pub published: CheckboxProperty,
}

#[derive(Debug, Default, Deserialize)]
pub struct TitleProperty {
    #[serde(default)]
    pub title: Vec<RichTextRun>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DateProperty {
    #[serde(default)]
    pub date: Option<DateValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DateValue {
    #[serde(default)]
    pub start: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct MultiSelectProperty {
    #[serde(default)]
    pub multi_select: Vec<SelectOption>,
}

#[derive(Debug, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UrlProperty {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckboxProperty {
    #[serde(default)]
    pub checkbox: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn block_payload_is_keyed_by_its_tag() {
        let object: BlockObject = serde_json::from_value(json!({
            "id": "b1",
            "type": "to_do",
            "has_children": false,
            "created_time": "2024-05-01T00:00:00Z",
            "to_do": {
                "rich_text": [{"plain_text": "ship it", "annotations": {}}],
                "checked": true
            }
        }))
        .expect("block object");

        let block = object.into_block(Vec::new());
        assert_eq!(block.kind, BlockKind::ToDo);
        assert!(block.content.checked);
        assert_eq!(block.content.rich_text[0].plain_text, "ship it");
    }

    #[test]
    fn unknown_tag_degrades_to_unrecognized_content() {
        let object: BlockObject = serde_json::from_value(json!({
            "id": "b2",
            "type": "synced_block",
            "has_children": true,
            "synced_block": {"synced_from": null}
        }))
        .expect("block object");

        let block = object.into_block(Vec::new());
        assert_eq!(block.kind, BlockKind::Unrecognized);
        assert!(block.content.rich_text.is_empty());
        assert!(block.content.image_url().is_none());
    }

    #[test]
    fn paged_result_tolerates_null_cursor() {
        let page: PagedResult<BlockObject> = serde_json::from_value(json!({
            "results": [],
            "next_cursor": null,
            "has_more": false
        }))
        .expect("paged result");
        assert!(page.results.is_empty());
        assert!(page.next_cursor.is_none());
        assert!(!page.has_more);
    }

    #[test]
    fn properties_deserialize_with_defaults_for_missing_fields() {
        let properties: Properties = serde_json::from_value(json!({
            "Title": {"title": [{"plain_text": "A post", "annotations": {}}]},
            "Published": {"checkbox": true}
        }))
        .expect("properties");

        assert_eq!(properties.title.title[0].plain_text, "A post");
        assert!(properties.published.checkbox);
        assert!(properties.date.date.is_none());
        assert!(properties.tags.multi_select.is_empty());
    }
}
