//! Metadata headers for published pages.

use crate::api::types::{MultiSelectProperty, Properties};
use crate::domain::Frontmatter;

const UNTITLED: &str = "Untitled";

/// Header record for a page, or `None` when the page is not published or
/// emission is disabled.
pub fn frontmatter_for(properties: &Properties, enabled: bool) -> Option<Frontmatter> {
    if !enabled || !properties.published.checkbox {
        return None;
    }
    Some(map_properties(properties))
}

fn map_properties(properties: &Properties) -> Frontmatter {
    Frontmatter {
        categories: names(&properties.categories),
        date: properties
            .date
            .date
            .as_ref()
            .map(|value| value.start.clone())
            .unwrap_or_default(),
        tags: names(&properties.tags),
        title: properties
            .title
            .title
            .first()
            .map(|run| run.plain_text.clone())
            .unwrap_or_else(|| UNTITLED.to_string()),
        url: properties.url.url.clone().unwrap_or_default(),
        published: properties.published.checkbox,
    }
}

fn names(property: &MultiSelectProperty) -> Vec<String> {
    property
        .multi_select
        .iter()
        .map(|option| option.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn published_properties() -> Properties {
        serde_json::from_value(json!({
            "Title": {"title": [{"plain_text": "Field notes", "annotations": {}}]},
            "Date": {"date": {"start": "2024-05-01"}},
            "Tags": {"multi_select": [{"name": "rust"}, {"name": "notes"}]},
            "Categories": {"multi_select": [{"name": "engineering"}]},
            "URL": {"url": "https://example.com/field-notes"},
            "Published": {"checkbox": true}
        }))
        .expect("properties")
    }

    #[test]
    fn published_page_maps_every_field_in_order() {
        let frontmatter =
            frontmatter_for(&published_properties(), true).expect("header for published page");
        assert_eq!(frontmatter.title, "Field notes");
        assert_eq!(frontmatter.date, "2024-05-01");
        assert_eq!(frontmatter.tags, vec!["rust", "notes"]);
        assert_eq!(frontmatter.categories, vec!["engineering"]);
        assert_eq!(frontmatter.url, "https://example.com/field-notes");
        assert!(frontmatter.published);
    }

    #[test]
    fn missing_title_falls_back_to_the_placeholder() {
        let properties: Properties = serde_json::from_value(json!({
            "Published": {"checkbox": true}
        }))
        .expect("properties");
        let frontmatter = frontmatter_for(&properties, true).expect("header");
        assert_eq!(frontmatter.title, UNTITLED);
        assert_eq!(frontmatter.date, "");
        assert_eq!(frontmatter.url, "");
        assert!(frontmatter.tags.is_empty());
    }

    #[test]
    fn unpublished_page_yields_no_header() {
        let properties: Properties = serde_json::from_value(json!({
            "Published": {"checkbox": false}
        }))
        .expect("properties");
        assert!(frontmatter_for(&properties, true).is_none());
    }

    #[test]
    fn disabled_emission_yields_no_header() {
        assert!(frontmatter_for(&published_properties(), false).is_none());
    }

    #[test]
    fn serializes_as_one_json_object_in_fixed_field_order() {
        let frontmatter = frontmatter_for(&published_properties(), true).expect("header");
        let serialized = serde_json::to_string(&frontmatter).expect("serialized header");
        assert_eq!(
            serialized,
            r#"{"categories":["engineering"],"date":"2024-05-01","tags":["rust","notes"],"title":"Field notes","url":"https://example.com/field-notes","published":true}"#
        );
    }
}
