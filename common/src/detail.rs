//! Expand/collapse state of the entity detail page.

use std::collections::BTreeSet;

use crate::model::attribute::AttributeRecord;
use crate::model::entity::Entity;
use crate::model::media::MediaKind;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailView {
    pub main_image_expanded: bool,
    expanded: BTreeSet<String>,
}

impl DetailView {
    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    pub fn toggle(&mut self, key: &str) {
        if !self.expanded.remove(key) {
            self.expanded.insert(key.to_string());
        }
    }

    pub fn toggle_main_image(&mut self) {
        self.main_image_expanded = !self.main_image_expanded;
    }

    /// Expands the main image (when there is one) and every active image
    /// attribute. Other previously expanded keys are collapsed.
    pub fn expand_all(&mut self, entity: &Entity) {
        if entity.image_url.as_deref().is_some_and(|url| !url.is_empty()) {
            self.main_image_expanded = true;
        }
        self.expanded = entity
            .active_attributes()
            .filter(|attr| MediaKind::is_image(&attr.url))
            .map(|attr| attr.key.clone())
            .collect();
    }

    pub fn collapse_all(&mut self) {
        self.main_image_expanded = false;
        self.expanded.clear();
    }
}

/// Attributes shown on the detail page: active ones only, in mapping order.
pub fn visible_attributes(entity: &Entity) -> Vec<&AttributeRecord> {
    entity.active_attributes().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attribute::AttributeMap;
    use crate::model::entity::{EntityId, EntityType};

    fn entity() -> Entity {
        let mut attributes = AttributeMap::new();
        let mut logo = AttributeRecord::new("logo", "current logo");
        logo.url = "http://localhost:8000/media/logo.png".into();
        let mut old_logo = AttributeRecord::new("old_logo", "");
        old_logo.url = "http://localhost:8000/media/old.png".into();
        old_logo.active = false;
        let mut site = AttributeRecord::new("docs", "");
        site.url = "https://docs.example.com".into();
        for attr in [logo, old_logo, site] {
            attributes.insert(attr.key.clone(), attr);
        }
        Entity {
            id: EntityId(1),
            entity_type: EntityType::Software,
            name: "Tool".into(),
            locator: "https://tool.example".into(),
            description: None,
            image_url: Some("http://localhost:8000/media/main.jpg".into()),
            tags: Vec::new(),
            created_at: None,
            updated_at: None,
            attributes,
        }
    }

    #[test]
    fn expand_all_covers_main_image_and_active_image_attributes() {
        let entity = entity();
        let mut view = DetailView::default();
        view.expand_all(&entity);

        assert!(view.main_image_expanded);
        assert!(view.is_expanded("logo"));
        assert!(!view.is_expanded("old_logo"));
        assert!(!view.is_expanded("docs"));

        view.collapse_all();
        assert!(!view.main_image_expanded);
        assert!(!view.is_expanded("logo"));
    }

    #[test]
    fn toggle_flips_one_key() {
        let mut view = DetailView::default();
        view.toggle("logo");
        assert!(view.is_expanded("logo"));
        view.toggle("logo");
        assert!(!view.is_expanded("logo"));
    }

    #[test]
    fn inactive_attributes_are_hidden() {
        let entity = entity();
        let keys: Vec<_> = visible_attributes(&entity).iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["docs", "logo"]);
    }
}
