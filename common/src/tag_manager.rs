//! State of the tag manager page: tag list on the left, the selected tag with
//! its entities on the right.

use crate::model::entity::Entity;
use crate::model::tag::{Tag, TagId};
use crate::search::{EntityListQuery, TagListQuery};

/// Page size of the tag list.
pub const TAG_LIST_LIMIT: usize = 100;
/// Page size of the per-tag entity lookup.
pub const TAG_ENTITIES_LIMIT: usize = 50;

/// Outcome of pressing "save" in the inline rename editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameDecision {
    /// Empty or unchanged name; edit mode was closed without a request.
    Unchanged,
    /// Ask the user, then send the rename.
    Confirm { id: TagId, from: String, to: String, affected: usize },
}

impl RenameDecision {
    pub fn confirmation_message(&self) -> Option<String> {
        match self {
            RenameDecision::Unchanged => None,
            RenameDecision::Confirm { from, to, affected, .. } => Some(format!(
                "Are you sure you want to rename \"{}\" to \"{}\"? This will update {} entities.",
                from, to, affected
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TagManager {
    pub search_query: String,
    pub tags: Vec<Tag>,
    pub loading: bool,
    pub selected: Option<Tag>,
    pub entities: Vec<Entity>,
    pub loading_entities: bool,
    pub editing: bool,
    pub edit_name: String,
}

impl TagManager {
    pub fn list_query(&self) -> TagListQuery {
        TagListQuery {
            q: self.search_query.clone(),
            limit: TAG_LIST_LIMIT,
        }
    }

    pub fn set_search_query(&mut self, query: String) -> TagListQuery {
        self.search_query = query;
        self.loading = true;
        self.list_query()
    }

    pub fn set_tags(&mut self, tags: Vec<Tag>) {
        self.tags = tags;
        self.loading = false;
    }

    pub fn is_selected(&self, id: TagId) -> bool {
        self.selected.as_ref().is_some_and(|tag| tag.id == id)
    }

    /// Selects `tag`, resets the editor and returns the entity lookup to run.
    pub fn select(&mut self, tag: Tag) -> EntityListQuery {
        let query = EntityListQuery::for_tag(&tag.name, TAG_ENTITIES_LIMIT);
        self.edit_name = tag.name.clone();
        self.editing = false;
        self.selected = Some(tag);
        self.loading_entities = true;
        query
    }

    pub fn set_entities(&mut self, entities: Vec<Entity>) {
        self.entities = entities;
        self.loading_entities = false;
    }

    pub fn start_editing(&mut self) {
        if let Some(tag) = &self.selected {
            self.edit_name = tag.name.clone();
            self.editing = true;
        }
    }

    pub fn cancel_editing(&mut self) {
        self.editing = false;
    }

    pub fn rename_decision(&mut self) -> RenameDecision {
        let Some(tag) = &self.selected else {
            self.editing = false;
            return RenameDecision::Unchanged;
        };
        if self.edit_name.trim().is_empty() || self.edit_name == tag.name {
            self.editing = false;
            return RenameDecision::Unchanged;
        }
        RenameDecision::Confirm {
            id: tag.id,
            from: tag.name.clone(),
            to: self.edit_name.clone(),
            affected: self.entities.len(),
        }
    }

    /// Replaces the renamed tag by id and returns the entity lookup under the
    /// new name.
    pub fn apply_renamed(&mut self, updated: Tag) -> EntityListQuery {
        for tag in self.tags.iter_mut() {
            if tag.id == updated.id {
                *tag = updated.clone();
            }
        }
        self.select(updated)
    }

    pub fn delete_confirmation_message(&self) -> Option<String> {
        self.selected.as_ref().map(|tag| {
            format!(
                "Are you sure you want to DELETE \"{}\"? This will remove the tag from {} entities. This action cannot be undone.",
                tag.name,
                self.entities.len()
            )
        })
    }

    /// Drops the tag from the list and clears the detail pane.
    pub fn apply_deleted(&mut self, id: TagId) {
        self.tags.retain(|tag| tag.id != id);
        if self.is_selected(id) {
            self.selected = None;
            self.entities.clear();
            self.editing = false;
            self.edit_name.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchField;

    fn tag(id: i64, name: &str) -> Tag {
        Tag {
            id: TagId(id),
            name: name.into(),
        }
    }

    fn manager_with(tags: Vec<Tag>) -> TagManager {
        let mut manager = TagManager::default();
        manager.set_tags(tags);
        manager
    }

    #[test]
    fn selecting_builds_an_exact_tag_lookup() {
        let mut manager = manager_with(vec![tag(1, "rust")]);
        let query = manager.select(tag(1, "rust"));

        assert_eq!(query.q, "rust");
        assert_eq!(query.search_field, SearchField::Tags);
        assert!(query.exact_match);
        assert_eq!(query.limit, TAG_ENTITIES_LIMIT);
        assert_eq!(manager.edit_name, "rust");
        assert!(manager.loading_entities);
    }

    #[test]
    fn unchanged_or_blank_names_skip_the_request() {
        let mut manager = manager_with(vec![tag(1, "rust")]);
        manager.select(tag(1, "rust"));
        manager.start_editing();
        assert_eq!(manager.rename_decision(), RenameDecision::Unchanged);
        assert!(!manager.editing);

        manager.start_editing();
        manager.edit_name = "  ".into();
        assert_eq!(manager.rename_decision(), RenameDecision::Unchanged);
    }

    #[test]
    fn rename_replaces_by_id_and_requeries_under_the_new_name() {
        let mut manager = manager_with(vec![tag(1, "old"), tag(2, "other")]);
        manager.select(tag(1, "old"));
        manager.start_editing();
        manager.edit_name = "new".into();

        let decision = manager.rename_decision();
        assert_eq!(
            decision,
            RenameDecision::Confirm {
                id: TagId(1),
                from: "old".into(),
                to: "new".into(),
                affected: 0
            }
        );
        assert!(decision.confirmation_message().unwrap().contains("\"old\" to \"new\""));

        let query = manager.apply_renamed(tag(1, "new"));
        assert_eq!(manager.tags, vec![tag(1, "new"), tag(2, "other")]);
        assert_eq!(manager.selected, Some(tag(1, "new")));
        assert!(!manager.editing);
        assert_eq!(query.q, "new");
        assert!(query.exact_match);
    }

    #[test]
    fn delete_clears_the_detail_pane() {
        let mut manager = manager_with(vec![tag(1, "a"), tag(2, "b")]);
        manager.select(tag(2, "b"));
        manager.set_entities(Vec::new());
        assert!(manager.delete_confirmation_message().unwrap().contains("\"b\""));

        manager.apply_deleted(TagId(2));
        assert_eq!(manager.tags, vec![tag(1, "a")]);
        assert!(manager.selected.is_none());
        assert!(manager.entities.is_empty());
    }

    #[test]
    fn tag_list_query_uses_the_search_box() {
        let mut manager = TagManager::default();
        let query = manager.set_search_query("ru".into());
        assert_eq!(query.q, "ru");
        assert_eq!(query.limit, TAG_LIST_LIMIT);
        assert!(manager.loading);
    }
}
