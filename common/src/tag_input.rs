//! Tag chip input with server-side autocomplete.
//!
//! The committed value is the same comma-separated string the entity form
//! stores; this state only tracks the text being typed and the suggestion
//! dropdown.

use crate::form::{join_tags, parse_tags};
use crate::model::tag::Tag;
use crate::search::TagListQuery;

/// Maximum number of suggestions requested per lookup.
pub const SUGGESTION_LIMIT: usize = 5;

/// Keys the input reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey {
    Enter,
    Comma,
    Backspace,
    ArrowDown,
    ArrowUp,
    Escape,
}

impl TagKey {
    pub fn from_key_name(key: &str) -> Option<TagKey> {
        match key {
            "Enter" => Some(TagKey::Enter),
            "," => Some(TagKey::Comma),
            "Backspace" => Some(TagKey::Backspace),
            "ArrowDown" => Some(TagKey::ArrowDown),
            "ArrowUp" => Some(TagKey::ArrowUp),
            "Escape" => Some(TagKey::Escape),
            _ => None,
        }
    }

    /// Whether the browser's default action must be suppressed.
    pub fn prevents_default(&self) -> bool {
        matches!(self, TagKey::Enter | TagKey::Comma | TagKey::ArrowDown | TagKey::ArrowUp)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagInputState {
    pub input: String,
    pub suggestions: Vec<Tag>,
    pub show_suggestions: bool,
    pub selected_index: usize,
}

impl TagInputState {
    /// Records typed text and returns the lookup to schedule, if any.
    ///
    /// Blank input clears the dropdown without a request.
    pub fn set_input(&mut self, input: String) -> Option<TagListQuery> {
        self.input = input;
        self.show_suggestions = true;
        if self.input.trim().is_empty() {
            self.suggestions.clear();
            return None;
        }
        Some(TagListQuery {
            q: self.input.clone(),
            limit: SUGGESTION_LIMIT,
        })
    }

    /// Stores a lookup result, hiding tags already present in `value`.
    pub fn receive_suggestions(&mut self, found: Vec<Tag>, value: &str) {
        let current = parse_tags(value);
        self.suggestions = found
            .into_iter()
            .filter(|tag| !current.contains(&tag.name))
            .collect();
        self.selected_index = 0;
    }

    pub fn highlight(&mut self, index: usize) {
        if index < self.suggestions.len() {
            self.selected_index = index;
        }
    }

    pub fn hide_suggestions(&mut self) {
        self.show_suggestions = false;
    }

    pub fn focus(&mut self) {
        if !self.input.is_empty() {
            self.show_suggestions = true;
        }
    }

    /// Appends `tag` to `value` and resets the typed text. Returns the new value.
    pub fn add_tag(&mut self, value: &str, tag: &str) -> String {
        let mut tags = parse_tags(value);
        tags.push(tag.to_string());
        self.input.clear();
        self.suggestions.clear();
        self.show_suggestions = false;
        join_tags(&tags)
    }

    /// Removes the tag at `index` from `value`. Returns the new value.
    pub fn remove_tag(&self, value: &str, index: usize) -> String {
        let mut tags = parse_tags(value);
        if index < tags.len() {
            tags.remove(index);
        }
        join_tags(&tags)
    }

    /// Applies a key press. Returns the new value when it changed.
    pub fn key(&mut self, key: TagKey, value: &str) -> Option<String> {
        match key {
            TagKey::Enter | TagKey::Comma => {
                if self.show_suggestions && !self.suggestions.is_empty() {
                    let index = self.selected_index.min(self.suggestions.len() - 1);
                    let name = self.suggestions[index].name.clone();
                    Some(self.add_tag(value, &name))
                } else if !self.input.trim().is_empty() {
                    let typed = self.input.trim().to_string();
                    Some(self.add_tag(value, &typed))
                } else {
                    None
                }
            }
            TagKey::Backspace => {
                let count = parse_tags(value).len();
                if self.input.is_empty() && count > 0 {
                    Some(self.remove_tag(value, count - 1))
                } else {
                    None
                }
            }
            TagKey::ArrowDown => {
                if !self.suggestions.is_empty() {
                    self.selected_index = (self.selected_index + 1) % self.suggestions.len();
                }
                None
            }
            TagKey::ArrowUp => {
                let len = self.suggestions.len();
                if len > 0 {
                    self.selected_index = (self.selected_index + len - 1) % len;
                }
                None
            }
            TagKey::Escape => {
                self.show_suggestions = false;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tag::TagId;

    fn tags(names: &[&str]) -> Vec<Tag> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Tag {
                id: TagId(i as i64 + 1),
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn blank_input_does_not_query() {
        let mut state = TagInputState::default();
        assert!(state.set_input("  ".into()).is_none());
        let query = state.set_input("ru".into()).unwrap();
        assert_eq!(query.q, "ru");
        assert_eq!(query.limit, SUGGESTION_LIMIT);
    }

    #[test]
    fn suggestions_skip_tags_already_chosen() {
        let mut state = TagInputState::default();
        state.set_input("r".into());
        state.receive_suggestions(tags(&["rust", "ruby", "react"]), "ruby, go");
        let names: Vec<_> = state.suggestions.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["rust", "react"]);
    }

    #[test]
    fn enter_adds_the_highlighted_suggestion() {
        let mut state = TagInputState::default();
        state.set_input("r".into());
        state.receive_suggestions(tags(&["rust", "react"]), "");
        state.key(TagKey::ArrowDown, "");
        let value = state.key(TagKey::Enter, "go").unwrap();
        assert_eq!(value, "go, react");
        assert!(state.input.is_empty());
        assert!(!state.show_suggestions);
    }

    #[test]
    fn comma_commits_typed_text_without_suggestions() {
        let mut state = TagInputState::default();
        state.set_input(" wasm ".into());
        assert_eq!(state.key(TagKey::Comma, "rust").unwrap(), "rust, wasm");
    }

    #[test]
    fn backspace_on_empty_input_removes_last_tag() {
        let mut state = TagInputState::default();
        assert_eq!(state.key(TagKey::Backspace, "a, b, c").unwrap(), "a, b");
        state.set_input("x".into());
        assert!(state.key(TagKey::Backspace, "a, b").is_none());
    }

    #[test]
    fn arrows_wrap_and_tolerate_empty_lists() {
        let mut state = TagInputState::default();
        state.key(TagKey::ArrowDown, "");
        state.key(TagKey::ArrowUp, "");
        assert_eq!(state.selected_index, 0);

        state.set_input("r".into());
        state.receive_suggestions(tags(&["a", "b", "c"]), "");
        state.key(TagKey::ArrowUp, "");
        assert_eq!(state.selected_index, 2);
        state.key(TagKey::ArrowDown, "");
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn escape_hides_the_dropdown() {
        let mut state = TagInputState::default();
        state.set_input("r".into());
        state.key(TagKey::Escape, "");
        assert!(!state.show_suggestions);
        state.focus();
        assert!(state.show_suggestions);
    }
}
