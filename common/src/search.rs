//! Listing queries and pagination state for the search/list view.

use std::fmt;
use std::str::FromStr;

use crate::model::entity::Entity;

/// Field restriction for the listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    All,
    Name,
    Description,
    Tags,
    Locator,
    Type,
}

impl SearchField {
    pub const ALL: [SearchField; 6] = [
        SearchField::All,
        SearchField::Name,
        SearchField::Description,
        SearchField::Tags,
        SearchField::Locator,
        SearchField::Type,
    ];

    /// Value of the `search_field` parameter; `None` leaves the parameter out
    /// so the backend searches every field.
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            SearchField::All => None,
            SearchField::Name => Some("name"),
            SearchField::Description => Some("description"),
            SearchField::Tags => Some("tags"),
            SearchField::Locator => Some("locator"),
            SearchField::Type => Some("type"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchField::All => "All fields",
            SearchField::Name => "Name",
            SearchField::Description => "Description",
            SearchField::Tags => "Tags",
            SearchField::Locator => "Locator",
            SearchField::Type => "Type",
        }
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(SearchField::All),
            _ => SearchField::ALL
                .into_iter()
                .find(|f| f.as_param() == Some(s))
                .ok_or_else(|| format!("unknown search field '{}'", s)),
        }
    }
}

/// Selectable page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    Twenty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [PageSize::Five, PageSize::Ten, PageSize::Twenty, PageSize::Hundred];

    pub fn get(&self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Hundred => 100,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or_else(|| format!("page size must be one of 5, 10, 20, 100 (got {})", value))
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|_| format!("page size '{}' is not a number", s))?;
        PageSize::try_from(value)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Parameters of `GET /entities/`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityListQuery {
    pub q: String,
    pub search_field: SearchField,
    pub exact_match: bool,
    pub skip: usize,
    pub limit: usize,
}

impl EntityListQuery {
    /// Exact-match lookup of the entities carrying `tag`.
    pub fn for_tag(tag: &str, limit: usize) -> Self {
        Self {
            q: tag.to_string(),
            search_field: SearchField::Tags,
            exact_match: true,
            skip: 0,
            limit,
        }
    }

    /// Query-string pairs; empty or default-valued parameters are left out.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.q.is_empty() {
            pairs.push(("q", self.q.clone()));
        }
        if let Some(field) = self.search_field.as_param() {
            pairs.push(("search_field", field.to_string()));
        }
        if self.exact_match {
            pairs.push(("exact_match", "true".to_string()));
        }
        pairs.push(("skip", self.skip.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

/// Parameters of `GET /tags/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagListQuery {
    pub q: String,
    pub limit: usize,
}

impl TagListQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.q.is_empty() {
            pairs.push(("q", self.q.clone()));
        }
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

/// Offset pagination with a "has more" guess.
///
/// A page shorter than `limit` means the end was reached. A full page sets
/// `has_more` even when nothing follows, so Next may lead to one empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub size: PageSize,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(size: PageSize) -> Self {
        Self {
            page: 0,
            size,
            has_more: true,
        }
    }

    pub fn skip(&self) -> usize {
        self.page * self.size.get()
    }

    pub fn limit(&self) -> usize {
        self.size.get()
    }

    pub fn record_result(&mut self, rows: usize) {
        self.has_more = rows >= self.limit();
    }

    pub fn can_go_back(&self) -> bool {
        self.page > 0
    }

    pub fn next(&mut self) {
        if self.has_more {
            self.page += 1;
        }
    }

    pub fn previous(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn set_size(&mut self, size: PageSize) {
        self.size = size;
        self.page = 0;
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }
}

/// A query issued by [`SearchState::request`], tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub seq: u64,
    pub query: EntityListQuery,
}

/// State of the listing page: query inputs, current page and results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub field: SearchField,
    pub pagination: Pagination,
    pub entities: Vec<Entity>,
    pub loading: bool,
    seq: u64,
}

impl SearchState {
    pub fn new(size: PageSize) -> Self {
        Self {
            query: String::new(),
            field: SearchField::All,
            pagination: Pagination::new(size),
            entities: Vec::new(),
            loading: false,
            seq: 0,
        }
    }

    /// Applies a settled search string. Returns `false` when nothing changed.
    pub fn set_query(&mut self, query: String) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query;
        self.pagination.reset();
        true
    }

    pub fn set_field(&mut self, field: SearchField) -> bool {
        if self.field == field {
            return false;
        }
        self.field = field;
        self.pagination.reset();
        true
    }

    /// Starts a new request; any response for an earlier one becomes stale.
    pub fn request(&mut self) -> ListRequest {
        self.seq += 1;
        self.loading = true;
        ListRequest {
            seq: self.seq,
            query: EntityListQuery {
                q: self.query.clone(),
                search_field: self.field,
                exact_match: false,
                skip: self.pagination.skip(),
                limit: self.pagination.limit(),
            },
        }
    }

    /// Stores the rows for request `seq`. Returns `false` for stale responses.
    pub fn apply(&mut self, seq: u64, entities: Vec<Entity>) -> bool {
        if seq != self.seq {
            log::debug!("dropping stale listing response #{} (latest is #{})", seq, self.seq);
            return false;
        }
        self.pagination.record_result(entities.len());
        self.entities = entities;
        self.loading = false;
        true
    }

    /// Marks request `seq` as failed; the previous rows stay on screen.
    pub fn fail(&mut self, seq: u64) -> bool {
        if seq != self.seq {
            return false;
        }
        self.loading = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::{EntityId, EntityType};

    fn entities(n: usize) -> Vec<Entity> {
        (0..n)
            .map(|i| Entity {
                id: EntityId(i as i64),
                entity_type: EntityType::Website,
                name: format!("e{}", i),
                locator: format!("https://e{}.example", i),
                description: None,
                image_url: None,
                tags: Vec::new(),
                created_at: None,
                updated_at: None,
                attributes: Default::default(),
            })
            .collect()
    }

    #[test]
    fn full_page_sets_has_more_even_without_a_next_row() {
        let mut state = SearchState::new(PageSize::Ten);
        let req = state.request();
        assert_eq!(req.query.limit, 10);
        assert!(state.apply(req.seq, entities(10)));
        assert!(state.pagination.has_more);
    }

    #[test]
    fn short_page_clears_has_more() {
        let mut state = SearchState::new(PageSize::Ten);
        let req = state.request();
        state.apply(req.seq, entities(3));
        assert!(!state.pagination.has_more);

        state.pagination.next();
        assert_eq!(state.pagination.page, 0, "next is a no-op at the end");
    }

    #[test]
    fn skip_is_page_times_limit() {
        let mut state = SearchState::new(PageSize::Twenty);
        state.pagination.next();
        state.pagination.next();
        assert_eq!(state.request().query.skip, 40);
    }

    #[test]
    fn changing_query_field_or_size_resets_to_first_page() {
        let mut state = SearchState::new(PageSize::Five);
        state.pagination.next();
        assert!(state.set_query("rust".into()));
        assert_eq!(state.pagination.page, 0);

        state.pagination.next();
        assert!(state.set_field(SearchField::Tags));
        assert_eq!(state.pagination.page, 0);

        state.pagination.next();
        state.pagination.set_size(PageSize::Hundred);
        assert_eq!(state.pagination.page, 0);

        assert!(!state.set_query("rust".into()));
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut state = SearchState::new(PageSize::Ten);
        let first = state.request();
        let second = state.request();

        assert!(!state.apply(first.seq, entities(10)));
        assert!(state.loading);
        assert!(state.apply(second.seq, entities(2)));
        assert_eq!(state.entities.len(), 2);
        assert!(!state.loading);
    }

    #[test]
    fn query_pairs_leave_out_defaults() {
        let query = EntityListQuery {
            q: String::new(),
            search_field: SearchField::All,
            exact_match: false,
            skip: 0,
            limit: 10,
        };
        assert_eq!(
            query.to_pairs(),
            vec![("skip", "0".to_string()), ("limit", "10".to_string())]
        );

        let tagged = EntityListQuery::for_tag("rust", 50);
        assert_eq!(
            tagged.to_pairs(),
            vec![
                ("q", "rust".to_string()),
                ("search_field", "tags".to_string()),
                ("exact_match", "true".to_string()),
                ("skip", "0".to_string()),
                ("limit", "50".to_string()),
            ]
        );
    }

    #[test]
    fn page_size_accepts_only_the_offered_values() {
        assert_eq!("20".parse::<PageSize>().unwrap(), PageSize::Twenty);
        assert!("7".parse::<PageSize>().is_err());
        assert!("ten".parse::<PageSize>().is_err());
    }

    #[test]
    fn search_field_parses_wire_names() {
        assert_eq!("tags".parse::<SearchField>().unwrap(), SearchField::Tags);
        assert_eq!("all".parse::<SearchField>().unwrap(), SearchField::All);
        assert!("color".parse::<SearchField>().is_err());
    }
}
