use std::str::FromStr;

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};

use crate::model::category::Category;
use crate::model::directory::DirectoryIndex;
use crate::model::row::Row;

/// Error type for filter and sort transitions
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("unknown filter mode: {0}")]
    UnknownFilterMode(String),
    #[error("filter mode '{0}' requires a criterion")]
    MissingCriterion(&'static str),
    #[error("unknown sort mode: {0}")]
    UnknownSortMode(String),
    #[error("invalid search pattern: {0}")]
    BadSearchPattern(#[from] regex::Error),
}

/// The active filter, carrying its criterion. Exactly one filter is active
/// at a time; switching modes replaces the prior filter entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterMode {
    Featured,
    New,
    /// Category slug
    Category(String),
    /// Tag, decoded and lowercased
    Tag(String),
    /// Raw search query
    Search(String),
}

impl FilterMode {
    /// Resolve a (mode, criterion) pair as delivered by an external caller.
    /// Unknown mode names are a configuration error, never a silent default.
    pub fn from_parts(mode: &str, criterion: Option<&str>) -> Result<FilterMode, FilterError> {
        match mode {
            "featured" => Ok(FilterMode::Featured),
            "new" => Ok(FilterMode::New),
            "category" => Ok(FilterMode::Category(required(criterion, "category")?)),
            "tag" => Ok(FilterMode::Tag(required(criterion, "tag")?)),
            "search" => Ok(FilterMode::Search(required(criterion, "search")?)),
            other => Err(FilterError::UnknownFilterMode(other.to_string())),
        }
    }
}

fn required(criterion: Option<&str>, mode: &'static str) -> Result<String, FilterError> {
    criterion
        .map(String::from)
        .ok_or(FilterError::MissingCriterion(mode))
}

/// The active ordering rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Newest first
    #[default]
    Date,
    /// Case-insensitive, ascending
    Title,
    /// Featured rows first
    Featured,
}

impl FromStr for SortMode {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(SortMode::Date),
            "title" => Ok(SortMode::Title),
            "featured" => Ok(SortMode::Featured),
            other => Err(FilterError::UnknownSortMode(other.to_string())),
        }
    }
}

/// The filter/sort state machine over the master row collection.
///
/// Owns the `DirectoryIndex` and the flattened category table. Every filter
/// transition rebuilds the visible set from the full index (filters never
/// compose), then re-sorts it by the current sort mode and recomputes the
/// display title, counter and canonical route. Sort transitions reorder the
/// current visible set in place without re-deriving it. Transitions run to
/// completion under `&mut self`, so a single owner gets them serialized for
/// free.
pub struct FilterEngine {
    index: DirectoryIndex,
    categories: IndexMap<String, Category>,
    filter: FilterMode,
    sort: SortMode,
    visible: Vec<usize>,
    title: String,
    route: String,
}

impl FilterEngine {
    /// Create an engine over the given index. The startup view is the
    /// default `featured` filter sorted by date, at the empty route.
    pub fn new(index: DirectoryIndex, categories: IndexMap<String, Category>) -> FilterEngine {
        let mut engine = FilterEngine {
            index,
            categories,
            filter: FilterMode::Featured,
            sort: SortMode::default(),
            visible: Vec::new(),
            title: String::new(),
            route: String::new(),
        };
        engine.rebuild(FilterMode::Featured, &|row| row.is_featured);
        engine
    }

    /// Switch to a new filter. The visible set is always re-derived from
    /// the full index, never from the previously filtered subset.
    pub fn apply_filter(&mut self, filter: FilterMode) -> Result<(), FilterError> {
        match filter {
            FilterMode::Featured => self.rebuild(FilterMode::Featured, &|row| row.is_featured),
            FilterMode::New => self.rebuild(FilterMode::New, &|row| row.is_new),
            FilterMode::Category(slug) => {
                let pred = {
                    let slug = slug.clone();
                    move |row: &Row| row.memberships.iter().any(|m| *m == slug)
                };
                self.rebuild(FilterMode::Category(slug), &pred);
            }
            FilterMode::Tag(raw) => {
                let tag = decode_tag(&raw);
                let pred = {
                    let tag = tag.clone();
                    move |row: &Row| row.tags.contains(&tag)
                };
                self.rebuild(FilterMode::Tag(tag), &pred);
            }
            FilterMode::Search(query) => {
                let re = build_search_pattern(&query)?;
                let pred = move |row: &Row| {
                    re.is_match(&row.title)
                        || re.is_match(&row.description)
                        || re.is_match(&row.tags_joined())
                };
                self.rebuild(FilterMode::Search(query), &pred);
            }
        }
        Ok(())
    }

    /// External filter-request entry point: a mode tag plus an already
    /// resolved criterion, as delivered by the route or UI collaborator.
    pub fn on_filter_requested(
        &mut self,
        mode: &str,
        criterion: Option<&str>,
    ) -> Result<(), FilterError> {
        self.apply_filter(FilterMode::from_parts(mode, criterion)?)
    }

    /// Change the sort order, reordering the currently visible subset in
    /// place. Membership is untouched.
    pub fn apply_sort(&mut self, sort: SortMode) {
        if self.sort != sort {
            self.sort = sort;
            self.sort_visible();
        }
    }

    /// The currently visible rows, in display order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.visible.iter().map(|&i| &self.index.rows()[i])
    }

    /// Display title for the current view.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of visible rows.
    pub fn count(&self) -> usize {
        self.visible.len()
    }

    /// The canonical route for the current view, for the router collaborator.
    /// Tag transitions deliberately leave this at its previous value.
    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn filter(&self) -> &FilterMode {
        &self.filter
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn index(&self) -> &DirectoryIndex {
        &self.index
    }

    pub fn categories(&self) -> &IndexMap<String, Category> {
        &self.categories
    }

    fn rebuild(&mut self, filter: FilterMode, predicate: &dyn Fn(&Row) -> bool) {
        let keep: Vec<usize> = self
            .index
            .rows()
            .iter()
            .enumerate()
            .filter(|&(_, row)| predicate(row))
            .map(|(i, _)| i)
            .collect();
        self.visible = keep;
        self.sort_visible();
        self.title = self.title_for(&filter);
        if let Some(route) = self.route_for(&filter) {
            self.route = route;
        }
        self.filter = filter;
    }

    fn sort_visible(&mut self) {
        let rows = self.index.rows();
        match self.sort {
            SortMode::Date => self
                .visible
                .sort_by(|&a, &b| rows[b].timestamp.cmp(&rows[a].timestamp)),
            SortMode::Title => self.visible.sort_by(|&a, &b| {
                rows[a]
                    .title
                    .to_lowercase()
                    .cmp(&rows[b].title.to_lowercase())
            }),
            SortMode::Featured => self.visible.sort_by_key(|&i| !rows[i].is_featured),
        }
    }

    fn title_for(&self, filter: &FilterMode) -> String {
        match filter {
            FilterMode::Featured => "Featured".to_string(),
            FilterMode::New => "New".to_string(),
            FilterMode::Category(slug) => self
                .categories
                .get(slug)
                .map(|c| c.title.clone())
                .unwrap_or_else(|| slug.clone()),
            FilterMode::Tag(tag) => tag.clone(),
            FilterMode::Search(query) => format!("Search results for {}", query),
        }
    }

    /// Canonical route for a filter, if the mode emits one. Tag filters do
    /// not alter the route.
    fn route_for(&self, filter: &FilterMode) -> Option<String> {
        match filter {
            FilterMode::Featured => Some(String::new()),
            FilterMode::New => Some("new".to_string()),
            FilterMode::Category(slug) => Some(
                self.categories
                    .get(slug)
                    .map(|c| c.link.clone())
                    .unwrap_or_else(|| format!("category/{}", slug)),
            ),
            FilterMode::Search(query) => Some(format!("search/{}", query)),
            FilterMode::Tag(_) => None,
        }
    }
}

/// Tag criteria arrive with literal `%20` for spaces; only the first
/// occurrence is rewritten. This is a literal substring replace, not
/// URL-decoding.
fn decode_tag(raw: &str) -> String {
    raw.replacen("%20", " ", 1).to_lowercase()
}

/// Compile a search query: trimmed, with every space becoming an
/// alternation, so "foo bar" matches rows containing "foo" OR "bar".
/// A query that is empty after trimming matches every row.
fn build_search_pattern(query: &str) -> Result<Regex, FilterError> {
    let pattern = query.trim().replace(' ', "|");
    Ok(RegexBuilder::new(&pattern).case_insensitive(true).build()?)
}
