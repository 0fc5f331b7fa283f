use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::model::category::Category;
use crate::model::config::KioskConfig;
use crate::model::directory::DirectoryIndex;
use crate::model::payload::Payload;
use crate::ops::enrich::enrich;
use crate::ops::flatten::{FlattenError, flatten};
use crate::ops::menu::{MenuIndex, build_menu};

/// A data-integrity warning produced while building the directory.
///
/// Warnings are non-fatal: the offending entity is skipped and the rest of
/// the payload still builds.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum DataWarning {
    /// Category without a title; its whole subtree is dropped
    #[serde(rename = "category_missing_title")]
    CategoryMissingTitle { parent: Option<String> },
    /// Two categories derived the same slug; the first keeps the name
    #[serde(rename = "duplicate_slug")]
    DuplicateSlug { slug: String },
    /// Item missing a required field
    #[serde(rename = "item_missing_field")]
    ItemMissingField { item: String, field: &'static str },
    /// Item date that could not be parsed
    #[serde(rename = "item_bad_date")]
    ItemBadDate { item: String, date: String },
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataWarning::CategoryMissingTitle { parent: Some(p) } => {
                write!(f, "category under \"{}\" has no title; subtree dropped", p)
            }
            DataWarning::CategoryMissingTitle { parent: None } => {
                write!(f, "top-level category has no title; subtree dropped")
            }
            DataWarning::DuplicateSlug { slug } => {
                write!(f, "duplicate category slug \"{}\"; first occurrence wins", slug)
            }
            DataWarning::ItemMissingField { item, field } => {
                write!(f, "item \"{}\" is missing required field '{}'", item, field)
            }
            DataWarning::ItemBadDate { item, date } => {
                write!(f, "item \"{}\" has unparseable date \"{}\"", item, date)
            }
        }
    }
}

/// Everything derived from one payload: the pruned category table keyed by
/// slug, the master row index, the navigation model, and any warnings
/// produced along the way.
#[derive(Debug)]
pub struct DirectoryData {
    pub categories: IndexMap<String, Category>,
    pub index: DirectoryIndex,
    pub menu: MenuIndex,
    pub warnings: Vec<DataWarning>,
}

/// Run the full normalization pipeline: flatten the category tree, enrich
/// every item into a row, prune empty leaf categories, and build the menu.
/// Warnings are logged as they are collected.
pub fn build_directory(
    payload: &Payload,
    config: &KioskConfig,
    now: DateTime<Utc>,
) -> Result<DirectoryData, FlattenError> {
    let mut warnings = Vec::new();

    let mut categories = flatten(&payload.categories, &mut warnings)?;
    let rows = enrich(&mut categories, &payload.items, config, now, &mut warnings);

    // empty leaves disappear; anything with rows or children stays
    let retained: Vec<Category> = categories
        .into_iter()
        .filter(|c| c.is_retained())
        .collect();

    let menu = build_menu(&retained, &rows);

    let mut by_slug: IndexMap<String, Category> = IndexMap::with_capacity(retained.len());
    for category in retained {
        if by_slug.contains_key(&category.slug) {
            warnings.push(DataWarning::DuplicateSlug {
                slug: category.slug.clone(),
            });
            continue;
        }
        by_slug.insert(category.slug.clone(), category);
    }

    for warning in &warnings {
        log::warn!("{}", warning);
    }

    Ok(DirectoryData {
        categories: by_slug,
        index: DirectoryIndex::new(rows),
        menu,
        warnings,
    })
}
