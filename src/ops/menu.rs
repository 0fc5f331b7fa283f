use std::collections::HashMap;

use serde::Serialize;

use crate::model::category::Category;
use crate::model::row::Row;

/// One entry in the navigation, in display (pre-order) sequence.
#[derive(Debug, Clone, Serialize)]
pub struct MenuEntry {
    pub slug: String,
    pub title: String,
    pub link: String,
    pub depth: usize,
    /// Own direct rows plus all descendant rows.
    pub count: usize,
    /// True when this category or any descendant holds a new row.
    pub has_new: bool,
}

/// The count-annotated navigation model handed to the menu renderer,
/// including the synthetic Featured and New entry counters.
#[derive(Debug, Clone, Serialize)]
pub struct MenuIndex {
    pub entries: Vec<MenuEntry>,
    pub featured_count: usize,
    pub featured_has_new: bool,
    pub new_count: usize,
}

/// Build the navigation model from the pruned pre-order category list and
/// the full row set.
///
/// Badge counts start at each category's own direct row count; descendant
/// totals are then folded into parents bottom-up, and `has_new` flags
/// propagate ancestor-ward to the root.
pub fn build_menu(categories: &[Category], rows: &[Row]) -> MenuIndex {
    let mut entries: Vec<MenuEntry> = categories
        .iter()
        .map(|c| MenuEntry {
            slug: c.slug.clone(),
            title: c.title.clone(),
            link: c.link.clone(),
            depth: c.depth,
            count: c.num_rows,
            has_new: c.has_new,
        })
        .collect();

    let mut index_of: HashMap<&str, usize> = HashMap::new();
    for (i, c) in categories.iter().enumerate() {
        index_of.entry(c.slug.as_str()).or_insert(i);
    }

    // Pre-order puts every parent before its children, so a reverse walk
    // folds each fully-accumulated subtree into its parent exactly once.
    for i in (0..entries.len()).rev() {
        let Some(parent_slug) = categories[i].parent.as_deref() else {
            continue;
        };
        let Some(&p) = index_of.get(parent_slug) else {
            continue;
        };
        entries[p].count += entries[i].count;
        if entries[i].has_new {
            entries[p].has_new = true;
        }
    }

    let featured_count = rows.iter().filter(|r| r.is_featured).count();
    let featured_has_new = rows.iter().any(|r| r.is_featured && r.is_new);
    let new_count = rows.iter().filter(|r| r.is_new).count();

    MenuIndex {
        entries,
        featured_count,
        featured_has_new,
        new_count,
    }
}
