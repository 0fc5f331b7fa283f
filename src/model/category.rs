use serde::Serialize;

/// A category node after flattening, with all derived identity filled in.
///
/// Built once from the payload tree; `num_rows` and `has_new` are filled
/// during row enrichment, and the struct is never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    /// Wire id, used only to attach items. Absent ids attach nothing.
    pub id: Option<String>,
    pub title: String,
    /// Derived from `title`: lowercased, whitespace and slashes become `-`.
    pub slug: String,
    /// Slug of the immediate parent. `None` for roots.
    pub parent: Option<String>,
    /// Full link path of the immediate parent. `None` for roots.
    pub parent_link: Option<String>,
    /// Full hierarchical link path, e.g. `category/tools/editors`.
    pub link: String,
    /// Nesting depth. Roots are 0.
    pub depth: usize,
    /// Number of direct children in the source tree.
    pub child_count: usize,
    /// Number of rows attached directly to this category.
    pub num_rows: usize,
    /// Whether any directly-attached row is new. Ancestor aggregation is
    /// the menu's job, not this field's.
    pub has_new: bool,
}

impl Category {
    /// Whether the category survives pruning: it must hold at least one row
    /// or have at least one child in the source tree.
    pub fn is_retained(&self) -> bool {
        self.num_rows > 0 || self.child_count > 0
    }
}
