use crate::model::category::Category;
use crate::model::payload::RawCategory;
use crate::ops::build::DataWarning;

/// Maximum category nesting depth. The payload tree is assumed acyclic;
/// hitting this bound means the input is malformed or cyclic.
pub const MAX_DEPTH: usize = 32;

/// Error type for category tree flattening
#[derive(Debug, thiserror::Error)]
pub enum FlattenError {
    #[error("category tree nests deeper than {max} levels under \"{title}\"; the tree is likely cyclic")]
    TooDeep { title: String, max: usize },
}

/// Derive a category slug from its title: lowercased, with every whitespace
/// character and both slash kinds replaced by `-`.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '-'
            } else {
                c
            }
        })
        .collect()
}

/// Flatten a nested category tree into a pre-order sequence of decorated
/// categories.
///
/// Each node gets its derived slug and full link path; children are stamped
/// with their parent's slug and link before descent. The input is never
/// mutated. Categories without a title cannot derive a slug and are skipped
/// with a warning, dropping their subtree.
pub fn flatten(
    categories: &[RawCategory],
    warnings: &mut Vec<DataWarning>,
) -> Result<Vec<Category>, FlattenError> {
    let mut flat = Vec::new();
    for node in categories {
        visit(node, None, 0, &mut flat, warnings)?;
    }
    Ok(flat)
}

/// Pre-order visit of one node. `parent` carries the immediate parent's
/// (slug, link), exactly what gets stamped onto this node.
fn visit(
    node: &RawCategory,
    parent: Option<(&str, &str)>,
    depth: usize,
    flat: &mut Vec<Category>,
    warnings: &mut Vec<DataWarning>,
) -> Result<(), FlattenError> {
    let Some(title) = node.title.as_deref() else {
        warnings.push(DataWarning::CategoryMissingTitle {
            parent: parent.map(|(slug, _)| slug.to_string()),
        });
        return Ok(());
    };

    if depth >= MAX_DEPTH {
        return Err(FlattenError::TooDeep {
            title: title.to_string(),
            max: MAX_DEPTH,
        });
    }

    let slug = slugify(title);
    let link = match parent {
        Some((_, parent_link)) => format!("{}/{}", parent_link, slug),
        None => format!("category/{}", slug),
    };

    flat.push(Category {
        id: node.id.clone(),
        title: title.to_string(),
        slug: slug.clone(),
        parent: parent.map(|(s, _)| s.to_string()),
        parent_link: parent.map(|(_, l)| l.to_string()),
        link: link.clone(),
        depth,
        child_count: node.children.len(),
        num_rows: 0,
        has_new: false,
    });

    for child in &node.children {
        visit(child, Some((&slug, &link)), depth + 1, flat, warnings)?;
    }
    Ok(())
}
