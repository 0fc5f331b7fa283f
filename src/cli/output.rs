use serde::Serialize;

use crate::model::row::Row;
use crate::ops::build::DataWarning;
use crate::ops::filter::FilterEngine;
use crate::ops::menu::MenuIndex;
use crate::util::text::{pad_to_width, truncate_to_width};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListingJson<'a> {
    pub title: &'a str,
    pub count: usize,
    pub route: &'a str,
    pub rows: Vec<RowJson<'a>>,
}

#[derive(Serialize)]
pub struct RowJson<'a> {
    pub id: u64,
    pub title: &'a str,
    pub description: &'a str,
    pub tags: Vec<&'a str>,
    pub image: &'a str,
    pub url: &'a str,
    pub date: String,
    pub new: bool,
    pub featured: bool,
    pub categories: &'a [String],
}

#[derive(Serialize)]
pub struct CheckJson<'a> {
    pub valid: bool,
    pub warnings: &'a [DataWarning],
}

pub fn row_to_json(row: &Row) -> RowJson<'_> {
    RowJson {
        id: row.id,
        title: &row.title,
        description: &row.description,
        tags: row.tags.iter().map(String::as_str).collect(),
        image: &row.image_path,
        url: &row.link_url,
        date: row.timestamp.to_rfc3339(),
        new: row.is_new,
        featured: row.is_featured,
        categories: &row.memberships,
    }
}

pub fn listing_to_json<'a>(engine: &'a FilterEngine) -> ListingJson<'a> {
    ListingJson {
        title: engine.title(),
        count: engine.count(),
        route: engine.route(),
        rows: engine.visible_rows().map(row_to_json).collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single row as a one-line summary.
/// `*` marks featured rows, `+` marks new ones.
pub fn format_row_line(row: &Row) -> String {
    let marks = format!(
        "{}{}",
        if row.is_featured { '*' } else { ' ' },
        if row.is_new { '+' } else { ' ' }
    );
    let tags = if row.tags.is_empty() {
        String::new()
    } else {
        format!(
            "  {}",
            row.tags
                .iter()
                .map(|t| format!("#{}", t))
                .collect::<Vec<_>>()
                .join(" ")
        )
    };
    format!(
        "[{}] {}  {}{}",
        marks,
        pad_to_width(&row.title, 28),
        truncate_to_width(&row.description, 48),
        tags
    )
}

/// Format the navigation menu, indented per level, with count badges and
/// `*` markers for branches holding new rows.
pub fn format_menu(menu: &MenuIndex) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "Featured ({}){}",
        menu.featured_count,
        if menu.featured_has_new { " *" } else { "" }
    ));
    lines.push(format!("New ({})", menu.new_count));
    for entry in &menu.entries {
        let indent = "  ".repeat(entry.depth);
        lines.push(format!(
            "{}{} ({}){}",
            indent,
            entry.title,
            entry.count,
            if entry.has_new { " *" } else { "" }
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::menu::MenuEntry;
    use chrono::{TimeZone, Utc};
    use indexmap::IndexSet;

    fn sample_row() -> Row {
        Row {
            id: 7,
            title: "Pixel Kit".to_string(),
            description: "a sprite toolkit".to_string(),
            tags: ["graphics", "sprites"]
                .iter()
                .map(|t| t.to_string())
                .collect::<IndexSet<_>>(),
            image_path: "images/content/pixel.png".to_string(),
            link_url: "http://example.com/pixel".to_string(),
            timestamp: Utc.with_ymd_and_hms(2015, 3, 1, 0, 0, 0).unwrap(),
            is_new: true,
            is_featured: true,
            memberships: vec!["design".to_string(), "tools".to_string()],
        }
    }

    #[test]
    fn test_format_row_line_marks_and_tags() {
        let line = format_row_line(&sample_row());
        assert!(line.starts_with("[*+] Pixel Kit"));
        assert!(line.contains("a sprite toolkit"));
        assert!(line.contains("#graphics #sprites"));
    }

    #[test]
    fn test_format_menu_indents_and_badges() {
        let menu = MenuIndex {
            entries: vec![
                MenuEntry {
                    slug: "tools".to_string(),
                    title: "Tools".to_string(),
                    link: "category/tools".to_string(),
                    depth: 0,
                    count: 3,
                    has_new: true,
                },
                MenuEntry {
                    slug: "design".to_string(),
                    title: "Design".to_string(),
                    link: "category/tools/design".to_string(),
                    depth: 1,
                    count: 2,
                    has_new: false,
                },
            ],
            featured_count: 4,
            featured_has_new: false,
            new_count: 1,
        };
        let lines = format_menu(&menu);
        assert_eq!(lines[0], "Featured (4)");
        assert_eq!(lines[1], "New (1)");
        assert_eq!(lines[2], "Tools (3) *");
        assert_eq!(lines[3], "  Design (2)");
    }

    #[test]
    fn test_row_to_json_shape() {
        let row = sample_row();
        let json = serde_json::to_value(row_to_json(&row)).unwrap();
        assert_eq!(json["title"], "Pixel Kit");
        assert_eq!(json["tags"][0], "graphics");
        assert_eq!(json["featured"], true);
        assert_eq!(json["categories"][1], "tools");
    }
}
