use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use indexmap::IndexSet;

use crate::model::category::Category;
use crate::model::config::KioskConfig;
use crate::model::payload::RawItem;
use crate::model::row::Row;
use crate::ops::build::DataWarning;

/// Normalize every item belonging to the given categories into rows.
///
/// Categories must already be flattened. The "new" cutoff is computed once
/// per pass so the flag is consistent across the whole run. Items missing a
/// required field or carrying an unparseable date are skipped with a
/// warning. Marks `num_rows` and `has_new` on the owning category (the
/// immediate category only; ancestor aggregation happens in the menu).
pub fn enrich(
    categories: &mut [Category],
    items: &[RawItem],
    config: &KioskConfig,
    now: DateTime<Utc>,
    warnings: &mut Vec<DataWarning>,
) -> Vec<Row> {
    let cutoff = now - Duration::days(config.directory.new_window_days);
    let mut rows = Vec::new();
    let mut next_id: u64 = 0;

    for category in categories.iter_mut() {
        let mut count = 0;
        for item in items {
            let (Some(item_cat), Some(cat_id)) = (item.category.as_deref(), category.id.as_deref())
            else {
                continue;
            };
            if item_cat != cat_id {
                continue;
            }
            match prepare_row(item, category, config, cutoff, next_id) {
                Ok(row) => {
                    if row.is_new {
                        category.has_new = true;
                    }
                    rows.push(row);
                    next_id += 1;
                    count += 1;
                }
                Err(warning) => warnings.push(warning),
            }
        }
        category.num_rows = count;
    }

    rows
}

/// Build one normalized row from a raw item under its owning category.
fn prepare_row(
    item: &RawItem,
    category: &Category,
    config: &KioskConfig,
    cutoff: DateTime<Utc>,
    id: u64,
) -> Result<Row, DataWarning> {
    let ident = item_ident(item);

    let Some(title) = item.title.clone() else {
        return Err(DataWarning::ItemMissingField {
            item: ident,
            field: "title",
        });
    };
    let Some(url) = item.url.clone() else {
        return Err(DataWarning::ItemMissingField {
            item: ident,
            field: "url",
        });
    };
    let Some(date) = item.date.as_deref() else {
        return Err(DataWarning::ItemMissingField {
            item: ident,
            field: "date",
        });
    };
    let Some(timestamp) = parse_timestamp(date) else {
        return Err(DataWarning::ItemBadDate {
            item: ident,
            date: date.to_string(),
        });
    };

    let mut memberships = vec![category.slug.clone()];
    if let Some(parent) = &category.parent {
        memberships.push(parent.clone());
    }

    let image_path = match &item.img {
        Some(img) => format!("{}{}", config.assets.image_prefix, img),
        None => config.assets.placeholder_image.clone(),
    };

    Ok(Row {
        id,
        title,
        description: word_limit(
            item.description.as_deref().unwrap_or(""),
            config.directory.description_word_limit,
        ),
        tags: parse_tags(item.tags.as_deref()),
        image_path,
        link_url: url,
        timestamp,
        is_new: timestamp > cutoff,
        is_featured: item.featured,
        memberships,
    })
}

/// Best-effort identifier for an item in warnings.
fn item_ident(item: &RawItem) -> String {
    item.title
        .clone()
        .or_else(|| item.url.clone())
        .unwrap_or_else(|| "<untitled>".to_string())
}

/// Lowercase a comma-separated tag string into an ordered set. Entries are
/// trimmed; empty entries are dropped.
fn parse_tags(raw: Option<&str>) -> IndexSet<String> {
    match raw {
        Some(s) => s
            .to_lowercase()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect(),
        None => IndexSet::new(),
    }
}

/// Keep the first `limit` whitespace-separated words, rejoined with single
/// spaces, appending `...` when anything was dropped.
fn word_limit(text: &str, limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > limit {
        let mut out = words[..limit].join(" ");
        out.push_str("...");
        out
    } else {
        words.join(" ")
    }
}

/// Parse the payload date formats seen in the wild. Dates without a time
/// component resolve to midnight UTC.
fn parse_timestamp(date: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date, fmt) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(date, fmt) {
            return Some(Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)));
        }
    }
    None
}
