use std::str::FromStr;

use chrono::Utc;

use crate::cli::commands::{Cli, Commands, ListArgs, RouteArgs};
use crate::cli::output::{CheckJson, format_menu, format_row_line, listing_to_json};
use crate::io::config_io;
use crate::io::payload_io;
use crate::ops::build::{DirectoryData, build_directory};
use crate::ops::filter::{FilterEngine, FilterMode, SortMode};
use crate::route::parse_route;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    let config = config_io::load_config(cli.config.as_deref())?;
    let payload = payload_io::load_payload(&cli.file)?;
    log::debug!(
        "loaded payload: {} categories, {} items",
        payload.categories.len(),
        payload.items.len()
    );
    let data = build_directory(&payload, &config, Utc::now())?;

    match cli.command {
        Commands::List(args) => cmd_list(args, data, json),
        Commands::Menu => cmd_menu(data, json),
        Commands::Route(args) => cmd_route(args, data, json),
        Commands::Check => cmd_check(data, json),
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, data: DirectoryData, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = filter_from_args(&args)?;
    let sort = SortMode::from_str(&args.sort)?;

    let mut engine = FilterEngine::new(data.index, data.categories);
    engine.apply_sort(sort);
    engine.apply_filter(filter)?;

    print_listing(&engine, json, false)
}

fn cmd_route(args: RouteArgs, data: DirectoryData, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = parse_route(&args.path)?;
    let sort = SortMode::from_str(&args.sort)?;

    let mut engine = FilterEngine::new(data.index, data.categories);
    engine.apply_sort(sort);
    engine.apply_filter(filter)?;

    print_listing(&engine, json, true)
}

fn cmd_menu(data: DirectoryData, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&data.menu)?);
    } else {
        for line in format_menu(&data.menu) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_check(data: DirectoryData, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let result = CheckJson {
            valid: data.warnings.is_empty(),
            warnings: &data.warnings,
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if data.warnings.is_empty() {
        println!(
            "✓ payload is clean ({} rows, {} categories)",
            data.index.len(),
            data.categories.len()
        );
    } else {
        println!("Warnings:");
        for warning in &data.warnings {
            println!("  {}", warning);
        }
        println!("✗ payload has data issues");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the list flags into a single filter. The flags are mutually
/// exclusive; no flag at all means the default featured view.
fn filter_from_args(args: &ListArgs) -> Result<FilterMode, Box<dyn std::error::Error>> {
    let mut selected = Vec::new();
    if let Some(slug) = &args.category {
        selected.push(FilterMode::Category(slug.clone()));
    }
    if let Some(tag) = &args.tag {
        selected.push(FilterMode::Tag(tag.clone()));
    }
    if let Some(query) = &args.search {
        selected.push(FilterMode::Search(query.clone()));
    }
    if args.new {
        selected.push(FilterMode::New);
    }
    if args.featured {
        selected.push(FilterMode::Featured);
    }

    match selected.len() {
        0 => Ok(FilterMode::Featured),
        1 => Ok(selected.remove(0)),
        _ => Err("choose at most one of --category, --tag, --search, --featured, --new".into()),
    }
}

fn print_listing(
    engine: &FilterEngine,
    json: bool,
    show_route: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&listing_to_json(engine))?);
    } else {
        if show_route {
            println!("route: {}", engine.route());
        }
        println!("{} ({})", engine.title(), engine.count());
        for row in engine.visible_rows() {
            println!("{}", format_row_line(row));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_args() -> ListArgs {
        ListArgs {
            category: None,
            tag: None,
            search: None,
            featured: false,
            new: false,
            sort: "date".to_string(),
        }
    }

    #[test]
    fn test_no_flags_default_to_featured() {
        let filter = filter_from_args(&list_args()).unwrap();
        assert_eq!(filter, FilterMode::Featured);
    }

    #[test]
    fn test_single_flag_selected() {
        let mut args = list_args();
        args.tag = Some("design".to_string());
        assert_eq!(
            filter_from_args(&args).unwrap(),
            FilterMode::Tag("design".to_string())
        );
    }

    #[test]
    fn test_conflicting_flags_rejected() {
        let mut args = list_args();
        args.tag = Some("design".to_string());
        args.featured = true;
        assert!(filter_from_args(&args).is_err());
    }
}
