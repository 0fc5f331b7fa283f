use crate::ops::filter::FilterMode;

/// Error type for route parsing
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("unrecognized route: \"{0}\"")]
    Unrecognized(String),
    #[error("route \"{0}\" is missing its criterion")]
    MissingCriterion(String),
}

/// Parse a route fragment into a filter request.
///
/// Grammar: `category/<path>`, `tag/<tag>`, `featured`, `""` (empty means
/// featured), `new`, `search/<query>`. Leading `#` and `/` characters are
/// tolerated. `category/a/b` filters by the last path segment; tag criteria
/// are lowercased at this boundary. Anything else is rejected: an unknown
/// route signals a configuration error, never a silent default.
pub fn parse_route(path: &str) -> Result<FilterMode, RouteError> {
    let fragment = path.trim_start_matches('#').trim_start_matches('/');

    match fragment {
        "" | "featured" => return Ok(FilterMode::Featured),
        "new" => return Ok(FilterMode::New),
        _ => {}
    }

    let (head, rest) = match fragment.split_once('/') {
        Some((head, rest)) => (head, rest),
        None => (fragment, ""),
    };

    match head {
        "category" | "tag" | "search" if rest.is_empty() => {
            Err(RouteError::MissingCriterion(fragment.to_string()))
        }
        "category" => {
            let slug = rest.rsplit('/').next().unwrap_or(rest);
            Ok(FilterMode::Category(slug.to_string()))
        }
        "tag" => Ok(FilterMode::Tag(rest.to_lowercase())),
        "search" => Ok(FilterMode::Search(rest.to_string())),
        _ => Err(RouteError::Unrecognized(path.to_string())),
    }
}
