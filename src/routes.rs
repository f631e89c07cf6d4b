//! Deep-link routes.
//!
//! Two screens are addressable from outside the app:
//!
//! | Link                          | Route                      |
//! |-------------------------------|----------------------------|
//! | `tunescout://search/paramore` | search, pre-filled term    |
//! | `tunescout://favorites`       | favorites list             |
//!
//! The scheme prefix is optional, as is the `--/` segment development
//! servers insert before the path (`exp://127.0.0.1:19000/--/search/x`).

use std::fmt;

use crate::error::{Error, Result};

/// URL scheme used when printing links
pub const LINK_SCHEME: &str = "tunescout";

/// An addressable screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Search screen with an initial term (may be empty)
    Search { term: String },
    /// Favorites list
    Favorites,
}

impl Route {
    /// Parse a deep link or bare path.
    pub fn parse(link: &str) -> Result<Self> {
        let path = strip_prefix(link.trim());

        // Ignore query string and fragment
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.split('/').filter(|s| !s.is_empty());

        let route = match (segments.next(), segments.next(), segments.next()) {
            (Some("search"), None, None) => Route::Search {
                term: String::new(),
            },
            (Some("search"), Some(term), None) => Route::Search {
                term: decode(term)?,
            },
            (Some("favorites"), None, None) => Route::Favorites,
            _ => return Err(Error::invalid_route(link)),
        };

        Ok(route)
    }

    /// Link that opens this route.
    pub fn to_link(&self) -> String {
        format!("{LINK_SCHEME}://{self}")
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Search { term } => write!(f, "search/{}", urlencoding::encode(term)),
            Route::Favorites => f.write_str("favorites"),
        }
    }
}

/// Drop `scheme://host` (or `scheme:`) and a leading `--/` segment.
fn strip_prefix(link: &str) -> &str {
    let rest = match link.split_once("://") {
        // Custom schemes put the route where the host would be
        // (`tunescout://search/x`); dev servers put a real host first
        // and mark the route with `--/`.
        Some((_, rest)) => match rest.split_once("/--/") {
            Some((_, path)) => path,
            None => rest,
        },
        None => link,
    };
    rest.trim_start_matches('/').trim_start_matches("--/")
}

fn decode(segment: &str) -> Result<String> {
    // `+` is how form-style links encode spaces
    let segment = segment.replace('+', " ");
    urlencoding::decode(&segment)
        .map(|s| s.into_owned())
        .map_err(|_| Error::invalid_route(segment.clone()))
}
