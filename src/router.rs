//! Route table and a small in-memory routing engine.
//!
//! Three patterns, one of them carrying a `:id` capture. The engine keeps a
//! history stack of resolved matches; the view layer reads the top of it.

use thiserror::Error;

use crate::catalog::MovieId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    MovieListing,
    MovieDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub pattern: &'static str,
    pub view: View,
}

/// The application's routes. Patterns never overlap, so order is irrelevant.
pub const ROUTES: [RouteEntry; 3] = [
    RouteEntry {
        pattern: paths::HOME,
        view: View::Home,
    },
    RouteEntry {
        pattern: paths::MOVIES,
        view: View::MovieListing,
    },
    RouteEntry {
        pattern: "/details/:id",
        view: View::MovieDetail,
    },
];

pub mod paths {
    use crate::catalog::MovieId;

    pub const HOME: &str = "/";
    pub const MOVIES: &str = "/movies";

    /// Detail path for `id`, escaped so it stays a single segment.
    pub fn details(id: &MovieId) -> String {
        format!("/details/{}", urlencoding::encode(id.as_str()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route matches {0}")]
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub view: View,
    pub path: String,
    params: Vec<(String, String)>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The `:id` capture of a detail route as a catalog id.
    pub fn movie_id(&self) -> Option<MovieId> {
        self.param("id").and_then(|id| MovieId::new(id).ok())
    }
}

/// Splits a path into segments, ignoring query, fragment and one trailing slash.
/// Paths with empty segments (`//`, `/movies//`) are rejected.
fn segments(path: &str) -> Option<Vec<&str>> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let rest = path.strip_prefix('/')?;
    if rest.is_empty() {
        return Some(Vec::new());
    }
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    let parts: Vec<&str> = rest.split('/').collect();
    if parts.iter().any(|part| part.is_empty()) {
        return None;
    }
    Some(parts)
}

impl RouteEntry {
    fn capture(&self, path: &str) -> Option<Vec<(String, String)>> {
        let pattern = segments(self.pattern)?;
        let actual = segments(path)?;
        if pattern.len() != actual.len() {
            return None;
        }

        let mut params = Vec::new();
        for (expected, got) in pattern.iter().zip(actual) {
            match expected.strip_prefix(':') {
                Some(name) => {
                    let value = urlencoding::decode(got).ok()?;
                    params.push((name.to_string(), value.into_owned()));
                }
                None if *expected == got => {}
                None => return None,
            }
        }
        Some(params)
    }
}

/// Finds the route for `path`, or `None` when nothing in [`ROUTES`] matches.
pub fn resolve(path: &str) -> Option<RouteMatch> {
    ROUTES.iter().find_map(|entry| {
        entry.capture(path).map(|params| RouteMatch {
            view: entry.view,
            path: path.to_string(),
            params,
        })
    })
}

/// Navigation state held in memory. Never empty: the root entry is `/`.
#[derive(Debug, Clone)]
pub struct Router {
    history: Vec<RouteMatch>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            history: vec![RouteMatch {
                view: View::Home,
                path: paths::HOME.to_string(),
                params: Vec::new(),
            }],
        }
    }

    pub fn current(&self) -> &RouteMatch {
        // history always holds the root entry
        &self.history[self.history.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Navigates to `path`. Pushing the current path again is a no-op; an
    /// unknown path leaves the current route untouched.
    pub fn push(&mut self, path: &str) -> Result<&RouteMatch, RouteError> {
        let Some(matched) = resolve(path) else {
            tracing::debug!(path, "navigation rejected");
            return Err(RouteError::NotFound(path.to_string()));
        };
        if matched.path != self.current().path {
            tracing::debug!(path, view = ?matched.view, "navigate");
            self.history.push(matched);
        }
        Ok(self.current())
    }

    /// Pops one entry. Returns `None` when already at the root.
    pub fn back(&mut self) -> Option<&RouteMatch> {
        if self.history.len() <= 1 {
            return None;
        }
        self.history.pop();
        tracing::debug!(path = %self.current().path, "navigate back");
        Some(self.current())
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
