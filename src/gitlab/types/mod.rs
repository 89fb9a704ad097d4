// GitLab API data types.
// DTOs for responses and option structs for requests, grouped by resource.

use std::fmt;

pub mod commits;
pub mod users;

pub use commits::*;
pub use users::*;

/// Project identifier: numeric ID or `namespace/project` path.
///
/// Either form is escaped as a single path segment when placed in a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectId {
    Id(u64),
    Path(String),
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectId::Id(id) => write!(f, "{id}"),
            ProjectId::Path(path) => f.write_str(path),
        }
    }
}

impl From<u64> for ProjectId {
    fn from(id: u64) -> Self {
        ProjectId::Id(id)
    }
}

impl From<&str> for ProjectId {
    fn from(path: &str) -> Self {
        ProjectId::Path(path.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(path: String) -> Self {
        ProjectId::Path(path)
    }
}

impl From<&String> for ProjectId {
    fn from(path: &String) -> Self {
        ProjectId::Path(path.clone())
    }
}

/// Rate limit window from the last response's RateLimit-* headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    /// Unix timestamp at which the window resets.
    pub reset: u64,
}

impl RateLimit {
    /// True once a limit has been observed and fully consumed.
    pub fn is_exhausted(&self) -> bool {
        self.limit > 0 && self.remaining == 0
    }
}
