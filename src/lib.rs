// labrest: typed bindings for the GitLab REST API v4.
// Users and commits services over a shared, configurable HTTP client.

pub mod config;
pub mod error;
pub mod gitlab;

pub use config::{Config, TokenKind};
pub use error::{Error, Result};
pub use gitlab::{CommitsService, GitLabClient, ListOptions, Page, PageInfo, UsersService};
