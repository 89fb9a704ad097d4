// GitLab API module.
// Shared client, transport boundary, pagination, and the users and commits services.

pub mod client;
pub mod commits;
pub mod pagination;
pub mod transport;
pub mod types;
pub mod users;

pub use client::GitLabClient;
pub use commits::CommitsService;
pub use pagination::{ListOptions, Page, PageInfo};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError,
};
pub use types::*;
pub use users::UsersService;
