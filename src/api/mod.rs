//! HTTP surface: Basic authentication, the permission table and one CRUD resource per
//! entity under a common prefix.

pub mod auth;
pub mod error;
pub mod meta;
pub mod policy;
pub mod resources;
pub mod server;
pub mod viewset;

pub use error::{ApiError, ApiResult};
pub use server::{router, serve, test_router, AppState};
