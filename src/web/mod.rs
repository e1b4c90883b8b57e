//! Web front end: the task list page, its form endpoints, and a JSON API.

pub mod error;
pub mod extract;
mod server;
pub mod templates;

pub use server::{AppState, ServerHandle, build_router, serve, start_server};
