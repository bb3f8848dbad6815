//! Frameguide web server - frame action endpoint and static guide assets

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{router, serve, ServerSettings};
pub use state::AppState;
