//! HTTP JSON API over a single chat session.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::start_server;
pub use state::{AppState, SessionFactory};
