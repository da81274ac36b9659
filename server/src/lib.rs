//! HTTP front end of the sweeper engine.

pub mod config;
pub mod error;
pub mod routes;
pub mod scores;
pub mod state;

pub use config::Settings;
pub use routes::router;
pub use state::{AppState, SharedState};
