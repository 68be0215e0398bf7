//! clusterd Server
//!
//! HTTP front end for a pre-trained centroid model.
//!
//! The model is loaded once, before the listener is bound, and shared
//! read-only with every request task. One route does the work:
//! `POST /predict` takes `{"features": [...]}` and answers `{"cluster": n}`.

pub mod cli;
pub mod config;
pub mod routes;
pub mod state;

pub use cli::Cli;
pub use config::ServerConfig;
pub use routes::create_router;
pub use state::AppState;
