//! # gt-daemon
//!
//! HTTP API for goaltrack.
//!
//! - `POST /goals` — create a goal (`201`, or `400` on validation failure)
//! - `GET /goals[?search=term]` — list goals in creation order, optionally
//!   filtered by title
//! - `GET /goals/{id}` — a single goal
//! - `GET /goals/options` — recurrence and tag options in selection order
//! - `GET /health` — liveness

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;

pub use api::{router, AppState};
pub use config::{DaemonConfig, GtConfig, ServeArgs, StorageBackend};
pub use error::DaemonError;
pub use server::{build_service, serve};
