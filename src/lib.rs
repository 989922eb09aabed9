//! Reference-data service: resolves backend resource ids into display labels
//! through per-type, lazily loaded, in-memory reference stores.

pub mod api;
pub mod app_state;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod routes;
pub mod scheduler;
