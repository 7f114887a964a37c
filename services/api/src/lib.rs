//! Bland Voice API Library Crate
//!
//! Configuration, shared state, handlers, and routing for the web service that
//! hands out Bland AI session tokens. The binaries in `bin/` are thin wrappers
//! around this library.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
