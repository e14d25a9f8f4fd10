//! Setup for the main dashboard application.
//!
//! The [`setup`](bootstrap::app::setup) only builds the dashboard and
//! renders it once. The [`start`](crate::app::start) function launches the
//! periodic jobs.
//!
//! Modules:
//!
//! - `app`: builds the dashboard from the configuration.
//! - `config`: loads the configuration.
//! - `jobs`: launches the application jobs.
//! - `logging`: sets up the tracing subscriber.
pub mod app;
pub mod config;
pub mod jobs;
pub mod logging;
