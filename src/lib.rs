//! blogdesk: headless admin console for the blog platform REST API.
//!
//! The crate is layered the same way top to bottom:
//!
//! - [`infra`]: typed HTTP client, telemetry and infrastructure errors.
//! - [`cache`]: the query cache shared by every resource of a session.
//! - [`domain`]: the resource registry, form schemas and validation.
//! - [`application`]: generic CRUD controllers (list view, form modal,
//!   relation picker, page container) composed by a [`application::session::Session`].
//! - [`presentation`]: terminal rendering of controller state.
//! - [`cli`]: the `blogdesk` command-line front-end.

pub mod application;
pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
