//! Terminal movie browser backed by the TMDB catalog.
//!
//! [`catalog`] talks to the remote service, [`router`] maps paths to views,
//! [`app`] ties navigation to background fetches and [`ui`] draws it all.

pub mod app;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod router;
pub mod ui;
