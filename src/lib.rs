//! Core of the Windpark investment project dashboard.

pub mod catalog;
pub mod config;
pub mod form;
pub mod format;
pub mod io;
pub mod kpi;
pub mod logging;
pub mod model;
pub mod provider;
pub mod seed;
pub mod validate;

#[cfg(feature = "api")]
pub mod api;

#[cfg(feature = "tui")]
pub mod tui;
