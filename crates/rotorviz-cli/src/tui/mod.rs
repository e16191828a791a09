//! Interactive terminal dashboard.

pub mod app;
pub mod ui;
