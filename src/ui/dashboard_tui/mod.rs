//! Interactive energy dashboard TUI.

mod app;
mod event_handler;
mod render;
mod widgets;

pub use app::{run_dashboard_app, DashboardApp, DashboardConfig};
pub use event_handler::DashboardEvent;
