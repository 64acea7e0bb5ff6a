// UI and formatting module

pub mod dashboard_tui;
pub mod formatters;

// Re-export commonly used items for cleaner imports
pub use formatters::{clock_display, clock_label, format_kwh, format_money, format_percent};
