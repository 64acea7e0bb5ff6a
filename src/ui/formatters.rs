use chrono::{DateTime, Local};

/// Format an energy value in kWh for display
pub fn format_kwh(value: f64) -> String {
    format!("{:.1} kWh", value)
}

/// Format a dollar amount
pub fn format_money(value: f64) -> String {
    format!("${:.2}", value)
}

/// Format a percentage value
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Short clock label recorded with daily history samples (HH:MM)
pub fn clock_label(at: DateTime<Local>) -> String {
    at.format("%H:%M").to_string()
}

/// Full clock readout for the status banner (HH:MM:SS)
pub fn clock_display(at: DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}
