//! Plant simulation core.
//!
//! This module provides the business logic for the simulated factory floor:
//! the state store, the periodic simulation engine, the user-triggered
//! action handlers, the cooperative task scheduler, and the report generator.
//! Nothing in here depends on a UI toolkit.

mod actions;
mod report;
mod scheduler;
mod simulation;
mod state;

pub use actions::{
    emergency_shutdown, export_report, run_optimization, start_all, complete_deferred,
    ConfirmationGate, Notification, NotificationKind, PresetGate, EXPORT_DELAY,
    OPTIMIZATION_DELAY, SAVINGS_RANGE, SHUTDOWN_NOTICE_DELAY, SHUTDOWN_PROMPT, STARTUP_DELAY,
    STARTUP_USAGE_RANGE,
};
pub use report::{
    build_report_rows, export_to, report_filename, rows_to_csv, FileSink, ReportSink, REPORT_MIME,
    REPORT_TITLE,
};
pub use scheduler::{DeferredAction, JobToken, TaskQueue};
pub use simulation::{tick, TICK_INTERVAL};
pub use state::{
    HistoricalData, Machine, MachineStatus, Period, SystemHealth, SystemState, UsageSeries,
    DAILY_WINDOW,
};
