use crate::core::plant::Period;

/// Events that can occur in the dashboard TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    /// Quit the application
    Quit,
    /// Toggle help overlay
    ToggleHelp,
    /// Start all machines
    StartAll,
    /// Open the emergency shutdown confirmation
    EmergencyShutdown,
    /// Run AI optimization
    RunOptimization,
    /// Export the CSV report
    ExportReport,
    /// Switch the historical chart period
    SelectPeriod(Period),
    /// Accept the pending confirmation
    ConfirmAccept,
    /// Decline the pending confirmation
    ConfirmDecline,
    /// No action
    None,
}
