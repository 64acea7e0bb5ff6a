//! User-triggered action handlers.
//!
//! Each handler mutates the state store and/or schedules a deferred
//! continuation on the task queue. The matching continuations run in
//! [`complete_deferred`] when the main loop drains them. Every notification
//! mirrors the dashboard toast: a title, a message, and a kind.

use std::ops::Range;
use std::time::{Duration, Instant};

use chrono::Local;
use rand::Rng;

use super::report::{export_to, ReportSink};
use super::scheduler::{DeferredAction, TaskQueue};
use super::simulation::TICK_INTERVAL;
use super::state::{MachineStatus, SystemState};

/// Warning shown by the confirmation gate before an emergency shutdown
pub const SHUTDOWN_PROMPT: &str = "EMERGENCY SHUTDOWN\n\nThis will immediately stop all machines and halt operations.\n\nAre you sure you want to proceed?";

/// Delay before the shutdown completion notification
pub const SHUTDOWN_NOTICE_DELAY: Duration = Duration::from_secs(2);

/// Simulated startup time for the whole machine fleet
pub const STARTUP_DELAY: Duration = Duration::from_secs(3);

/// Simulated AI analysis time
pub const OPTIMIZATION_DELAY: Duration = Duration::from_secs(2);

/// Simulated report generation time
pub const EXPORT_DELAY: Duration = Duration::from_millis(1500);

/// Savings drawn per optimization run ($)
pub const SAVINGS_RANGE: Range<f64> = 20.0..70.0;

/// Fresh usage assigned to each machine on startup (kWh)
pub const STARTUP_USAGE_RANGE: Range<f64> = 0.5..2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

/// A toast-style notification emitted by an action handler
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success<T: Into<String>, M: Into<String>>(title: T, message: M) -> Self {
        Self::new(title, message, NotificationKind::Success)
    }

    pub fn error<T: Into<String>, M: Into<String>>(title: T, message: M) -> Self {
        Self::new(title, message, NotificationKind::Error)
    }

    pub fn info<T: Into<String>, M: Into<String>>(title: T, message: M) -> Self {
        Self::new(title, message, NotificationKind::Info)
    }

    fn new<T: Into<String>, M: Into<String>>(title: T, message: M, kind: NotificationKind) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
        }
    }
}

/// Yes/no gate consulted before an emergency shutdown proceeds.
///
/// The TUI realizes this as a modal; CLI paths use a terminal prompt.
pub trait ConfirmationGate {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Gate with a predetermined answer, used once a modal has resolved and in tests
pub struct PresetGate(pub bool);

impl ConfirmationGate for PresetGate {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

/// Emergency shutdown: Online → Offline.
///
/// Runs the confirmation gate first; a decline aborts with no state change
/// and returns `None`. On confirm the transition is immediate (machines
/// offline, usage zeroed, periodic job cancelled) and a completion notice is
/// scheduled. Deliberately not guarded against an already-offline system:
/// the full sequence re-runs, as the product behaves today.
pub fn emergency_shutdown(
    state: &mut SystemState,
    queue: &mut TaskQueue,
    gate: &mut dyn ConfirmationGate,
    now: Instant,
) -> Option<Notification> {
    if !gate.confirm(SHUTDOWN_PROMPT) {
        return None;
    }

    state.is_online = false;
    for machine in &mut state.machines {
        machine.status = MachineStatus::Offline;
        machine.usage_kwh = 0.0;
    }
    state.recompute_live_usage();

    queue.cancel_periodic();
    queue.schedule_in(now, SHUTDOWN_NOTICE_DELAY, DeferredAction::ShutdownComplete);

    Some(Notification::error(
        "Emergency Shutdown",
        "All systems are being shut down...",
    ))
}

/// Start all machines: Offline → Online.
///
/// Guarded: when the system is already online this mutates nothing and only
/// reports status. Otherwise the actual startup runs as a deferred
/// continuation after [`STARTUP_DELAY`].
pub fn start_all(state: &SystemState, queue: &mut TaskQueue, now: Instant) -> Notification {
    if state.is_online {
        return Notification::info("System Status", "All machines are already running!");
    }

    queue.schedule_in(now, STARTUP_DELAY, DeferredAction::StartAllMachines);
    Notification::info("Starting System", "Initializing all machines...")
}

/// Kick off an AI optimization run; the savings draw happens in the continuation
pub fn run_optimization(queue: &mut TaskQueue, now: Instant) -> Notification {
    queue.schedule_in(now, OPTIMIZATION_DELAY, DeferredAction::ApplyOptimization);
    Notification::info("AI Analysis", "Running energy optimization analysis...")
}

/// Kick off a report export; the build and delivery happen in the continuation
pub fn export_report(queue: &mut TaskQueue, now: Instant) -> Notification {
    queue.schedule_in(now, EXPORT_DELAY, DeferredAction::BuildReport);
    Notification::info("Generating Report", "Creating comprehensive energy report...")
}

/// Execute a deferred continuation drained from the task queue
pub fn complete_deferred<R: Rng>(
    action: DeferredAction,
    state: &mut SystemState,
    queue: &mut TaskQueue,
    rng: &mut R,
    sink: &mut dyn ReportSink,
    now: Instant,
) -> Notification {
    match action {
        DeferredAction::ShutdownComplete => Notification::error(
            "System Offline",
            "Emergency shutdown completed. All machines stopped.",
        ),
        DeferredAction::StartAllMachines => {
            state.is_online = true;
            for machine in &mut state.machines {
                machine.status = MachineStatus::Online;
                machine.usage_kwh = rng.gen_range(STARTUP_USAGE_RANGE);
            }
            state.recompute_live_usage();
            // Resume at the interval the shutdown cancelled, not the default
            let every = queue.periodic_interval().unwrap_or(TICK_INTERVAL);
            queue.start_periodic(now, every);

            Notification::success("System Online", "All machines started successfully!")
        }
        DeferredAction::ApplyOptimization => {
            let savings = rng.gen_range(SAVINGS_RANGE);
            state.total_savings += savings;

            Notification::success(
                "AI Optimization Complete",
                format!("Potential savings identified: ${:.2}", savings),
            )
        }
        DeferredAction::BuildReport => match export_to(sink, state, Local::now()) {
            Ok(path) => Notification::success(
                "Report Ready",
                format!("Energy report saved to {}", path.display()),
            ),
            Err(err) => {
                log::warn!("report export failed: {}", err);
                Notification::error("Report Failed", err.to_string())
            }
        },
    }
}
