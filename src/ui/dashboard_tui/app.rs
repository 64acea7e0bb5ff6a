use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::core::plant::{
    self, FileSink, Notification, Period, PresetGate, SystemState, TaskQueue, TICK_INTERVAL,
};
use crate::ui::formatters::clock_label;

use super::event_handler::DashboardEvent;
use super::render::render_ui;

/// How long a notification toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

/// A notification currently shown in the toast region
pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
}

/// Dashboard application state
pub struct DashboardApp {
    pub state: SystemState,
    pub queue: TaskQueue,
    pub rng: StdRng,
    pub sink: FileSink,
    pub selected_period: Period,
    pub toast: Option<Toast>,
    pub awaiting_shutdown_confirm: bool,
    pub show_help: bool,
    pub should_quit: bool,
}

impl DashboardApp {
    pub fn new(config: DashboardConfig) -> Self {
        let mut queue = TaskQueue::new();
        queue.start_periodic(Instant::now(), config.interval);

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            state: SystemState::seed(),
            queue,
            rng,
            sink: FileSink::new(config.output_dir),
            selected_period: Period::Daily,
            toast: None,
            awaiting_shutdown_confirm: false,
            show_help: false,
            should_quit: false,
        }
    }

    fn notify(&mut self, notification: Notification, now: Instant) {
        self.toast = Some(Toast {
            notification,
            shown_at: now,
        });
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: DashboardEvent, now: Instant) {
        // The confirmation modal captures all input until resolved
        if self.awaiting_shutdown_confirm {
            match event {
                DashboardEvent::ConfirmAccept => {
                    self.awaiting_shutdown_confirm = false;
                    let mut gate = PresetGate(true);
                    if let Some(notice) =
                        plant::emergency_shutdown(&mut self.state, &mut self.queue, &mut gate, now)
                    {
                        self.notify(notice, now);
                    }
                }
                DashboardEvent::ConfirmDecline => {
                    self.awaiting_shutdown_confirm = false;
                }
                _ => {}
            }
            return;
        }

        match event {
            DashboardEvent::Quit => self.should_quit = true,
            DashboardEvent::ToggleHelp => self.show_help = !self.show_help,
            DashboardEvent::StartAll => {
                let notice = plant::start_all(&self.state, &mut self.queue, now);
                self.notify(notice, now);
            }
            DashboardEvent::EmergencyShutdown => {
                self.awaiting_shutdown_confirm = true;
            }
            DashboardEvent::RunOptimization => {
                let notice = plant::run_optimization(&mut self.queue, now);
                self.notify(notice, now);
            }
            DashboardEvent::ExportReport => {
                let notice = plant::export_report(&mut self.queue, now);
                self.notify(notice, now);
            }
            DashboardEvent::SelectPeriod(period) => self.selected_period = period,
            DashboardEvent::ConfirmAccept | DashboardEvent::ConfirmDecline => {}
            DashboardEvent::None => {}
        }
    }

    /// Fire the periodic tick and drain deferred continuations that are due
    pub fn advance(&mut self, now: Instant) {
        if self.queue.poll_periodic(now) {
            plant::tick(&mut self.state, &mut self.rng, clock_label(Local::now()));
        }

        for action in self.queue.drain_due(now) {
            let notice = plant::complete_deferred(
                action,
                &mut self.state,
                &mut self.queue,
                &mut self.rng,
                &mut self.sink,
                now,
            );
            self.notify(notice, now);
        }

        if let Some(toast) = &self.toast {
            if now.duration_since(toast.shown_at) >= TOAST_DURATION {
                self.toast = None;
            }
        }
    }
}

/// Configuration for the dashboard app
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub interval: Duration,
    pub output_dir: PathBuf,
    pub seed: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            interval: TICK_INTERVAL,
            output_dir: PathBuf::from("."),
            seed: None,
        }
    }
}

/// Run the dashboard TUI application
pub fn run_dashboard_app(config: DashboardConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = DashboardApp::new(config);

    // Main loop
    loop {
        terminal.draw(|frame| render_ui(frame, &app))?;

        let now = Instant::now();
        let timeout = app
            .queue
            .next_deadline(now)
            .unwrap_or(Duration::from_millis(250))
            .min(Duration::from_millis(250));

        if event::poll(timeout).context("Event poll failed")? {
            if let Event::Key(key) = event::read().context("Event read failed")? {
                if key.kind == KeyEventKind::Press {
                    let dashboard_event = map_key(key.code, app.awaiting_shutdown_confirm);
                    app.handle_event(dashboard_event, Instant::now());
                }
            }
        }

        if app.should_quit {
            break;
        }

        app.advance(Instant::now());
    }

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

/// Translate a key press into a dashboard event
fn map_key(code: KeyCode, confirm_pending: bool) -> DashboardEvent {
    if confirm_pending {
        return match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                DashboardEvent::ConfirmAccept
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                DashboardEvent::ConfirmDecline
            }
            _ => DashboardEvent::None,
        };
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => DashboardEvent::Quit,
        KeyCode::Char('?') | KeyCode::Char('h') => DashboardEvent::ToggleHelp,
        KeyCode::Char('s') => DashboardEvent::StartAll,
        KeyCode::Char('x') => DashboardEvent::EmergencyShutdown,
        KeyCode::Char('o') => DashboardEvent::RunOptimization,
        KeyCode::Char('r') => DashboardEvent::ExportReport,
        KeyCode::Char('d') => DashboardEvent::SelectPeriod(Period::Daily),
        KeyCode::Char('w') => DashboardEvent::SelectPeriod(Period::Weekly),
        KeyCode::Char('m') => DashboardEvent::SelectPeriod(Period::Monthly),
        _ => DashboardEvent::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::plant::{MachineStatus, NotificationKind, STARTUP_DELAY};

    fn test_app() -> DashboardApp {
        let dir = std::env::temp_dir();
        DashboardApp::new(DashboardConfig {
            interval: TICK_INTERVAL,
            output_dir: dir,
            seed: Some(42),
        })
    }

    #[test]
    fn test_shutdown_needs_confirmation() {
        let mut app = test_app();
        let now = Instant::now();

        app.handle_event(DashboardEvent::EmergencyShutdown, now);
        assert!(app.awaiting_shutdown_confirm);
        assert!(app.state.is_online);

        app.handle_event(DashboardEvent::ConfirmDecline, now);
        assert!(!app.awaiting_shutdown_confirm);
        assert!(app.state.is_online);
    }

    #[test]
    fn test_confirmed_shutdown_transitions_offline() {
        let mut app = test_app();
        let now = Instant::now();

        app.handle_event(DashboardEvent::EmergencyShutdown, now);
        app.handle_event(DashboardEvent::ConfirmAccept, now);

        assert!(!app.state.is_online);
        assert_eq!(app.state.live_usage, 0.0);
        assert_eq!(app.queue.periodic_token(), None);
        assert_eq!(
            app.toast.as_ref().unwrap().notification.kind,
            NotificationKind::Error
        );
    }

    #[test]
    fn test_modal_swallows_other_events() {
        let mut app = test_app();
        let now = Instant::now();

        app.handle_event(DashboardEvent::EmergencyShutdown, now);
        app.handle_event(DashboardEvent::RunOptimization, now);

        assert!(app.awaiting_shutdown_confirm);
        assert_eq!(app.queue.pending_len(), 0);
    }

    #[test]
    fn test_start_all_completes_after_delay() {
        let mut app = test_app();
        let now = Instant::now();

        app.handle_event(DashboardEvent::EmergencyShutdown, now);
        app.handle_event(DashboardEvent::ConfirmAccept, now);
        app.handle_event(DashboardEvent::StartAll, now);

        // Nothing happens before the startup delay elapses
        app.advance(now + Duration::from_secs(1));
        assert!(!app.state.is_online);

        app.advance(now + STARTUP_DELAY);
        assert!(app.state.is_online);
        for machine in &app.state.machines {
            assert_eq!(machine.status, MachineStatus::Online);
        }
        assert!(app.queue.periodic_token().is_some());
    }

    #[test]
    fn test_custom_interval_survives_restart() {
        let slow = Duration::from_secs(600);
        let mut app = DashboardApp::new(DashboardConfig {
            interval: slow,
            output_dir: std::env::temp_dir(),
            seed: Some(9),
        });
        let now = Instant::now();

        app.handle_event(DashboardEvent::EmergencyShutdown, now);
        app.handle_event(DashboardEvent::ConfirmAccept, now);
        app.handle_event(DashboardEvent::StartAll, now);

        let restarted = now + STARTUP_DELAY;
        app.advance(restarted);
        assert!(app.state.is_online);
        assert_eq!(app.queue.periodic_interval(), Some(slow));

        // No tick lands before the configured interval elapses
        let samples = app.state.history.daily.values.clone();
        app.advance(restarted + Duration::from_secs(60));
        assert_eq!(app.state.history.daily.values, samples);

        app.advance(restarted + slow);
        assert_ne!(app.state.history.daily.values, samples);
    }

    #[test]
    fn test_toast_expires() {
        let mut app = test_app();
        let now = Instant::now();

        app.handle_event(DashboardEvent::StartAll, now);
        assert!(app.toast.is_some());

        app.advance(now + TOAST_DURATION);
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_period_selection() {
        let mut app = test_app();
        let now = Instant::now();

        assert_eq!(app.selected_period, Period::Daily);
        app.handle_event(DashboardEvent::SelectPeriod(Period::Monthly), now);
        assert_eq!(app.selected_period, Period::Monthly);
    }

    #[test]
    fn test_map_key_respects_modal() {
        assert_eq!(map_key(KeyCode::Char('q'), false), DashboardEvent::Quit);
        assert_eq!(map_key(KeyCode::Char('q'), true), DashboardEvent::None);
        assert_eq!(
            map_key(KeyCode::Char('y'), true),
            DashboardEvent::ConfirmAccept
        );
        assert_eq!(
            map_key(KeyCode::Esc, true),
            DashboardEvent::ConfirmDecline
        );
    }
}
