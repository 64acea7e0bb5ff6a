use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use energize::core::plant::{
    complete_deferred, emergency_shutdown, export_report, run_optimization, start_all, tick,
    DeferredAction, FileSink, MachineStatus, NotificationKind, PresetGate, SystemState, TaskQueue,
    EXPORT_DELAY, OPTIMIZATION_DELAY, SAVINGS_RANGE, SHUTDOWN_NOTICE_DELAY, STARTUP_DELAY,
    TICK_INTERVAL,
};

fn assert_live_usage_invariant(state: &SystemState) {
    assert!(
        (state.live_usage - state.online_usage_sum()).abs() < 1e-9,
        "live_usage {} drifted from machine sum {}",
        state.live_usage,
        state.online_usage_sum()
    );
}

#[test]
fn test_full_shutdown_and_restart_cycle() {
    let mut state = SystemState::seed();
    let mut queue = TaskQueue::new();
    let mut rng = StdRng::seed_from_u64(2026);
    let mut sink = FileSink::new(std::env::temp_dir());
    let now = Instant::now();

    queue.start_periodic(now, TICK_INTERVAL);

    // A few ticks of normal operation
    for i in 0..5 {
        tick(&mut state, &mut rng, format!("t{}", i));
        assert_live_usage_invariant(&state);
    }

    // Shutdown: immediate transition, deferred completion notice
    let notice = emergency_shutdown(&mut state, &mut queue, &mut PresetGate(true), now);
    assert_eq!(notice.unwrap().kind, NotificationKind::Error);
    assert!(!state.is_online);
    assert_eq!(state.live_usage, 0.0);
    assert_live_usage_invariant(&state);
    assert_eq!(queue.periodic_token(), None);

    // Ticks while offline are no-ops even if invoked directly
    let frozen = state.clone();
    tick(&mut state, &mut rng, "frozen".to_string());
    assert_eq!(state.history.daily.labels, frozen.history.daily.labels);

    let due = queue.drain_due(now + SHUTDOWN_NOTICE_DELAY);
    assert_eq!(due, vec![DeferredAction::ShutdownComplete]);
    let notice = complete_deferred(due[0], &mut state, &mut queue, &mut rng, &mut sink, now);
    assert_eq!(notice.title, "System Offline");

    // Restart: deferred startup brings the fleet back with fresh usage
    let notice = start_all(&state, &mut queue, now);
    assert_eq!(notice.kind, NotificationKind::Info);
    assert!(!state.is_online, "startup must not apply before its delay");

    let due = queue.drain_due(now + STARTUP_DELAY);
    assert_eq!(due, vec![DeferredAction::StartAllMachines]);
    let notice = complete_deferred(due[0], &mut state, &mut queue, &mut rng, &mut sink, now);
    assert_eq!(notice.kind, NotificationKind::Success);

    assert!(state.is_online);
    assert_live_usage_invariant(&state);
    for machine in &state.machines {
        assert_eq!(machine.status, MachineStatus::Online);
        assert!(machine.usage_kwh >= 0.5 && machine.usage_kwh < 2.5);
    }
    assert!(queue.periodic_token().is_some());

    // Simulation resumes
    tick(&mut state, &mut rng, "resumed".to_string());
    assert_live_usage_invariant(&state);
    assert_eq!(*state.history.daily.labels.last().unwrap(), "resumed");
}

#[test]
fn test_start_all_when_online_is_pure() {
    let mut queue = TaskQueue::new();
    let state = SystemState::seed();
    let before = state.clone();
    let now = Instant::now();

    let notice = start_all(&state, &mut queue, now);

    assert_eq!(notice.kind, NotificationKind::Info);
    assert_eq!(queue.pending_len(), 0);
    assert_eq!(state.live_usage, before.live_usage);
    assert_eq!(state.is_online, before.is_online);
}

#[test]
fn test_repeated_optimization_strictly_increases_savings() {
    let mut state = SystemState::seed();
    let mut queue = TaskQueue::new();
    let mut rng = StdRng::seed_from_u64(7);
    let mut sink = FileSink::new(std::env::temp_dir());
    let now = Instant::now();
    let initial = state.total_savings;

    let mut draws = Vec::new();
    for _ in 0..25 {
        run_optimization(&mut queue, now);
        let due = queue.drain_due(now + OPTIMIZATION_DELAY);
        assert_eq!(due.len(), 1);

        let before = state.total_savings;
        complete_deferred(due[0], &mut state, &mut queue, &mut rng, &mut sink, now);
        let drawn = state.total_savings - before;

        assert!(drawn >= SAVINGS_RANGE.start && drawn < SAVINGS_RANGE.end);
        draws.push(drawn);
    }

    let expected: f64 = initial + draws.iter().sum::<f64>();
    assert!((state.total_savings - expected).abs() < 1e-6);
}

#[test]
fn test_interleaved_actions_keep_invariants() {
    let mut state = SystemState::seed();
    let mut queue = TaskQueue::new();
    let mut rng = StdRng::seed_from_u64(77);
    let dir = tempfile::TempDir::new().unwrap();
    let mut sink = FileSink::new(dir.path());
    let now = Instant::now();

    queue.start_periodic(now, TICK_INTERVAL);

    // Queue an optimization and an export, then tick before they land
    run_optimization(&mut queue, now);
    export_report(&mut queue, now);
    tick(&mut state, &mut rng, "t0".to_string());
    assert_live_usage_invariant(&state);

    // Export lands first (1.5s), then the optimization (2s)
    let due = queue.drain_due(now + EXPORT_DELAY);
    assert_eq!(due, vec![DeferredAction::BuildReport]);
    let notice = complete_deferred(due[0], &mut state, &mut queue, &mut rng, &mut sink, now);
    assert_eq!(notice.kind, NotificationKind::Success);

    let due = queue.drain_due(now + OPTIMIZATION_DELAY);
    assert_eq!(due, vec![DeferredAction::ApplyOptimization]);
    let before = state.total_savings;
    complete_deferred(due[0], &mut state, &mut queue, &mut rng, &mut sink, now);
    assert!(state.total_savings > before);
    assert_live_usage_invariant(&state);
}

#[test]
fn test_daily_window_stays_capped_under_load() {
    let mut state = SystemState::seed();
    let mut rng = StdRng::seed_from_u64(1);

    for i in 0..100 {
        tick(&mut state, &mut rng, format!("t{}", i));
        assert_eq!(
            state.history.daily.labels.len(),
            state.history.daily.values.len()
        );
        assert!(state.history.daily.labels.len() <= 10);
    }
    assert_eq!(state.history.daily.labels.len(), 10);
}
