//! Periodic simulation engine.
//!
//! A bounded random walk keeps the displayed values plausible without real
//! telemetry. The walk only runs while the system is online; an offline tick
//! is a no-op.

use std::time::Duration;

use rand::Rng;

use super::state::SystemState;

/// Interval between simulation ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(2);

/// Floor for a running machine's energy draw (kWh)
pub const MIN_USAGE_KWH: f64 = 0.1;

/// Floor for a running machine's temperature (°C)
pub const MIN_TEMPERATURE: f64 = 40.0;

/// Run one simulation tick: perturb every online machine, recompute the
/// derived live usage, perturb the health metrics, and append a sample to
/// the daily history.
///
/// `label` is the timestamp label recorded with the daily sample, injected
/// by the caller so the engine stays clock-free.
pub fn tick<R: Rng>(state: &mut SystemState, rng: &mut R, label: String) {
    if !state.is_online {
        return;
    }

    for machine in &mut state.machines {
        if !machine.status.is_online() {
            continue;
        }
        machine.usage_kwh = (machine.usage_kwh + rng.gen_range(-0.2..0.2)).max(MIN_USAGE_KWH);
        machine.efficiency = (machine.efficiency + rng.gen_range(-2.0..2.0)).clamp(80.0, 100.0);
        machine.temperature =
            (machine.temperature + rng.gen_range(-3.0..3.0)).max(MIN_TEMPERATURE);
    }

    state.recompute_live_usage();

    state.health.cpu = (state.health.cpu + rng.gen_range(-5.0..5.0)).clamp(20.0, 100.0);
    state.health.memory = (state.health.memory + rng.gen_range(-4.0..4.0)).clamp(30.0, 100.0);
    state.health.network = (state.health.network + rng.gen_range(-3.0..3.0)).clamp(10.0, 100.0);

    let live = state.live_usage;
    state.push_daily_sample(label, live);
}
