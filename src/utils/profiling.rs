use std::time::{Duration, Instant};

/// Timing and population counters for the most recent tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct TickProfiler {
    pub control_time: Duration,
    pub dynamics_time: Duration,
    pub relaxation_time: Duration,
    pub total_tick_time: Duration,

    pub chain_count: usize,
    pub particle_count: usize,
    pub wrapped_chains: usize,
}

impl TickProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn report(&self) {
        let total_us = self.total_tick_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        log::debug!(
            "tick: {} chains, {} particles, {} wrapped, {:.2} ms total",
            self.chain_count,
            self.particle_count,
            self.wrapped_chains,
            self.total_tick_time.as_secs_f32() * 1000.0
        );
        log::debug!(
            "  controls {:.1}%  dynamics {:.1}%  relaxation {:.1}%",
            share(self.control_time, total_us),
            share(self.dynamics_time, total_us),
            share(self.relaxation_time, total_us),
        );
    }
}

fn share(phase: Duration, total_us: f32) -> f32 {
    phase.as_micros() as f32 / total_us * 100.0
}

/// Adds the elapsed time of its scope into a profiler field.
pub struct PhaseTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl Drop for PhaseTimer<'_> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
