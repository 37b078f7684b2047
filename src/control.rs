//! Thread-safe handle through which an external UI queues configuration writes.
//!
//! Writes are buffered and applied by [`crate::Simulation::advance`] before
//! the next tick starts, so a tick never observes a half-applied change.

use std::sync::Arc;

use parking_lot::Mutex;

/// Configuration changes waiting for the next tick.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PendingControls {
    pub flow_intensity: Option<f32>,
    pub segment_count: Option<usize>,
    pub segment_length: Option<f32>,
    pub population: Option<usize>,
    pub reinitialize: bool,
}

impl PendingControls {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Cloneable writer side of the control channel. Later writes of the same
/// value replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ControlPanel {
    pending: Arc<Mutex<PendingControls>>,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_flow_intensity(&self, value: f32) {
        self.pending.lock().flow_intensity = Some(value);
    }

    pub fn set_segment_count(&self, segment_count: usize) {
        self.pending.lock().segment_count = Some(segment_count);
    }

    pub fn set_segment_length(&self, segment_length: f32) {
        self.pending.lock().segment_length = Some(segment_length);
    }

    pub fn resize_population(&self, target: usize) {
        self.pending.lock().population = Some(target);
    }

    pub fn request_reinitialize(&self) {
        self.pending.lock().reinitialize = true;
    }

    /// Removes and returns everything queued so far.
    pub fn take(&self) -> PendingControls {
        std::mem::take(&mut *self.pending.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_drains_and_last_write_wins() {
        let panel = ControlPanel::new();
        let writer = panel.clone();
        writer.set_flow_intensity(10.0);
        writer.set_flow_intensity(55.0);
        writer.request_reinitialize();

        let pending = panel.take();
        assert_eq!(pending.flow_intensity, Some(55.0));
        assert!(pending.reinitialize);
        assert!(panel.take().is_empty());
    }
}
