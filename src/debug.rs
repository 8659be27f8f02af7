/*
 * Debug Information Module
 *
 * Frame and simulation counters shown in the UI and the debug overlay.
 */

use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub physics_updates_per_frame: usize,
    pub ticks: u64,
    pub boids: usize,
    pub agents: usize,
    pub particles: usize,
}
