use serde::Serialize;

use crate::api::game::{FrameHandler, GameConfig};

/// How often the rolling FPS estimate is refreshed, in seconds of wall time.
const FPS_WINDOW: f32 = 0.5;

/// Snapshot of clock counters for the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClockStats {
    pub running: bool,
    pub fps: f32,
    /// Rendered frames since construction.
    pub frames: u64,
    /// Fixed simulation steps since construction.
    pub ticks: u64,
    /// Clamped wall-clock delta of the most recent frame.
    pub last_delta: f32,
}

/// Converts wall-clock time into fixed simulation steps.
///
/// The host calls [`FixedStepClock::tick`] once per display frame with a
/// monotonically increasing timestamp in seconds. Elapsed time is clamped to
/// `max_frame_dt`, accumulated, and consumed in `dt`-sized steps so game
/// logic runs at a consistent rate regardless of frame time.
pub struct FixedStepClock {
    /// The fixed delta time per step.
    dt: f32,
    max_frame_dt: f32,
    /// Accumulated time not yet consumed by a step.
    accumulator: f32,
    running: bool,
    last_time: Option<f64>,
    fps: f32,
    fps_elapsed: f32,
    fps_frames: u32,
    frames: u64,
    ticks: u64,
    last_delta: f32,
}

impl FixedStepClock {
    pub fn new(dt: f32, max_frame_dt: f32) -> Self {
        Self {
            dt,
            max_frame_dt,
            accumulator: 0.0,
            running: false,
            last_time: None,
            fps: 0.0,
            fps_elapsed: 0.0,
            fps_frames: 0,
            frames: 0,
            ticks: 0,
            last_delta: 0.0,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.fixed_dt, config.max_frame_dt)
    }

    /// Begin scheduling. The first `tick` after a start only records its
    /// timestamp, so time spent stopped never turns into catch-up steps.
    pub fn start(&mut self) {
        if !self.running {
            log::debug!("clock started");
        }
        self.running = true;
        self.last_time = None;
    }

    /// Cancel scheduling. Safe at any time; nothing already simulated is undone.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("clock stopped");
        }
        self.running = false;
        self.last_time = None;
        self.accumulator = 0.0;
    }

    /// Flip between running and stopped. Returns the new running state.
    pub fn toggle(&mut self) -> bool {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
        self.running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run one frame: zero or more `handler.update(dt)` calls, then one
    /// `handler.render()`. Returns the number of fixed steps taken.
    /// Does nothing while stopped.
    pub fn tick<H: FrameHandler + ?Sized>(&mut self, now: f64, handler: &mut H) -> u32 {
        if !self.running {
            return 0;
        }

        let elapsed = match self.last_time {
            Some(prev) => {
                let elapsed = (now - prev).max(0.0) as f32;
                self.update_fps(elapsed);
                elapsed
            }
            None => 0.0,
        };
        self.last_time = Some(now);

        let delta = elapsed.min(self.max_frame_dt);
        self.last_delta = delta;

        let steps = self.accumulate(delta);
        for _ in 0..steps {
            handler.update(self.dt);
            self.ticks += 1;
        }
        handler.render();
        self.frames += 1;
        steps
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        // Small epsilon so an exact multiple of dt is not lost to rounding.
        let steps = ((self.accumulator + 1e-6) / self.dt) as u32;
        self.accumulator = (self.accumulator - steps as f32 * self.dt).max(0.0);
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn stats(&self) -> ClockStats {
        ClockStats {
            running: self.running,
            fps: self.fps,
            frames: self.frames,
            ticks: self.ticks,
            last_delta: self.last_delta,
        }
    }

    fn update_fps(&mut self, elapsed: f32) {
        self.fps_elapsed += elapsed;
        self.fps_frames += 1;
        if self.fps_elapsed >= FPS_WINDOW {
            self.fps = self.fps_frames as f32 / self.fps_elapsed;
            self.fps_elapsed = 0.0;
            self.fps_frames = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        dts: Vec<f32>,
    }

    impl FrameHandler for Recorder {
        fn update(&mut self, dt: f32) {
            self.calls.push("update");
            self.dts.push(dt);
        }

        fn render(&mut self) {
            self.calls.push("render");
        }
    }

    fn running_clock() -> FixedStepClock {
        let mut clock = FixedStepClock::new(1.0 / 60.0, 1.0 / 30.0);
        clock.start();
        clock
    }

    #[test]
    fn one_step_exact() {
        let mut clock = FixedStepClock::new(1.0 / 60.0, 1.0 / 30.0);
        assert_eq!(clock.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut clock = FixedStepClock::new(1.0 / 60.0, 1.0 / 30.0);
        assert_eq!(clock.accumulate(0.008), 0);
        assert_eq!(clock.accumulate(0.010), 1);
    }

    #[test]
    fn updates_run_before_render() {
        let mut clock = running_clock();
        let mut rec = Recorder::default();
        clock.tick(0.0, &mut rec);
        clock.tick(1.0 / 30.0, &mut rec);
        assert_eq!(rec.calls, vec!["render", "update", "update", "render"]);
        assert!(rec.dts.iter().all(|dt| (*dt - 1.0 / 60.0).abs() < 1e-6));
    }

    #[test]
    fn slow_frame_is_clamped() {
        let mut clock = running_clock();
        let mut rec = Recorder::default();
        clock.tick(0.0, &mut rec);
        // A one-second hitch only yields the clamped 1/30s worth of steps.
        let steps = clock.tick(1.0, &mut rec);
        assert_eq!(steps, 2);
        assert!((clock.stats().last_delta - 1.0 / 30.0).abs() < 1e-6);
    }

    #[test]
    fn stopped_clock_does_nothing() {
        let mut clock = FixedStepClock::new(1.0 / 60.0, 1.0 / 30.0);
        let mut rec = Recorder::default();
        assert_eq!(clock.tick(0.5, &mut rec), 0);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn stop_then_start_does_not_catch_up() {
        let mut clock = running_clock();
        let mut rec = Recorder::default();
        clock.tick(0.0, &mut rec);
        clock.stop();
        clock.tick(5.0, &mut rec);
        clock.start();
        assert_eq!(clock.tick(10.0, &mut rec), 0);
        assert_eq!(clock.tick(10.0 + 1.0 / 60.0, &mut rec), 1);
    }

    #[test]
    fn toggle_flips_running_state() {
        let mut clock = FixedStepClock::new(1.0 / 60.0, 1.0 / 30.0);
        assert!(clock.toggle());
        assert!(clock.is_running());
        assert!(!clock.toggle());
        assert!(!clock.is_running());
    }

    #[test]
    fn fps_estimate_tracks_frame_rate() {
        let mut clock = running_clock();
        let mut rec = Recorder::default();
        for i in 0..=60 {
            clock.tick(i as f64 / 60.0, &mut rec);
        }
        let fps = clock.fps();
        assert!((fps - 60.0).abs() < 3.0, "fps was {}", fps);
        assert_eq!(clock.stats().frames, 61);
    }
}
