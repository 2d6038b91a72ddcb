use platformer_engine::{
    ClockStats, FixedStepClock, FrameHandler, GameConfig, GameEvent, InputEvent, InputQueue,
    InputSampler, LevelDescriptor, LevelError, RenderBuffer, SpriteRegistry, World,
};

/// What the clock drives each frame: input sampling, the world, and the
/// frame's draw list.
struct Session {
    world: World,
    queue: InputQueue,
    sampler: InputSampler,
    sprites: SpriteRegistry,
    render_buffer: RenderBuffer,
    /// Events from every step of the current frame, in order.
    frame_events: Vec<GameEvent>,
    paused: bool,
    debug: bool,
}

impl FrameHandler for Session {
    fn update(&mut self, dt: f32) {
        self.sampler.sample(&mut self.queue);
        if self.sampler.is_pause_just_pressed() {
            self.paused = !self.paused;
            log::info!("{}", if self.paused { "paused" } else { "resumed" });
        }
        if self.paused {
            return;
        }
        self.world.update(dt, &self.sampler);
        self.frame_events.extend_from_slice(self.world.events());
    }

    fn render(&mut self) {
        self.render_buffer.clear();
        self.world.render(&mut self.render_buffer, &self.sprites);
        if self.debug {
            self.world.render_debug(&mut self.render_buffer);
        }
    }
}

/// Wires the engine loop for one level.
///
/// The host calls [`GameRunner::tick`] from its frame callback with a
/// monotonic timestamp, feeds keyboard events through
/// [`GameRunner::push_input`], and reads the instance and event buffers back
/// through the pointer accessors.
pub struct GameRunner {
    clock: FixedStepClock,
    session: Session,
}

impl GameRunner {
    pub fn new(level: &LevelDescriptor, config: GameConfig) -> Result<Self, LevelError> {
        let clock = FixedStepClock::from_config(&config);
        let world = World::from_level(level, config)?;
        Ok(Self {
            clock,
            session: Session {
                world,
                queue: InputQueue::new(),
                sampler: InputSampler::new(),
                sprites: SpriteRegistry::new(),
                render_buffer: RenderBuffer::new(),
                frame_events: Vec::with_capacity(16),
                paused: false,
                debug: false,
            },
        })
    }

    pub fn start(&mut self) {
        self.clock.start();
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn toggle(&mut self) -> bool {
        self.clock.toggle()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.session.paused
    }

    /// Run one frame at `now` seconds. Returns the number of fixed steps taken.
    pub fn tick(&mut self, now: f64) -> u32 {
        self.session.frame_events.clear();
        self.clock.tick(now, &mut self.session)
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.session.queue.push(event);
    }

    /// Replace the sprite table. Entities without a sprite draw rectangles.
    pub fn load_sprites(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let sprites = SpriteRegistry::from_json(json)?;
        log::info!("loaded {} sprites", sprites.len());
        self.session.sprites = sprites;
        Ok(())
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.session.debug = enabled;
    }

    pub fn world(&self) -> &World {
        &self.session.world
    }

    // ---- Buffer accessors for zero-copy reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.session.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.session.render_buffer.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.session.frame_events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.session.frame_events.len() as u32
    }

    pub fn frame_events(&self) -> &[GameEvent] {
        &self.session.frame_events
    }

    pub fn world_width(&self) -> f32 {
        self.session.world.bounds().width
    }

    pub fn world_height(&self) -> f32 {
        self.session.world.bounds().height
    }

    // ---- Diagnostics ----

    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }

    pub fn stats(&self) -> ClockStats {
        self.clock.stats()
    }

    pub fn stats_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.clock.stats())
    }

    pub fn debug_info(&self) -> String {
        self.session.world.debug_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platformer_engine::EventKind;

    const FRAME: f64 = 1.0 / 60.0;

    fn runner() -> GameRunner {
        let mut r = GameRunner::new(&LevelDescriptor::demo(), GameConfig::default()).unwrap();
        r.start();
        r
    }

    #[test]
    fn first_frame_renders_without_stepping() {
        let mut r = runner();
        assert_eq!(r.tick(0.0), 0);
        let demo = LevelDescriptor::demo();
        let expected = demo.platforms.len() + demo.enemies.len() + 1;
        assert_eq!(r.instance_count() as usize, expected);
    }

    #[test]
    fn frames_step_the_world() {
        let mut r = runner();
        r.tick(0.0);
        for i in 1..=30 {
            r.tick(i as f64 * FRAME);
        }
        let ticks = r.world().ticks();
        assert!((29..=31).contains(&ticks), "ticks={}", ticks);
        assert_eq!(r.stats().ticks, ticks);
    }

    #[test]
    fn stopped_runner_does_nothing() {
        let mut r = runner();
        r.tick(0.0);
        r.stop();
        assert_eq!(r.tick(1.0), 0);
        assert!(!r.is_running());
        assert!(r.toggle());
    }

    #[test]
    fn pause_key_freezes_the_world() {
        let mut r = runner();
        r.tick(0.0);
        r.push_input(InputEvent::KeyDown { key_code: 80 });
        r.tick(FRAME);
        assert!(r.is_paused());
        let frozen = r.world().ticks();
        r.push_input(InputEvent::KeyUp { key_code: 80 });
        for i in 2..20 {
            r.tick(i as f64 * FRAME);
        }
        assert_eq!(r.world().ticks(), frozen);

        r.push_input(InputEvent::KeyDown { key_code: 80 });
        r.tick(20.0 * FRAME);
        assert!(!r.is_paused());
        r.tick(21.0 * FRAME);
        assert!(r.world().ticks() > frozen);
    }

    #[test]
    fn events_from_every_step_are_collected() {
        let mut r = runner();
        r.tick(0.0);
        r.push_input(InputEvent::KeyDown { key_code: 32 });
        // Let the player land first, then jump on the next step.
        let mut jumped = false;
        for i in 1..120 {
            r.tick(i as f64 * FRAME);
            if r.frame_events().iter().any(|e| e.is(EventKind::PlayerJumped)) {
                jumped = true;
                break;
            }
            if i == 60 {
                r.push_input(InputEvent::KeyUp { key_code: 32 });
            }
            if i == 61 {
                r.push_input(InputEvent::KeyDown { key_code: 32 });
            }
        }
        assert!(jumped);
        assert_eq!(r.game_events_len() as usize, r.frame_events().len());
    }

    #[test]
    fn debug_overlay_adds_outlines() {
        let mut r = runner();
        r.tick(0.0);
        let plain = r.instance_count();
        r.set_debug(true);
        r.tick(FRAME);
        assert!(r.instance_count() > plain);
    }

    #[test]
    fn sprites_load_and_bad_json_is_rejected() {
        let mut r = runner();
        r.load_sprites(r#"{ "sprites": { "enemy": { "col": 1, "row": 0 } } }"#)
            .unwrap();
        assert!(r.load_sprites("nope").is_err());
        assert!(r.stats_json().unwrap().contains("\"running\":true"));
    }
}
