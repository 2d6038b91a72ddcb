//! Edge-triggered keyboard state.
//!
//! Several physical keys map onto each logical [`Key`]. The sampler tracks
//! which physical keys are held and reports a logical key as pressed while any
//! of its physical keys is. Edges are computed per sample: a key pressed and
//! released between two ticks still reports `just_pressed` and
//! `just_released` on the next tick.

use std::collections::HashSet;

use super::queue::{InputEvent, InputQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
    Pause,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::Left, Key::Right, Key::Jump, Key::Pause];

    /// Browser key codes bound to this key.
    pub fn codes(self) -> &'static [u32] {
        match self {
            // ArrowLeft, A
            Key::Left => &[37, 65],
            // ArrowRight, D
            Key::Right => &[39, 68],
            // Space, ArrowUp, W
            Key::Jump => &[32, 38, 87],
            // P
            Key::Pause => &[80],
        }
    }

    pub fn from_code(code: u32) -> Option<Key> {
        Key::ALL.into_iter().find(|key| key.codes().contains(&code))
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    held_codes: HashSet<u32>,
    pressed: [bool; 4],
    just_pressed: [bool; 4],
    just_released: [bool; 4],
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume every queued event and recompute edges. Call once per tick,
    /// before any entity reads input.
    pub fn sample(&mut self, queue: &mut InputQueue) {
        self.just_pressed = [false; 4];
        self.just_released = [false; 4];

        for event in queue.drain() {
            match event {
                InputEvent::KeyDown { key_code } => {
                    if Key::from_code(key_code).is_some() {
                        self.held_codes.insert(key_code);
                    }
                }
                InputEvent::KeyUp { key_code } => {
                    self.held_codes.remove(&key_code);
                }
                InputEvent::Blur => self.held_codes.clear(),
            }
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        for key in Key::ALL {
            let i = key.index();
            let now = key.codes().iter().any(|code| self.held_codes.contains(code));
            if now && !self.pressed[i] {
                self.just_pressed[i] = true;
            } else if !now && self.pressed[i] {
                self.just_released[i] = true;
            }
            self.pressed[i] = now;
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed[key.index()]
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.just_released[key.index()]
    }

    pub fn is_left_pressed(&self) -> bool {
        self.is_pressed(Key::Left)
    }

    pub fn is_right_pressed(&self) -> bool {
        self.is_pressed(Key::Right)
    }

    pub fn is_jump_pressed(&self) -> bool {
        self.is_pressed(Key::Jump)
    }

    pub fn is_jump_just_pressed(&self) -> bool {
        self.is_just_pressed(Key::Jump)
    }

    pub fn is_jump_just_released(&self) -> bool {
        self.is_just_released(Key::Jump)
    }

    pub fn is_pause_just_pressed(&self) -> bool {
        self.is_just_pressed(Key::Pause)
    }

    /// -1 for left, 1 for right, 0 for neither or both.
    pub fn horizontal_axis(&self) -> f32 {
        match (self.is_left_pressed(), self.is_right_pressed()) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(sampler: &mut InputSampler, events: &[InputEvent]) {
        let mut queue = InputQueue::new();
        for e in events {
            queue.push(*e);
        }
        sampler.sample(&mut queue);
    }

    #[test]
    fn just_pressed_lasts_one_sample() {
        let mut s = InputSampler::new();
        sample(&mut s, &[InputEvent::KeyDown { key_code: 32 }]);
        assert!(s.is_jump_pressed());
        assert!(s.is_jump_just_pressed());

        sample(&mut s, &[]);
        assert!(s.is_jump_pressed());
        assert!(!s.is_jump_just_pressed());

        sample(&mut s, &[InputEvent::KeyUp { key_code: 32 }]);
        assert!(!s.is_jump_pressed());
        assert!(s.is_jump_just_released());
    }

    #[test]
    fn tap_between_ticks_is_not_lost() {
        let mut s = InputSampler::new();
        sample(
            &mut s,
            &[
                InputEvent::KeyDown { key_code: 87 },
                InputEvent::KeyUp { key_code: 87 },
            ],
        );
        assert!(s.is_jump_just_pressed());
        assert!(s.is_jump_just_released());
        assert!(!s.is_jump_pressed());
    }

    #[test]
    fn aliases_share_a_logical_key() {
        let mut s = InputSampler::new();
        sample(
            &mut s,
            &[
                InputEvent::KeyDown { key_code: 37 },
                InputEvent::KeyDown { key_code: 65 },
                InputEvent::KeyUp { key_code: 37 },
            ],
        );
        assert!(s.is_left_pressed(), "A is still held");
        assert!(!s.is_just_released(Key::Left));
    }

    #[test]
    fn horizontal_axis_cancels() {
        let mut s = InputSampler::new();
        sample(&mut s, &[InputEvent::KeyDown { key_code: 68 }]);
        assert_eq!(s.horizontal_axis(), 1.0);
        sample(&mut s, &[InputEvent::KeyDown { key_code: 65 }]);
        assert_eq!(s.horizontal_axis(), 0.0);
        sample(&mut s, &[InputEvent::KeyUp { key_code: 68 }]);
        assert_eq!(s.horizontal_axis(), -1.0);
    }

    #[test]
    fn blur_releases_everything() {
        let mut s = InputSampler::new();
        sample(
            &mut s,
            &[
                InputEvent::KeyDown { key_code: 39 },
                InputEvent::KeyDown { key_code: 32 },
            ],
        );
        sample(&mut s, &[InputEvent::Blur]);
        assert!(!s.is_right_pressed());
        assert!(s.is_jump_just_released());
    }

    #[test]
    fn unbound_codes_are_ignored() {
        let mut s = InputSampler::new();
        sample(&mut s, &[InputEvent::KeyDown { key_code: 13 }]);
        assert!(Key::ALL.iter().all(|k| !s.is_pressed(*k)));
        assert_eq!(Key::from_code(80), Some(Key::Pause));
        assert_eq!(Key::from_code(13), None);
    }
}
