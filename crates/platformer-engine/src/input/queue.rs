/// Raw keyboard events as the host reports them, in browser key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
    /// The window lost focus; every held key counts as released.
    Blur,
}

/// Events written by the host between ticks and drained by the
/// [`InputSampler`](super::sampler::InputSampler) at the start of the next one.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn key_down(&mut self, key_code: u32) {
        self.push(InputEvent::KeyDown { key_code });
    }

    pub fn key_up(&mut self, key_code: u32) {
        self.push(InputEvent::KeyUp { key_code });
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
