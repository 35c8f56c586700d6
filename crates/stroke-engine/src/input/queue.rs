/// Pointer input the tracer understands, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// The touch/click ended.
    PointerUp,
}

/// An input event tagged with the session generation it was aimed at.
/// Events from an older generation (before a reset or character change) are stale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedInput {
    pub generation: u64,
    pub event: InputEvent,
}

/// A queue of input events.
/// The host pushes events as they arrive; the tracer drains them each frame.
pub struct InputQueue {
    events: Vec<QueuedInput>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push an event aimed at session generation `generation`.
    pub fn push(&mut self, event: InputEvent, generation: u64) {
        self.events.push(QueuedInput { generation, event });
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<QueuedInput> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &QueuedInput> {
        self.events.iter()
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
