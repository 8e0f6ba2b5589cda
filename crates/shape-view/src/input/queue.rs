use glam::Vec2;

/// Pointer events in world coordinates (hit-testing to world space is the
/// host's job).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began.
    PointerDown { x: f32, y: f32 },
    /// The pointer moved.
    PointerMove { x: f32, y: f32 },
    /// A touch/click ended.
    PointerUp { x: f32, y: f32 },
}

impl InputEvent {
    pub fn point(&self) -> Vec2 {
        match *self {
            InputEvent::PointerDown { x, y }
            | InputEvent::PointerMove { x, y }
            | InputEvent::PointerUp { x, y } => Vec2::new(x, y),
        }
    }
}

/// Pointer events received since the last tick, in arrival order.
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

    /// Take all pending events, leaving the queue empty.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_keeps_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::PointerMove { x: 11.0, y: 21.0 });
        q.push(InputEvent::PointerUp { x: 12.0, y: 22.0 });
        assert_eq!(q.len(), 3);

        let events = q.drain();
        assert!(q.is_empty());
        let points: Vec<_> = events.iter().map(|e| e.point()).collect();
        assert_eq!(
            points,
            vec![Vec2::new(10.0, 20.0), Vec2::new(11.0, 21.0), Vec2::new(12.0, 22.0)]
        );
        assert!(matches!(events[0], InputEvent::PointerDown { .. }));
    }
}
