/*
 * Frame Module
 *
 * The frame clock hands out one-shot frame requests, the way a browser's
 * animation-frame callback does. A request is delivered at most once, and a
 * cancelled request is never delivered.
 */

use std::collections::VecDeque;

/// Identifies a single outstanding frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

pub trait FrameClock {
    // Ask for one callback on the next display refresh
    fn request_frame(&mut self) -> FrameId;
    // Withdraw a request that has not been delivered yet
    fn cancel_frame(&mut self, id: FrameId);
}

// FIFO frame clock driven by the host's refresh loop
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: VecDeque<FrameId>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    // Deliver the oldest pending request; call once per display refresh
    pub fn next_due(&mut self) -> Option<FrameId> {
        self.pending.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl FrameClock for FrameQueue {
    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_id);
        self.next_id += 1;
        self.pending.push_back(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.pending.retain(|pending| *pending != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_delivered_once_in_order() {
        let mut clock = FrameQueue::new();
        let first = clock.request_frame();
        let second = clock.request_frame();
        assert_ne!(first, second);

        assert_eq!(clock.next_due(), Some(first));
        assert_eq!(clock.next_due(), Some(second));
        assert_eq!(clock.next_due(), None);
    }

    #[test]
    fn cancelled_request_is_never_delivered() {
        let mut clock = FrameQueue::new();
        let id = clock.request_frame();
        clock.cancel_frame(id);

        assert_eq!(clock.pending(), 0);
        assert_eq!(clock.next_due(), None);
    }
}
