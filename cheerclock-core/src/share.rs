//! State shared between the render and network tasks
//!
//! The background color is the only value both tasks touch: the network
//! task writes it, the render task reads it. It is published through a
//! single packed `u32` so a reader can never observe a half-updated
//! triple, even on cores (thumbv6m) without wide compare-and-swap.

use portable_atomic::{AtomicU32, Ordering};

use crate::color::Rgb;

/// Cross-task shared state, stored in a `static`
pub struct SharedClockState {
    color: AtomicU32,
}

impl SharedClockState {
    /// New state with the default background color
    pub const fn new() -> Self {
        Self {
            color: AtomicU32::new(Rgb::DEFAULT_CHEER.pack()),
        }
    }

    /// Most recently committed background color
    pub fn color(&self) -> Rgb {
        Rgb::unpack(self.color.load(Ordering::Relaxed))
    }

    /// Publish a new background color
    pub fn set_color(&self, color: Rgb) {
        self.color.store(color.pack(), Ordering::Relaxed);
    }
}

impl Default for SharedClockState {
    fn default() -> Self {
        Self::new()
    }
}
