//! State shared between tasks

use cheerclock_core::share::SharedClockState;

/// Background color published by the network task, read by the render task
pub static SHARED: SharedClockState = SharedClockState::new();
