//! Board-agnostic core logic for the CheerClock firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Wall-clock model, timezone wrapping, and redraw gating
//! - RGB color value with CheerLights hex decoding
//! - Atomic shared state between the render and network tasks
//! - Monotonic periodic gates for time sync and color fetch
//! - Wi-Fi link state machine and join budget
//! - CheerLights feed response parsing
//! - Frame buffer, LED chain layout, and clock face composition

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod color;
pub mod face;
pub mod feed;
pub mod frame;
pub mod link;
pub mod schedule;
pub mod share;
