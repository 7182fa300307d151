//! Render task
//!
//! Ticks fast, redraws slow: the loop wakes every 10 ms so a fresh
//! second shows up promptly, but the frame is recomposed and pushed to
//! the chain only when the displayed second actually changed.

use defmt::*;
use embassy_rp::peripherals::PIO1;
use embassy_rp::pio_programs::ws2812::PioWs2812;
use embassy_rp::watchdog::Watchdog;
use embassy_time::{Duration, Ticker};
use smart_leds::RGB8;

use cheerclock_core::clock::RedrawGate;
use cheerclock_core::face::draw_face;
use cheerclock_core::frame::{CheerFrame, NUM_LEDS};

use crate::rtc::SharedRtc;
use crate::state::SHARED;

/// Render loop tick
const RENDER_TICK_MS: u64 = 10;

/// Output brightness, 255 = full. 583 LEDs at full white would blow
/// well past a USB supply budget.
const BRIGHTNESS: u8 = 96;

pub type FaceChain = PioWs2812<'static, PIO1, 0, NUM_LEDS>;

#[embassy_executor::task]
pub async fn render_task(
    rtc: &'static SharedRtc,
    mut chain: FaceChain,
    mut watchdog: Option<Watchdog>,
    utc_offset_hours: i8,
) -> ! {
    info!("Render task started");

    let mut ticker = Ticker::every(Duration::from_millis(RENDER_TICK_MS));
    let mut gate = RedrawGate::new();
    let mut frame = CheerFrame::new();
    let mut leds = [RGB8::default(); NUM_LEDS];

    loop {
        match rtc.read() {
            Ok(now) => {
                if gate.should_redraw(now.second) {
                    let text = now.hhmmss(utc_offset_hours);
                    let background = SHARED.color();

                    // Drawing into the frame buffer cannot fail
                    let _ = draw_face(&mut frame, &text, background);

                    for (led, px) in leds.iter_mut().zip(frame.chain_pixels()) {
                        let scaled = px.scaled(BRIGHTNESS);
                        *led = RGB8::new(scaled.r, scaled.g, scaled.b);
                    }
                    chain.write(&leds).await;
                }
            }
            Err(_) => {
                warn!("RTC read failed, keeping last frame");
            }
        }

        if let Some(watchdog) = watchdog.as_mut() {
            watchdog.feed();
        }

        ticker.next().await;
    }
}
