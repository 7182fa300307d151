//! Network task
//!
//! One task owns all network activity so a slow join, DNS lookup, or
//! server never stalls the render loop. Both periodic actions run on
//! monotonic uptime gates: NTP resync daily, color fetch once a minute.
//! The sync gate is marked only on success, so the boot sync and any
//! failed resync keep retrying (at a throttled cadence) until one
//! lands. The fetch gate is marked per attempt so a flaky feed still
//! sees exactly one request a minute.

use cyw43::Control;
use defmt::*;
use embassy_net::Stack;
use embassy_time::{Duration, Instant, Ticker};

use cheerclock_core::schedule::{
    PeriodicGate, COLOR_FETCH_INTERVAL_MS, TIME_SYNC_INTERVAL_MS,
};

use crate::net::wifi::Credentials;
use crate::net::{cheer, sntp};
use crate::rtc::SharedRtc;
use crate::state::SHARED;

/// Gate check cadence
const NET_TICK_MS: u64 = 1000;

/// Throttle between sync attempts while the daily gate is overdue
const SYNC_RETRY_INTERVAL_MS: u64 = 60 * 1000;

#[embassy_executor::task]
pub async fn net_task(
    mut control: Control<'static>,
    stack: Stack<'static>,
    rtc: &'static SharedRtc,
    creds: Credentials,
) -> ! {
    info!("Network task started");

    // The sync gate starts due, so the face shows real time right
    // after boot. The color gate waits out its first interval.
    let mut sync_gate = PeriodicGate::new(TIME_SYNC_INTERVAL_MS);
    let mut sync_retry = PeriodicGate::new(SYNC_RETRY_INTERVAL_MS);
    let mut color_gate = PeriodicGate::primed(COLOR_FETCH_INTERVAL_MS, Instant::now().as_millis());

    let mut ticker = Ticker::every(Duration::from_millis(NET_TICK_MS));
    loop {
        let now_ms = Instant::now().as_millis();
        if sync_gate.is_due(now_ms) && sync_retry.is_due(now_ms) {
            sync_retry.mark(now_ms);
            match sntp::sync(&mut control, stack, &creds, rtc).await {
                Ok(()) => {
                    info!("Clock synced");
                    sync_gate.mark(now_ms);
                }
                Err(e) => warn!("Time sync failed: {}", e),
            }
        }

        let now_ms = Instant::now().as_millis();
        if color_gate.is_due(now_ms) {
            color_gate.mark(now_ms);
            match cheer::fetch(&mut control, stack, &creds).await {
                Ok(color) => {
                    SHARED.set_color(color);
                    info!("Cheer color now #{=u32:06X}", color.pack());
                }
                Err(e) => warn!("Color fetch failed: {}", e),
            }
        }

        ticker.next().await;
    }
}
