//! CheerClock - CheerLights wall clock firmware
//!
//! Firmware binary for a Raspberry Pi Pico W driving a 53x11 WS2812
//! panel. Renders an outlined HH:MM:SS face, resyncs the RTC from NTP
//! once a day, and repaints the background with the latest CheerLights
//! color once a minute. The clock keeps ticking when the network is
//! down or was never configured.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{PIO0, PIO1};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::rtc::Rtc;
use embassy_rp::watchdog::Watchdog;
use embassy_time::Duration;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use cheerclock_core::clock::WallClock;

use crate::rtc::SharedRtc;

mod net;
mod rtc;
mod state;
mod tasks;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
    PIO1_IRQ_0 => PioInterruptHandler<PIO1>;
});

/// Local timezone as a fixed offset from UTC (no DST handling)
const UTC_OFFSET_HOURS: i8 = -8;

/// Hardware watchdog is off by default; a hung render loop is easier to
/// debug over RTT without resets in the way
const WATCHDOG_ENABLED: bool = false;

/// Watchdog deadline, fed from the render loop
const WATCHDOG_TIMEOUT: Duration = Duration::from_secs(8);

/// CYW43 firmware blobs, see cyw43-firmware/README.md
const CYW43_FW: &[u8] = include_bytes!("../cyw43-firmware/43439A0.bin");
const CYW43_CLM: &[u8] = include_bytes!("../cyw43-firmware/43439A0_clm.bin");

// The RTC handle is shared by the render and network tasks
static RTC: StaticCell<SharedRtc> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("CheerClock firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // RTC free-runs from a fixed point until the first NTP sync lands
    let mut rtc = Rtc::new(p.RTC);
    if rtc.now().is_err() {
        // 2020-01-01 00:00:00 UTC was a Wednesday
        let boot_clock = WallClock {
            year: 2020,
            month: 1,
            day: 1,
            weekday: 3,
            ..Default::default()
        };
        if rtc.set_datetime(rtc::datetime_from_wall(boot_clock)).is_err() {
            error!("RTC refused the boot datetime");
        }
    }
    let rtc = RTC.init(SharedRtc::new(rtc));
    info!("RTC initialized");

    // WS2812 chain on PIO1 (PIO0 belongs to the radio)
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO1, Irqs);
    let ws2812_program = PioWs2812Program::new(&mut common);
    let chain = PioWs2812::new(&mut common, sm0, p.DMA_CH1, p.PIN_2, &ws2812_program);
    info!("LED chain initialized");

    let watchdog = if WATCHDOG_ENABLED {
        let mut watchdog = Watchdog::new(p.WATCHDOG);
        watchdog.start(WATCHDOG_TIMEOUT);
        Some(watchdog)
    } else {
        None
    };

    spawner
        .spawn(tasks::render_task(rtc, chain, watchdog, UTC_OFFSET_HOURS))
        .unwrap();

    // Networking only runs when credentials were baked in at build time
    match net::wifi::credentials() {
        Some(creds) => {
            let pwr = Output::new(p.PIN_23, Level::Low);
            let cs = Output::new(p.PIN_25, Level::High);
            let mut pio = Pio::new(p.PIO0, Irqs);
            let spi = cyw43_pio::PioSpi::new(
                &mut pio.common,
                pio.sm0,
                cyw43_pio::DEFAULT_CLOCK_DIVIDER,
                pio.irq0,
                cs,
                p.PIN_24,
                p.PIN_29,
                p.DMA_CH0,
            );

            static CYW43_STATE: StaticCell<cyw43::State> = StaticCell::new();
            let cyw43_state = CYW43_STATE.init(cyw43::State::new());
            let (net_device, mut control, runner) =
                cyw43::new(cyw43_state, pwr, spi, CYW43_FW).await;
            spawner.spawn(net::wifi::cyw43_task(runner)).unwrap();

            control.init(CYW43_CLM).await;
            control
                .set_power_management(cyw43::PowerManagementMode::PowerSave)
                .await;
            info!("Radio initialized");

            let mut rng = embassy_rp::clocks::RoscRng;
            let seed = rng.next_u64();

            static RESOURCES: StaticCell<embassy_net::StackResources<6>> = StaticCell::new();
            let (stack, runner) = embassy_net::new(
                net_device,
                embassy_net::Config::dhcpv4(Default::default()),
                RESOURCES.init(embassy_net::StackResources::new()),
                seed,
            );
            spawner.spawn(net::wifi::net_stack_task(runner)).unwrap();

            spawner
                .spawn(tasks::net_task(control, stack, rtc, creds))
                .unwrap();
        }
        None => {
            warn!("No Wi-Fi credentials baked in, running clock-only");
        }
    }

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
