//! Wi-Fi association
//!
//! The link is brought up on demand, right before each network action,
//! and every attempt is strictly bounded by the poll budget. A failed
//! attempt just reports an error; the next periodic action retries.

use cyw43::{Control, JoinOptions};
use defmt::*;
use embassy_net::Stack;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::{DMA_CH0, PIO0};
use embassy_time::Timer;

use cheerclock_core::link::{
    DownReason, JoinBudget, LinkEvent, LinkState, JOIN_POLL_DELAY_MS,
};

/// Network credentials baked in at build time
#[derive(Clone, Copy)]
pub struct Credentials {
    pub ssid: &'static str,
    pub passphrase: &'static str,
}

/// Credentials from the build environment, if both were set
pub fn credentials() -> Option<Credentials> {
    match (option_env!("WIFI_SSID"), option_env!("WIFI_PASSWORD")) {
        (Some(ssid), Some(passphrase)) => Some(Credentials { ssid, passphrase }),
        _ => None,
    }
}

/// Why one association attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum JoinError {
    /// The access point rejected the join
    Rejected,
    /// The poll budget ran out before DHCP configured the stack
    BudgetExhausted,
}

#[embassy_executor::task]
pub async fn cyw43_task(
    runner: cyw43::Runner<'static, Output<'static>, cyw43_pio::PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

#[embassy_executor::task]
pub async fn net_stack_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}

/// Bring the link up if it is not already; idempotent
pub async fn ensure_connected(
    control: &mut Control<'static>,
    stack: Stack<'static>,
    creds: &Credentials,
) -> Result<(), JoinError> {
    if stack.is_config_up() {
        return Ok(());
    }

    let mut link = LinkState::default().transition(LinkEvent::JoinStarted);
    debug!("Joining network {}", creds.ssid);

    if let Err(e) = control
        .join(creds.ssid, JoinOptions::new(creds.passphrase.as_bytes()))
        .await
    {
        link = link.transition(LinkEvent::JoinFailed(DownReason::JoinRejected));
        warn!("Join rejected (status {}), link {}", e.status, link);
        return Err(JoinError::Rejected);
    }

    // Bounded wait for link-up and a DHCP lease
    let mut budget = JoinBudget::new();
    while !stack.is_config_up() {
        if !budget.try_poll() {
            link = link.transition(LinkEvent::JoinFailed(DownReason::BudgetExhausted));
            warn!("Join poll budget exhausted, link {}", link);
            return Err(JoinError::BudgetExhausted);
        }
        Timer::after_millis(JOIN_POLL_DELAY_MS).await;
    }

    link = link.transition(LinkEvent::JoinSucceeded);
    if let Some(config) = stack.config_v4() {
        info!("Link {}, address {}", link, config.address);
    }
    Ok(())
}
