//! SNTP time synchronization
//!
//! A minimal mode-3 client: one 48-byte request per server, first
//! answer wins. Only the transmit-timestamp seconds are used; the face
//! shows whole seconds, so sub-second skew does not matter.

use cyw43::Control;
use defmt::*;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::{Ipv4Address, Stack};
use embassy_time::{with_timeout, Duration};

use cheerclock_core::clock::{WallClock, NTP_UNIX_OFFSET};

use crate::net::wifi::{self, Credentials, JoinError};
use crate::rtc::SharedRtc;

/// Public NTP servers to try, in order
const NTP_SERVERS: [(u8, u8, u8, u8); 3] = [
    (162, 159, 200, 1),  // time.cloudflare.com
    (129, 6, 15, 28),    // time.nist.gov
    (216, 239, 35, 0),   // time.google.com
];

const NTP_PORT: u16 = 123;

/// Per-server wait for a response
const NTP_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum SyncError {
    Connect(JoinError),
    AllServersFailed,
    RtcWrite,
}

/// Sync the RTC from the first NTP server that answers
pub async fn sync(
    control: &mut Control<'static>,
    stack: Stack<'static>,
    creds: &Credentials,
    rtc: &SharedRtc,
) -> Result<(), SyncError> {
    wifi::ensure_connected(control, stack, creds)
        .await
        .map_err(SyncError::Connect)?;

    for server in NTP_SERVERS {
        let Some(unix_secs) = request_time(stack, server).await else {
            continue;
        };
        let clock = WallClock::from_unix(unix_secs);
        info!(
            "NTP time {:02}:{:02}:{:02} UTC",
            clock.hour, clock.minute, clock.second
        );
        return rtc.write(clock).map_err(|_| SyncError::RtcWrite);
    }
    Err(SyncError::AllServersFailed)
}

/// One request/response exchange; None on any failure
async fn request_time(stack: Stack<'static>, server: (u8, u8, u8, u8)) -> Option<u64> {
    let mut rx_meta = [PacketMetadata::EMPTY; 4];
    let mut rx_buffer = [0u8; 128];
    let mut tx_meta = [PacketMetadata::EMPTY; 4];
    let mut tx_buffer = [0u8; 128];
    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );
    socket.bind(0).ok()?;

    let mut packet = [0u8; 48];
    packet[0] = 0x1B; // LI 0, version 3, mode 3 (client)

    let (a, b, c, d) = server;
    let endpoint = (Ipv4Address::new(a, b, c, d), NTP_PORT);
    socket.send_to(&packet, endpoint).await.ok()?;

    let (len, _) = with_timeout(NTP_TIMEOUT, socket.recv_from(&mut packet))
        .await
        .ok()?
        .ok()?;
    if len < 48 {
        warn!("Short NTP response ({} bytes)", len);
        return None;
    }

    // Transmit timestamp seconds, big endian, NTP epoch
    let ntp_secs = u32::from_be_bytes([packet[40], packet[41], packet[42], packet[43]]) as u64;
    Some(ntp_secs.saturating_sub(NTP_UNIX_OFFSET))
}
