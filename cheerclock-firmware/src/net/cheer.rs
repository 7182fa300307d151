//! CheerLights color fetch
//!
//! One HTTP/1.0 GET per attempt against the ThingSpeak last-entry
//! endpoint. HTTP/1.0 keeps the response un-chunked, so the body is
//! simply everything after the header block until the server closes
//! the connection.

use core::fmt::Write as FmtWrite;

use cyw43::Control;
use defmt::*;
use embassy_net::dns::DnsQueryType;
use embassy_net::tcp::TcpSocket;
use embassy_net::Stack;
use embassy_time::Duration;
use embedded_io_async::Write;
use heapless::String;

use cheerclock_core::color::Rgb;
use cheerclock_core::feed::{self, FeedError};

use crate::net::wifi::{self, Credentials, JoinError};

const FEED_HOST: &str = "api.thingspeak.com";
const FEED_PATH: &str = "/channels/1417/field/2/last.json";
const FEED_PORT: u16 = 80;

/// Headers plus the tiny JSON body fit with lots of room to spare
const RESPONSE_LIMIT: usize = 2048;

/// Socket inactivity timeout
const FEED_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum FetchError {
    Connect(JoinError),
    Dns,
    Tcp,
    ResponseTooLarge,
    Encoding,
    Feed(FeedError),
}

/// Fetch the latest CheerLights color from the feed
pub async fn fetch(
    control: &mut Control<'static>,
    stack: Stack<'static>,
    creds: &Credentials,
) -> Result<Rgb, FetchError> {
    wifi::ensure_connected(control, stack, creds)
        .await
        .map_err(FetchError::Connect)?;

    let addrs = stack
        .dns_query(FEED_HOST, DnsQueryType::A)
        .await
        .map_err(|_| FetchError::Dns)?;
    let addr = *addrs.first().ok_or(FetchError::Dns)?;

    let mut rx_buffer = [0u8; RESPONSE_LIMIT];
    let mut tx_buffer = [0u8; 256];
    let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(FEED_TIMEOUT));

    socket
        .connect((addr, FEED_PORT))
        .await
        .map_err(|_| FetchError::Tcp)?;
    debug!("Connected to {}", FEED_HOST);

    let mut request: String<128> = String::new();
    // Cannot overflow: host and path are short constants
    let _ = write!(
        request,
        "GET {} HTTP/1.0\r\nHost: {}\r\nConnection: close\r\n\r\n",
        FEED_PATH, FEED_HOST
    );
    socket
        .write_all(request.as_bytes())
        .await
        .map_err(|_| FetchError::Tcp)?;

    // Read until the server closes the connection
    let mut response = [0u8; RESPONSE_LIMIT];
    let mut len = 0;
    loop {
        match socket.read(&mut response[len..]).await {
            Ok(0) => break,
            Ok(n) => {
                len += n;
                if len == response.len() {
                    return Err(FetchError::ResponseTooLarge);
                }
            }
            Err(_) => return Err(FetchError::Tcp),
        }
    }

    let raw = core::str::from_utf8(&response[..len]).map_err(|_| FetchError::Encoding)?;
    feed::parse_response(raw).map_err(FetchError::Feed)
}
