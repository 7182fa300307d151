//! RGB color value and CheerLights hex decoding
//!
//! The feed publishes colors as `#RRGGBB` strings. Decoding follows the
//! CheerLights contract: strip a leading `#`, split the rest into three
//! equal-length substrings, parse each as base 16.

use embedded_graphics::pixelcolor::Rgb888;

/// Errors from decoding a hex color string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HexColorError {
    /// Length is zero or not divisible by 3
    Length,
    /// A non-hexadecimal character was found
    Digit,
    /// A channel value does not fit in 8 bits
    ChannelRange,
}

/// A fully-opaque RGB triple, one byte per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Background shown until the first successful feed fetch
    pub const DEFAULT_CHEER: Rgb = Rgb::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into `0x00RRGGBB` for atomic publication
    pub const fn pack(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Inverse of [`Rgb::pack`]; the top byte is ignored
    pub const fn unpack(raw: u32) -> Self {
        Self {
            r: ((raw >> 16) & 0xFF) as u8,
            g: ((raw >> 8) & 0xFF) as u8,
            b: (raw & 0xFF) as u8,
        }
    }

    /// Scale all channels by `brightness` (255 = unchanged)
    pub const fn scaled(self, brightness: u8) -> Self {
        let scale = brightness as u16 + 1;
        Self {
            r: ((self.r as u16 * scale) >> 8) as u8,
            g: ((self.g as u16 * scale) >> 8) as u8,
            b: ((self.b as u16 * scale) >> 8) as u8,
        }
    }

    /// Decode a `#RRGGBB`-style string
    pub fn from_hex(value: &str) -> Result<Self, HexColorError> {
        let value = value.strip_prefix('#').unwrap_or(value);
        let bytes = value.as_bytes();

        if bytes.is_empty() || bytes.len() % 3 != 0 {
            return Err(HexColorError::Length);
        }

        let chunk = bytes.len() / 3;
        let mut channels = [0u8; 3];
        for (i, channel) in channels.iter_mut().enumerate() {
            let mut acc: u32 = 0;
            for &c in &bytes[i * chunk..(i + 1) * chunk] {
                let digit = hex_digit(c).ok_or(HexColorError::Digit)?;
                acc = acc * 16 + digit as u32;
            }
            *channel = u8::try_from(acc).map_err(|_| HexColorError::ChannelRange)?;
        }

        Ok(Self::new(channels[0], channels[1], channels[2]))
    }
}

impl From<Rgb> for Rgb888 {
    fn from(c: Rgb) -> Self {
        Rgb888::new(c.r, c.g, c.b)
    }
}

impl From<Rgb888> for Rgb {
    fn from(c: Rgb888) -> Self {
        use embedded_graphics::prelude::RgbColor;
        Rgb::new(c.r(), c.g(), c.b())
    }
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_decode() {
        assert_eq!(Rgb::from_hex("#FF8800"), Ok(Rgb::new(255, 136, 0)));
        assert_eq!(Rgb::from_hex("00ff00"), Ok(Rgb::new(0, 255, 0)));
        assert_eq!(Rgb::from_hex("#abc"), Ok(Rgb::new(10, 11, 12)));
    }

    #[test]
    fn test_hex_decode_rejects_bad_length() {
        // 8 characters is not divisible by 3
        assert_eq!(Rgb::from_hex("00112233"), Err(HexColorError::Length));
        assert_eq!(Rgb::from_hex("#"), Err(HexColorError::Length));
        assert_eq!(Rgb::from_hex(""), Err(HexColorError::Length));
    }

    #[test]
    fn test_hex_decode_rejects_bad_digits() {
        assert_eq!(Rgb::from_hex("#GG0000"), Err(HexColorError::Digit));
        assert_eq!(Rgb::from_hex("12345z"), Err(HexColorError::Digit));
    }

    #[test]
    fn test_hex_decode_rejects_wide_channels() {
        // Divisible by 3 but each channel is 4 hex digits
        assert_eq!(
            Rgb::from_hex("FFFF00000000"),
            Err(HexColorError::ChannelRange)
        );
    }

    #[test]
    fn test_pack_unpack() {
        let c = Rgb::new(255, 136, 0);
        assert_eq!(c.pack(), 0x00FF_8800);
        assert_eq!(Rgb::unpack(c.pack()), c);
    }

    #[test]
    fn test_scaled() {
        assert_eq!(Rgb::WHITE.scaled(255), Rgb::WHITE);
        assert_eq!(Rgb::WHITE.scaled(127), Rgb::new(128, 128, 128));
        assert_eq!(Rgb::BLACK.scaled(64), Rgb::BLACK);
    }
}
