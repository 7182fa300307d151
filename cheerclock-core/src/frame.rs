//! Frame buffer and LED chain layout
//!
//! The panel is a single WS2812 chain wired column-major serpentine:
//! column 0 runs top to bottom, column 1 bottom to top, and so on. The
//! frame buffer holds pixels in row-major (x, y) order and hands them
//! out in chain order for the DMA write.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use crate::color::Rgb;

/// Panel width in pixels
pub const WIDTH: usize = 53;

/// Panel height in pixels
pub const HEIGHT: usize = 11;

/// Number of LEDs on the chain
pub const NUM_LEDS: usize = WIDTH * HEIGHT;

/// The clock face frame at panel geometry
pub type CheerFrame = FrameBuffer<WIDTH, HEIGHT>;

/// Chain index of pixel `(x, y)` on a column-major serpentine panel
pub const fn serpentine_index(x: usize, y: usize, height: usize) -> usize {
    if x % 2 == 0 {
        x * height + y
    } else {
        x * height + (height - 1 - y)
    }
}

/// A `W` x `H` RGB pixel grid drawable with embedded-graphics
pub struct FrameBuffer<const W: usize, const H: usize> {
    pixels: [[Rgb; W]; H],
}

impl<const W: usize, const H: usize> FrameBuffer<W, H> {
    pub const fn new() -> Self {
        Self {
            pixels: [[Rgb::BLACK; W]; H],
        }
    }

    /// Paint every pixel with `color`
    pub fn fill(&mut self, color: Rgb) {
        for row in self.pixels.iter_mut() {
            for px in row.iter_mut() {
                *px = color;
            }
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y][x]
    }

    /// Pixels in chain order, ready for a WS2812 write
    pub fn chain_pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        (0..W * H).map(|i| {
            let x = i / H;
            let offset = i % H;
            let y = if x % 2 == 0 { offset } else { H - 1 - offset };
            self.pixels[y][x]
        })
    }
}

impl<const W: usize, const H: usize> Default for FrameBuffer<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> OriginDimensions for FrameBuffer<W, H> {
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl<const W: usize, const H: usize> DrawTarget for FrameBuffer<W, H> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if (0..W as i32).contains(&point.x) && (0..H as i32).contains(&point.y) {
                self.pixels[point.y as usize][point.x as usize] = color.into();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    use super::*;

    #[test]
    fn test_serpentine_mapping() {
        // 3x2 panel: column 0 top-down, column 1 bottom-up, column 2 top-down
        assert_eq!(serpentine_index(0, 0, 2), 0);
        assert_eq!(serpentine_index(0, 1, 2), 1);
        assert_eq!(serpentine_index(1, 1, 2), 2);
        assert_eq!(serpentine_index(1, 0, 2), 3);
        assert_eq!(serpentine_index(2, 0, 2), 4);
        assert_eq!(serpentine_index(2, 1, 2), 5);
    }

    #[test]
    fn test_chain_order_matches_mapping() {
        let mut frame: FrameBuffer<3, 2> = FrameBuffer::new();
        frame.fill(Rgb::BLACK);
        // Mark one pixel and find it on the chain
        frame
            .draw_iter([Pixel(Point::new(1, 0), Rgb888::new(9, 9, 9))])
            .unwrap();

        let chain: heapless::Vec<Rgb, 6> = frame.chain_pixels().collect();
        for (i, px) in chain.iter().enumerate() {
            let expected = if i == serpentine_index(1, 0, 2) {
                Rgb::new(9, 9, 9)
            } else {
                Rgb::BLACK
            };
            assert_eq!(*px, expected, "chain index {}", i);
        }
    }

    #[test]
    fn test_draw_clips_out_of_bounds() {
        let mut frame: FrameBuffer<3, 2> = FrameBuffer::new();
        frame
            .draw_iter([
                Pixel(Point::new(-1, 0), Rgb888::new(1, 1, 1)),
                Pixel(Point::new(3, 0), Rgb888::new(1, 1, 1)),
                Pixel(Point::new(0, 2), Rgb888::new(1, 1, 1)),
            ])
            .unwrap();
        assert!(frame.chain_pixels().all(|px| px == Rgb::BLACK));
    }

    #[test]
    fn test_rectangle_fill() {
        let mut frame: CheerFrame = FrameBuffer::new();
        Rectangle::new(Point::zero(), frame.size())
            .into_styled(PrimitiveStyle::with_fill(Rgb888::new(10, 20, 30)))
            .draw(&mut frame)
            .unwrap();
        assert_eq!(frame.get(0, 0), Rgb::new(10, 20, 30));
        assert_eq!(frame.get(WIDTH - 1, HEIGHT - 1), Rgb::new(10, 20, 30));
    }
}
