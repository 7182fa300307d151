//! Clock face composition
//!
//! Repaints the whole frame: background fill, then the time text drawn
//! twice - an 8-neighbor offset pass in black and a final pass in white.
//! The outline keeps the digits legible over any background hue the
//! feed decides to publish.

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::color::Rgb;

/// Text fill color
pub const TEXT_COLOR: Rgb = Rgb::WHITE;

/// Outline color
pub const OUTLINE_COLOR: Rgb = Rgb::BLACK;

/// The eight neighbor offsets for the outline pass
const OUTLINE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Advance width of one glyph in the face font
fn glyph_advance() -> u32 {
    FONT_5X8.character_size.width + FONT_5X8.character_spacing
}

/// Pixel width of `text` in the face font
pub fn text_width(text: &str) -> u32 {
    text.chars().count() as u32 * glyph_advance()
}

/// Repaint the whole face: background fill plus outlined, centered text
pub fn draw_face<D>(target: &mut D, text: &str, background: Rgb) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    target.clear(background.into())?;

    let size = target.bounding_box().size;
    let x = (size.width.saturating_sub(text_width(text)) / 2) as i32;
    let y = (size.height.saturating_sub(FONT_5X8.character_size.height) / 2) as i32;
    let origin = Point::new(x, y);

    let outline = MonoTextStyle::new(&FONT_5X8, OUTLINE_COLOR.into());
    for (dx, dy) in OUTLINE_OFFSETS {
        Text::with_baseline(text, origin + Point::new(dx, dy), outline, Baseline::Top)
            .draw(target)?;
    }

    let fill = MonoTextStyle::new(&FONT_5X8, TEXT_COLOR.into());
    Text::with_baseline(text, origin, fill, Baseline::Top).draw(target)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::frame::{CheerFrame, HEIGHT, WIDTH};

    use super::*;

    const BG: Rgb = Rgb::new(200, 30, 30);

    fn drawn_face() -> CheerFrame {
        let mut frame = CheerFrame::new();
        draw_face(&mut frame, "12:34:56", BG).unwrap();
        frame
    }

    #[test]
    fn test_background_fills_edges() {
        let frame = drawn_face();
        assert_eq!(frame.get(0, 0), BG);
        assert_eq!(frame.get(WIDTH - 1, 0), BG);
        assert_eq!(frame.get(0, HEIGHT - 1), BG);
        assert_eq!(frame.get(WIDTH - 1, HEIGHT - 1), BG);
    }

    #[test]
    fn test_text_and_outline_present() {
        let frame = drawn_face();
        let mut whites = 0;
        let mut blacks = 0;
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                match frame.get(x, y) {
                    c if c == TEXT_COLOR => whites += 1,
                    c if c == OUTLINE_COLOR => blacks += 1,
                    _ => {}
                }
            }
        }
        assert!(whites > 0, "no text pixels drawn");
        assert!(blacks > 0, "no outline pixels drawn");
    }

    #[test]
    fn test_text_never_touches_background() {
        // Every lit text pixel must be bordered by text or outline on
        // all in-bounds neighbors - that is what the outline is for.
        let frame = drawn_face();
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if frame.get(x, y) != TEXT_COLOR {
                    continue;
                }
                for (dx, dy) in OUTLINE_OFFSETS {
                    let nx = x as i32 + dx;
                    let ny = y as i32 + dy;
                    if nx < 0 || ny < 0 || nx >= WIDTH as i32 || ny >= HEIGHT as i32 {
                        continue;
                    }
                    let neighbor = frame.get(nx as usize, ny as usize);
                    assert_ne!(
                        neighbor, BG,
                        "background bleeds into text at ({}, {})",
                        nx, ny
                    );
                }
            }
        }
    }

    #[test]
    fn test_text_is_roughly_centered() {
        let frame = drawn_face();
        let mut min_x = WIDTH;
        let mut max_x = 0;
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if frame.get(x, y) != BG {
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                }
            }
        }
        let left_margin = min_x;
        let right_margin = WIDTH - 1 - max_x;
        assert!(
            left_margin.abs_diff(right_margin) <= 2,
            "margins {} vs {}",
            left_margin,
            right_margin
        );
    }
}
