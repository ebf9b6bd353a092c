//! Conversions between bar colours and terminal colours.
//!
//! Bar colours carry alpha; terminal cells do not. Translucent colours are
//! composited over a background before they reach the buffer, then mapped to
//! RGB or to the nearest entry of the xterm 256-color table.

use ratatui::style::Color;
use stepline_types::{ColorScheme, Rgba};

use crate::ui::theme::ColorCapability;

const CUBE_LEVELS: [u8; 6] = [0x00, 0x5F, 0x87, 0xAF, 0xD7, 0xFF];

const SYSTEM_COLORS: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00),
    (0x80, 0x00, 0x00),
    (0x00, 0x80, 0x00),
    (0x80, 0x80, 0x00),
    (0x00, 0x00, 0x80),
    (0x80, 0x00, 0x80),
    (0x00, 0x80, 0x80),
    (0xC0, 0xC0, 0xC0),
    (0x80, 0x80, 0x80),
    (0xFF, 0x00, 0x00),
    (0x00, 0xFF, 0x00),
    (0xFF, 0xFF, 0x00),
    (0x00, 0x00, 0xFF),
    (0xFF, 0x00, 0xFF),
    (0x00, 0xFF, 0xFF),
    (0xFF, 0xFF, 0xFF),
];

/// RGB value of an xterm palette index.
pub fn xterm_rgb(index: u8) -> (u8, u8, u8) {
    match index {
        0..=15 => SYSTEM_COLORS[index as usize],
        16..=231 => {
            let offset = index - 16;
            (
                CUBE_LEVELS[(offset / 36) as usize],
                CUBE_LEVELS[((offset / 6) % 6) as usize],
                CUBE_LEVELS[(offset % 6) as usize],
            )
        }
        _ => {
            let level = 8 + 10 * (index - 232);
            (level, level, level)
        }
    }
}

/// Closest index in the colour cube or grayscale ramp (16..=255).
pub fn nearest_xterm(r: u8, g: u8, b: u8) -> u8 {
    let cube_step = |channel: u8| -> u8 {
        CUBE_LEVELS
            .iter()
            .enumerate()
            .min_by_key(|(_, level)| (**level as i32 - channel as i32).abs())
            .map_or(0, |(position, _)| position as u8)
    };
    let cube = 16 + 36 * cube_step(r) + 6 * cube_step(g) + cube_step(b);

    let average = (r as u16 + g as u16 + b as u16) / 3;
    let gray = 232 + (average.saturating_sub(3) / 10).min(23) as u8;

    let distance = |index: u8| {
        let (cr, cg, cb) = xterm_rgb(index);
        let dr = cr as i32 - r as i32;
        let dg = cg as i32 - g as i32;
        let db = cb as i32 - b as i32;
        dr * dr + dg * dg + db * db
    };
    if distance(gray) < distance(cube) { gray } else { cube }
}

/// Opaque colour of a terminal colour; `None` for `Reset`, whose value the terminal decides.
pub fn to_rgba(color: Color) -> Option<Rgba> {
    let (r, g, b) = match color {
        Color::Reset => return None,
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Indexed(index) => xterm_rgb(index),
        Color::Black => xterm_rgb(0),
        Color::Red => xterm_rgb(1),
        Color::Green => xterm_rgb(2),
        Color::Yellow => xterm_rgb(3),
        Color::Blue => xterm_rgb(4),
        Color::Magenta => xterm_rgb(5),
        Color::Cyan => xterm_rgb(6),
        Color::Gray => xterm_rgb(7),
        Color::DarkGray => xterm_rgb(8),
        Color::LightRed => xterm_rgb(9),
        Color::LightGreen => xterm_rgb(10),
        Color::LightYellow => xterm_rgb(11),
        Color::LightBlue => xterm_rgb(12),
        Color::LightMagenta => xterm_rgb(13),
        Color::LightCyan => xterm_rgb(14),
        Color::White => xterm_rgb(15),
    };
    Some(Rgba::rgb(r, g, b))
}

/// Composites `rgba` over `background` and encodes it for the terminal.
pub fn to_color(rgba: Rgba, background: Rgba, capability: ColorCapability) -> Color {
    let opaque = rgba.over(background);
    match capability {
        ColorCapability::Truecolor => Color::Rgb(opaque.r, opaque.g, opaque.b),
        ColorCapability::Ansi256 => Color::Indexed(nearest_xterm(opaque.r, opaque.g, opaque.b)),
    }
}

/// Light or dark, judged by the perceived luminance of the background.
pub fn scheme_for(background: Color) -> ColorScheme {
    let Some(rgba) = to_rgba(background) else {
        return ColorScheme::Dark;
    };
    let luminance = 0.299 * rgba.r as f32 + 0.587 * rgba.g as f32 + 0.114 * rgba.b as f32;
    if luminance >= 128.0 { ColorScheme::Light } else { ColorScheme::Dark }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xterm_table_matches_known_entries() {
        assert_eq!(xterm_rgb(16), (0, 0, 0));
        assert_eq!(xterm_rgb(196), (0xFF, 0, 0));
        assert_eq!(xterm_rgb(231), (0xFF, 0xFF, 0xFF));
        assert_eq!(xterm_rgb(232), (8, 8, 8));
        assert_eq!(xterm_rgb(255), (238, 238, 238));
    }

    #[test]
    fn nearest_xterm_prefers_exact_matches() {
        assert_eq!(nearest_xterm(0xFF, 0x00, 0x00), 196);
        assert_eq!(nearest_xterm(0x87, 0xAF, 0xD7), 16 + 36 * 2 + 6 * 3 + 4);
        assert_eq!(nearest_xterm(0x30, 0x30, 0x30), 236);
    }

    #[test]
    fn translucent_colours_are_composited_first() {
        let half_white = Rgba::WHITE.opacity(0.5);
        assert_eq!(to_color(half_white, Rgba::BLACK, ColorCapability::Truecolor), Color::Rgb(128, 128, 128));
        assert_eq!(to_color(Rgba::RED, Rgba::BLACK, ColorCapability::Ansi256), Color::Indexed(203));
    }

    #[test]
    fn scheme_follows_background_brightness() {
        assert_eq!(scheme_for(Color::Rgb(0x28, 0x2A, 0x36)), ColorScheme::Dark);
        assert_eq!(scheme_for(Color::Indexed(255)), ColorScheme::Light);
        assert_eq!(scheme_for(Color::Reset), ColorScheme::Dark);
    }
}
