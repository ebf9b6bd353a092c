//! Provides the Nord theme, mapping the canonical palette to the
//! application's theme roles.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

// Polar Night (base surfaces)
pub const N0: Color = Color::Rgb(0x2E, 0x34, 0x40); // #2E3440
pub const N1: Color = Color::Rgb(0x3B, 0x42, 0x52); // #3B4252
pub const N2: Color = Color::Rgb(0x43, 0x4C, 0x5E); // #434C5E
pub const N3: Color = Color::Rgb(0x4C, 0x56, 0x6A); // #4C566A

// Snow Storm (foregrounds)
pub const S0: Color = Color::Rgb(0xD8, 0xDE, 0xE9); // #D8DEE9
pub const S1: Color = Color::Rgb(0xE5, 0xE9, 0xF0); // #E5E9F0

// Frost (non-semantic accents)
pub const F0: Color = Color::Rgb(0x8F, 0xBC, 0xBB); // #8FBCBB
pub const F1: Color = Color::Rgb(0x88, 0xC0, 0xD0); // #88C0D0
pub const F2: Color = Color::Rgb(0x81, 0xA1, 0xC1); // #81A1C1

// Aurora (semantic status)
pub const A_RED: Color = Color::Rgb(0xBF, 0x61, 0x6A); // #BF616A
pub const A_ORANGE: Color = Color::Rgb(0xD0, 0x87, 0x70); // #D08770
pub const A_GREEN: Color = Color::Rgb(0xA3, 0xBE, 0x8C); // #A3BE8C

pub const BG_MAIN: Color = N0; // App/root background
pub const BG_PANEL: Color = N1; // Secondary panels
pub const BG_PANEL_MUTED: Color = N2; // Muted or inactive surfaces
pub const UI_BORDER: Color = N1; // Borders
pub const UI_DIVIDER: Color = N3; // Separators and pending steps
pub const TEXT_MUTED: Color = Color::Rgb(0x61, 0x6E, 0x88); // #616E88 muted/disabled text

pub const TEXT_PRIMARY: Color = S0; // Default text
pub const TEXT_SECONDARY: Color = S1; // Titles and step labels

pub const ACCENT_CYAN: Color = F0;
pub const ACCENT_TEAL: Color = F1; // Step in progress, focus
pub const ACCENT_BLUE: Color = F2; // Finished steps

pub const STATUS_ERROR: Color = A_RED;
pub const STATUS_WARN: Color = A_ORANGE;
pub const STATUS_OK: Color = A_GREEN;

fn build_nord_roles() -> ThemeRoles {
    ThemeRoles {
        background: BG_MAIN,
        surface: BG_PANEL,
        surface_muted: BG_PANEL_MUTED,
        border: UI_BORDER,
        divider: UI_DIVIDER,

        text: TEXT_PRIMARY,
        text_secondary: TEXT_SECONDARY,
        text_muted: TEXT_MUTED,

        accent_primary: ACCENT_TEAL,
        accent_secondary: ACCENT_BLUE,
        accent_subtle: ACCENT_CYAN,

        success: STATUS_OK,
        warning: STATUS_WARN,
        error: STATUS_ERROR,

        focus: ACCENT_TEAL,
    }
}

/// Default Nord theme tuned for dark terminals.
#[derive(Debug, Clone)]
pub struct NordTheme {
    roles: ThemeRoles,
}

impl NordTheme {
    /// Construct a Nord theme instance using the canonical palette.
    pub fn new() -> Self {
        Self { roles: build_nord_roles() }
    }
}

impl Default for NordTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for NordTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
