//! Colour palettes: "Midnight Amber" for dark terminals, "Paper" for light.
//!
//! The active palette is process-wide and switched by the session's theme
//! observer, so renderers just call [`palette`].

use ratatui::style::Color;
use std::sync::atomic::{AtomicBool, Ordering};
use talentlens_core::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Background & surface colors
    pub bg: Color,
    pub surface: Color,
    pub elevated: Color,

    pub primary: Color,
    pub accent: Color,

    pub text: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    pub border_dim: Color,
    pub border_focus: Color,
}

pub const DARK: Palette = Palette {
    bg: Color::Rgb(18, 18, 24),          // #121218
    surface: Color::Rgb(24, 24, 32),     // #181820
    elevated: Color::Rgb(32, 32, 42),    // #20202A
    primary: Color::Rgb(255, 179, 71),   // #FFB347 amber
    accent: Color::Rgb(103, 224, 227),   // #67E0E3 cyan
    text: Color::Rgb(230, 230, 235),     // #E6E6EB
    text_secondary: Color::Rgb(160, 160, 170),
    text_muted: Color::Rgb(100, 100, 110),
    success: Color::Rgb(118, 218, 133),  // #76DA85
    warning: Color::Rgb(255, 193, 94),   // #FFC15E
    error: Color::Rgb(255, 108, 108),    // #FF6C6C
    info: Color::Rgb(130, 170, 255),     // #82AAFF
    border_dim: Color::Rgb(48, 48, 58),
    border_focus: Color::Rgb(255, 179, 71),
};

pub const LIGHT: Palette = Palette {
    bg: Color::Rgb(250, 249, 246),       // #FAF9F6
    surface: Color::Rgb(242, 240, 235),  // #F2F0EB
    elevated: Color::Rgb(228, 225, 218), // #E4E1DA
    primary: Color::Rgb(176, 98, 0),     // #B06200 burnt amber
    accent: Color::Rgb(0, 122, 128),     // #007A80 teal
    text: Color::Rgb(28, 28, 36),
    text_secondary: Color::Rgb(80, 80, 92),
    text_muted: Color::Rgb(130, 130, 140),
    success: Color::Rgb(22, 128, 52),    // #168034
    warning: Color::Rgb(168, 104, 0),
    error: Color::Rgb(190, 30, 45),      // #BE1E2D
    info: Color::Rgb(37, 99, 235),       // #2563EB
    border_dim: Color::Rgb(200, 196, 188),
    border_focus: Color::Rgb(176, 98, 0),
};

static LIGHT_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Switch the active palette. Registered as the session's theme observer.
pub fn apply(theme: Theme) {
    LIGHT_ACTIVE.store(theme == Theme::Light, Ordering::Relaxed);
}

pub fn palette() -> &'static Palette {
    if LIGHT_ACTIVE.load(Ordering::Relaxed) {
        &LIGHT
    } else {
        &DARK
    }
}

/// Badge colour for the result at `rank` (0-based): the first three stand out.
pub fn rank_color(rank: usize) -> Color {
    let p = palette();
    if rank < 3 {
        p.success
    } else {
        p.info
    }
}
