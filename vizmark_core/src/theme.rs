// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-pass configuration.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Size;
use peniko::Color;
use peniko::color::palette::css;

/// The ten-color categorical palette used for series colors by default.
pub const CATEGORY10: [Color; 10] = [
    Color::from_rgb8(0x1f, 0x77, 0xb4),
    Color::from_rgb8(0xff, 0x7f, 0x0e),
    Color::from_rgb8(0x2c, 0xa0, 0x2c),
    Color::from_rgb8(0xd6, 0x27, 0x28),
    Color::from_rgb8(0x94, 0x67, 0xbd),
    Color::from_rgb8(0x8c, 0x56, 0x4b),
    Color::from_rgb8(0xe3, 0x77, 0xc2),
    Color::from_rgb8(0x7f, 0x7f, 0x7f),
    Color::from_rgb8(0xbc, 0xbd, 0x22),
    Color::from_rgb8(0x17, 0xbe, 0xcf),
];

/// Styling defaults injected into a render pass.
///
/// Marks never read global state for their defaults; anything that varies by
/// deployment (such as the series palette) lives here.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    palette: Vec<Color>,
}

impl Theme {
    /// Creates a theme with the given categorical palette.
    pub fn new(palette: impl IntoIterator<Item = Color>) -> Self {
        Self {
            palette: palette.into_iter().collect(),
        }
    }

    /// Replaces the categorical palette.
    pub fn with_palette(mut self, palette: impl IntoIterator<Item = Color>) -> Self {
        self.palette = palette.into_iter().collect();
        self
    }

    /// The categorical palette.
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Returns the categorical color for a series, cycling through the palette.
    ///
    /// An empty palette yields black.
    pub fn categorical(&self, series: usize) -> Color {
        if self.palette.is_empty() {
            return css::BLACK;
        }
        self.palette[series % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(CATEGORY10)
    }
}

/// Inputs shared by every instance of one render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderContext {
    /// Theme used for defaults.
    pub theme: Theme,
    /// Size of the parent panel; implied geometry is computed against it.
    pub size: Size,
    /// Index of the parent instance, which identifies the series.
    pub series: usize,
}

impl RenderContext {
    /// Creates a context for a parent panel of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            theme: Theme::default(),
            size,
            series: 0,
        }
    }

    /// Sets the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the series index.
    pub fn with_series(mut self, series: usize) -> Self {
        self.series = series;
        self
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn categorical_cycles_through_palette() {
        let theme = Theme::new([css::RED, css::BLUE]);
        assert_eq!(theme.categorical(0), css::RED);
        assert_eq!(theme.categorical(1), css::BLUE);
        assert_eq!(theme.categorical(2), css::RED);
    }

    #[test]
    fn empty_palette_falls_back_to_black() {
        let theme = Theme::default().with_palette([]);
        assert_eq!(theme.categorical(3), css::BLACK);
    }
}
