use crate::render::Color;

/// Style contract for rendered frames.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub background_color: Color,
    pub bullish_color: Color,
    pub bearish_color: Color,
    pub wick_color: Color,
    pub wick_width_px: f64,
    /// Overlay line colors, assigned by position in the indicator map.
    pub overlay_palette: Vec<Color>,
    /// Oscillator line colors, assigned by position in the indicator map.
    pub oscillator_palette: Vec<Color>,
    pub indicator_line_width_px: f64,
    pub grid_line_color: Color,
    pub axis_line_color: Color,
    pub label_color: Color,
    pub label_font_size_px: f64,
    pub separator_color: Color,
    pub crosshair_color: Color,
    pub crosshair_dash_px: f64,
    pub tooltip_background_color: Color,
    pub tooltip_border_color: Color,
    pub tooltip_text_color: Color,
    pub tooltip_font_size_px: f64,
    pub tooltip_line_height_px: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: Color::WHITE,
            bullish_color: Color::rgb8(50, 205, 50),
            bearish_color: Color::rgb8(255, 0, 0),
            wick_color: Color::BLACK,
            wick_width_px: 1.0,
            overlay_palette: vec![
                Color::rgb8(0, 0, 255),
                Color::rgb8(255, 140, 0),
                Color::rgb8(0, 128, 128),
                Color::rgb8(139, 69, 19),
            ],
            oscillator_palette: vec![Color::rgb8(128, 0, 128), Color::rgb8(220, 20, 60)],
            indicator_line_width_px: 1.0,
            grid_line_color: Color::rgb8(211, 211, 211),
            axis_line_color: Color::BLACK,
            label_color: Color::BLACK,
            label_font_size_px: 12.0,
            separator_color: Color::rgb8(169, 169, 169),
            crosshair_color: Color::rgb8(211, 211, 211),
            crosshair_dash_px: 4.0,
            tooltip_background_color: Color::rgba(1.0, 1.0, 1.0, 0.95),
            tooltip_border_color: Color::BLACK,
            tooltip_text_color: Color::BLACK,
            tooltip_font_size_px: 12.0,
            tooltip_line_height_px: 18.0,
        }
    }
}

impl RenderStyle {
    #[must_use]
    pub fn overlay_color(&self, position: usize) -> Color {
        palette_color(&self.overlay_palette, position, Color::rgb8(0, 0, 255))
    }

    #[must_use]
    pub fn oscillator_color(&self, position: usize) -> Color {
        palette_color(&self.oscillator_palette, position, Color::rgb8(128, 0, 128))
    }
}

fn palette_color(palette: &[Color], position: usize, fallback: Color) -> Color {
    if palette.is_empty() {
        return fallback;
    }
    palette[position % palette.len()]
}
