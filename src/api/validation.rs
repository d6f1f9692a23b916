use crate::error::{ChartError, ChartResult};

use super::RenderStyle;

pub(super) fn validate_render_style(style: &RenderStyle) -> ChartResult<()> {
    for color in [
        style.background_color,
        style.bullish_color,
        style.bearish_color,
        style.wick_color,
        style.grid_line_color,
        style.axis_line_color,
        style.label_color,
        style.separator_color,
        style.crosshair_color,
        style.tooltip_background_color,
        style.tooltip_border_color,
        style.tooltip_text_color,
    ]
    .into_iter()
    .chain(style.overlay_palette.iter().copied())
    .chain(style.oscillator_palette.iter().copied())
    {
        color.validate()?;
    }

    for (name, value) in [
        ("wick_width_px", style.wick_width_px),
        ("indicator_line_width_px", style.indicator_line_width_px),
        ("label_font_size_px", style.label_font_size_px),
        ("crosshair_dash_px", style.crosshair_dash_px),
        ("tooltip_font_size_px", style.tooltip_font_size_px),
        ("tooltip_line_height_px", style.tooltip_line_height_px),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "render style `{name}` must be finite and > 0"
            )));
        }
    }

    Ok(())
}
