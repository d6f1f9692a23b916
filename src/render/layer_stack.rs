use serde::{Deserialize, Serialize};

/// Draw layers of one frame, listed in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Clear,
    /// Wicks sit under the candle bodies.
    Wicks,
    Candles,
    Overlays,
    Oscillators,
    PriceAxis,
    OscillatorAxis,
    Separator,
    Crosshair,
    /// Hover tooltip, painted over the crosshair lines.
    Tooltip,
}

impl CanvasLayerKind {
    /// Fixed back-to-front order every frame is built in.
    pub const PAINT_ORDER: [Self; 10] = [
        Self::Clear,
        Self::Wicks,
        Self::Candles,
        Self::Overlays,
        Self::Oscillators,
        Self::PriceAxis,
        Self::OscillatorAxis,
        Self::Separator,
        Self::Crosshair,
        Self::Tooltip,
    ];
}
