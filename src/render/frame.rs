use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{CanvasLayerKind, ClipRect, LinePrimitive, RectPrimitive, TextPrimitive};

/// Primitives of one paint layer, optionally clipped to a pane.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayer {
    pub kind: CanvasLayerKind,
    pub clip: Option<ClipRect>,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl FrameLayer {
    #[must_use]
    pub fn new(kind: CanvasLayerKind) -> Self {
        Self {
            kind,
            clip: None,
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty() && self.texts.is_empty()
    }

    /// Paint order inside a layer is rects, then lines, then texts.
    pub fn validate(&self) -> ChartResult<()> {
        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Layers appear in `CanvasLayerKind::PAINT_ORDER`; empty layers are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub layers: Vec<FrameLayer>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layers: CanvasLayerKind::PAINT_ORDER
                .into_iter()
                .map(FrameLayer::new)
                .collect(),
        }
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> Option<&FrameLayer> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    pub fn layer_mut(&mut self, kind: CanvasLayerKind) -> Option<&mut FrameLayer> {
        self.layers.iter_mut().find(|layer| layer.kind == kind)
    }

    pub fn validate(&self) -> ChartResult<()> {
        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.lines.len()).sum()
    }

    #[must_use]
    pub fn rect_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.rects.len()).sum()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.texts.len()).sum()
    }

    /// `true` when nothing besides the `Clear` layer carries primitives.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.layers
            .iter()
            .filter(|layer| layer.kind != CanvasLayerKind::Clear)
            .all(FrameLayer::is_empty)
    }
}
