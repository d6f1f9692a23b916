use approx::assert_relative_eq;
use candle_canvas::api::{ChartEngine, ChartEngineConfig, InteractionMode};
use candle_canvas::core::{Candle, IndicatorMap, IndicatorSeries, TimeLabelZone, Viewport};
use candle_canvas::render::{CanvasLayerKind, LineStrokeStyle, NullRenderer, RenderFrame};

fn two_candles() -> Vec<Candle> {
    vec![
        Candle::new(0, 10.0, 12.0, 9.0, 11.0, 100.0),
        Candle::new(60_000, 11.0, 13.0, 10.0, 12.0, 150.0),
    ]
}

fn build_engine(width: u32, height: u32) -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(width, height))
        .with_time_zone(TimeLabelZone::FixedOffsetSeconds(0));
    ChartEngine::new(NullRenderer::default(), config).expect("engine init")
}

fn indicators(series: impl IntoIterator<Item = IndicatorSeries>) -> IndicatorMap {
    series
        .into_iter()
        .map(|series| (series.name.clone(), series))
        .collect()
}

fn layer_lines(frame: &RenderFrame, kind: CanvasLayerKind) -> usize {
    frame.layer(kind).map_or(0, |layer| layer.lines.len())
}

#[test]
fn empty_candles_render_cleared_surface_without_candles_or_axes() {
    let mut engine = build_engine(900, 600);
    engine.set_candles(Vec::new());
    engine.render().expect("render");

    let frame = engine
        .renderer()
        .last_frame
        .clone()
        .expect("frame recorded");
    let clear = frame.layer(CanvasLayerKind::Clear).expect("clear layer");
    assert_eq!(clear.rects.len(), 1);
    assert_relative_eq!(clear.rects[0].width, 900.0);
    assert_relative_eq!(clear.rects[0].height, 600.0);

    for kind in [
        CanvasLayerKind::Wicks,
        CanvasLayerKind::Candles,
        CanvasLayerKind::Overlays,
        CanvasLayerKind::Oscillators,
        CanvasLayerKind::PriceAxis,
        CanvasLayerKind::OscillatorAxis,
        CanvasLayerKind::Crosshair,
        CanvasLayerKind::Tooltip,
    ] {
        assert!(frame.layer(kind).expect("layer").is_empty(), "{kind:?}");
    }
}

#[test]
fn layers_follow_paint_order() {
    let engine = build_engine(900, 600);
    let frame = engine.build_render_frame();
    let kinds: Vec<CanvasLayerKind> = frame.layers.iter().map(|layer| layer.kind).collect();
    assert_eq!(kinds, CanvasLayerKind::PAINT_ORDER);
}

#[test]
fn candle_geometry_matches_price_pane_mapping() {
    // 1040px tall: price pane spans [20, 860] with the default divider.
    let mut engine = build_engine(900, 1040);
    engine.set_candles(two_candles());

    let layout = engine.pane_layout();
    assert_relative_eq!(layout.price_top, 20.0);
    assert_relative_eq!(layout.price_bottom, 860.0);

    let frame = engine.build_render_frame();
    let wicks = frame.layer(CanvasLayerKind::Wicks).expect("wicks layer");
    let candles = frame.layer(CanvasLayerKind::Candles).expect("candles layer");
    assert_eq!(wicks.lines.len(), 2);
    assert!(candles.lines.is_empty());
    assert_eq!(candles.rects.len(), 2);

    let wick = wicks.lines[0];
    assert_relative_eq!(wick.y1, 230.0);
    assert_relative_eq!(wick.y2, 860.0);

    // slot = 820 / 2; the wick runs through the body's center.
    let body = candles.rects[0];
    assert_relative_eq!(body.x, 60.0);
    assert_relative_eq!(body.width, 410.0);
    assert_relative_eq!(wick.x1, 265.0);
    assert_relative_eq!(body.y, 20.0 + 840.0 - (2.0 / 4.0) * 840.0);
    assert_relative_eq!(body.height, 210.0);
}

#[test]
fn bullish_and_bearish_bodies_use_distinct_colors() {
    let mut engine = build_engine(900, 600);
    engine.set_candles(vec![
        Candle::new(0, 10.0, 12.0, 9.0, 11.0, 1.0),
        Candle::new(60_000, 11.0, 12.0, 9.0, 10.0, 1.0),
        Candle::new(120_000, 10.0, 11.0, 9.0, 10.0, 1.0),
    ]);
    let style = engine.render_style().clone();
    let frame = engine.build_render_frame();
    let rects = &frame.layer(CanvasLayerKind::Candles).expect("layer").rects;

    assert_eq!(rects[0].fill_color, style.bullish_color);
    assert_eq!(rects[1].fill_color, style.bearish_color);
    // close == open counts as bullish
    assert_eq!(rects[2].fill_color, style.bullish_color);
}

#[test]
fn overlays_and_oscillators_land_in_their_clipped_panes() {
    let mut engine = build_engine(900, 600);
    engine.load_data(
        two_candles(),
        indicators([
            IndicatorSeries::new("SMA20", vec![10.5, 11.5], vec![0, 60_000]),
            IndicatorSeries::new("RSI", vec![70.0, 30.0], vec![0, 60_000]),
        ]),
    );

    let layout = engine.pane_layout();
    let frame = engine.build_render_frame();
    let overlays = frame.layer(CanvasLayerKind::Overlays).expect("overlays");
    let oscillators = frame.layer(CanvasLayerKind::Oscillators).expect("oscillators");

    assert_eq!(overlays.lines.len(), 1);
    assert_eq!(oscillators.lines.len(), 1);

    let overlay_clip = overlays.clip.expect("overlay clip");
    assert_relative_eq!(overlay_clip.y, layout.price_top);
    assert_relative_eq!(overlay_clip.y + overlay_clip.height, layout.price_bottom);
    let osc_clip = oscillators.clip.expect("oscillator clip");
    assert_relative_eq!(osc_clip.y, layout.osc_top);
    assert_relative_eq!(osc_clip.y + osc_clip.height, layout.osc_bottom);

    for (clip, lines) in [(overlay_clip, &overlays.lines), (osc_clip, &oscillators.lines)] {
        assert!(lines
            .iter()
            .all(|line| clip.contains(line.x1, line.y1) && clip.contains(line.x2, line.y2)));
    }

    // RSI 70 on the default [0, 100] band.
    let rsi = oscillators.lines[0];
    let osc_height = layout.osc_bottom - layout.osc_top;
    assert_relative_eq!(rsi.y1, layout.osc_top + osc_height - 0.7 * osc_height);
    assert_relative_eq!(rsi.x1, 60.0 + 205.0);
}

#[test]
fn oscillator_range_widens_beyond_default_band() {
    let mut engine = build_engine(900, 600);
    engine.load_data(
        two_candles(),
        indicators([IndicatorSeries::new("MACD", vec![-50.0, 150.0], vec![0, 60_000])]),
    );
    let layout = engine.pane_layout();
    let frame = engine.build_render_frame();
    let line = frame.layer(CanvasLayerKind::Oscillators).expect("layer").lines[0];
    assert_relative_eq!(line.y1, layout.osc_bottom);
    assert_relative_eq!(line.y2, layout.osc_top);

    let axis = frame.layer(CanvasLayerKind::OscillatorAxis).expect("axis");
    let labels: Vec<&str> = axis.texts.iter().map(|text| text.text.as_str()).collect();
    assert_eq!(labels, ["150.00", "100.00", "50.00", "0.00", "-50.00"]);
}

#[test]
fn disabled_indicator_is_not_drawn_but_still_listed() {
    let mut engine = build_engine(900, 600);
    engine.load_data(
        two_candles(),
        indicators([
            IndicatorSeries::new("SMA20", vec![10.5, 11.5], vec![0, 60_000]),
            IndicatorSeries::new("RSI", vec![70.0, 30.0], vec![0, 60_000]),
        ]),
    );
    engine.set_indicator_enabled("SMA20", false);
    engine.set_indicator_enabled("RSI", false);

    let frame = engine.build_render_frame();
    assert_eq!(layer_lines(&frame, CanvasLayerKind::Overlays), 0);
    assert_eq!(layer_lines(&frame, CanvasLayerKind::Oscillators), 0);
    assert_eq!(engine.indicator_names(), ["SMA20", "RSI"]);

    engine.set_indicator_enabled("SMA20", true);
    let frame = engine.build_render_frame();
    assert_eq!(layer_lines(&frame, CanvasLayerKind::Overlays), 1);
}

#[test]
fn single_point_series_and_short_series_are_handled() {
    let mut engine = build_engine(900, 600);
    let candles: Vec<Candle> = (0..5)
        .map(|i| Candle::new(i * 60_000, 10.0, 12.0, 9.0, 11.0, 1.0))
        .collect();
    engine.load_data(
        candles,
        indicators([
            IndicatorSeries::new("SMA1", vec![10.0], vec![0]),
            IndicatorSeries::new("SMA3", vec![10.0, 10.5, 11.0], vec![0, 60_000, 120_000]),
        ]),
    );

    let frame = engine.build_render_frame();
    assert_eq!(layer_lines(&frame, CanvasLayerKind::Overlays), 2);
}

#[test]
fn time_labels_only_under_price_pane() {
    let mut engine = build_engine(900, 600);
    let candles: Vec<Candle> = (0..5)
        .map(|i| Candle::new(i * 60_000, 10.0, 12.0, 9.0, 11.0, 1.0))
        .collect();
    engine.set_candles(candles);

    let frame = engine.build_render_frame();
    let price_axis = frame.layer(CanvasLayerKind::PriceAxis).expect("price axis");
    let osc_axis = frame.layer(CanvasLayerKind::OscillatorAxis).expect("osc axis");

    let time_labels: Vec<&str> = price_axis
        .texts
        .iter()
        .map(|text| text.text.as_str())
        .filter(|text| text.contains(':'))
        .collect();
    assert_eq!(
        time_labels,
        [
            "1970-01-01 00:00",
            "1970-01-01 00:01",
            "1970-01-01 00:02",
            "1970-01-01 00:03",
            "1970-01-01 00:04",
        ]
    );
    assert_eq!(price_axis.texts.len(), 10);
    assert_eq!(osc_axis.texts.len(), 5);
    assert!(osc_axis.texts.iter().all(|text| !text.text.contains(':')));
}

#[test]
fn separator_is_a_thick_line_between_panes() {
    let engine = build_engine(900, 600);
    let layout = engine.pane_layout();
    let frame = engine.build_render_frame();
    let separator = frame.layer(CanvasLayerKind::Separator).expect("separator");

    assert_eq!(separator.lines.len(), 1);
    let line = separator.lines[0];
    assert_relative_eq!(line.y1, layout.separator_y);
    assert_relative_eq!(line.stroke_width, 6.0);
    assert!(layout.price_bottom < line.y1 && line.y1 < layout.osc_top);
}

#[test]
fn hover_draws_dashed_crosshair_and_tooltip() {
    let mut engine = build_engine(900, 1040);
    engine.load_data(
        two_candles(),
        indicators([IndicatorSeries::new("SMA20", vec![10.5, 11.5], vec![0, 60_000])]),
    );
    engine.pointer_move(500.0, 300.0);
    assert_eq!(engine.hover_index(), Some(1));

    let frame = engine.build_render_frame();
    let crosshair = frame.layer(CanvasLayerKind::Crosshair).expect("crosshair");
    assert_eq!(crosshair.lines.len(), 2);
    assert!(crosshair
        .lines
        .iter()
        .all(|line| matches!(line.stroke_style, LineStrokeStyle::Dashed { .. })));

    let vertical = crosshair.lines[0];
    assert_relative_eq!(vertical.x1, 60.0 + 410.0 + 205.0);
    let horizontal = crosshair.lines[1];
    // close 12 on [9, 13] within [20, 860]
    assert_relative_eq!(horizontal.y1, 20.0 + 840.0 - 0.75 * 840.0);

    assert!(crosshair.rects.is_empty());
    let tooltip_layer = frame.layer(CanvasLayerKind::Tooltip).expect("tooltip");
    assert_eq!(tooltip_layer.rects.len(), 1);
    let tooltip = tooltip_layer.rects[0];
    assert_relative_eq!(tooltip.x, 510.0);
    assert_relative_eq!(tooltip.y, 310.0);
    let texts: Vec<&str> = tooltip_layer.texts.iter().map(|text| text.text.as_str()).collect();
    assert_eq!(
        texts,
        [
            "Time: 1970-01-01 00:01",
            "O: 11.00  H: 13.00  L: 10.00  C: 12.00",
            "V: 150.00",
            "SMA20: 11.5000",
        ]
    );
}

#[test]
fn tooltip_flips_near_surface_edges() {
    let mut engine = build_engine(900, 600);
    engine.set_candles(two_candles());
    engine.pointer_move(870.0, 550.0);

    let frame = engine.build_render_frame();
    let tooltip = frame.layer(CanvasLayerKind::Tooltip).expect("layer").rects[0];
    assert!(tooltip.x + tooltip.width <= 900.0);
    assert!(tooltip.y + tooltip.height <= 600.0);
}

#[test]
fn reload_with_fewer_candles_clears_hover() {
    let mut engine = build_engine(900, 600);
    let candles: Vec<Candle> = (0..10)
        .map(|i| Candle::new(i * 60_000, 10.0, 12.0, 9.0, 11.0, 1.0))
        .collect();
    engine.set_candles(candles);
    engine.pointer_move(870.0, 100.0);
    assert_eq!(engine.hover_index(), Some(9));

    engine.set_candles(two_candles());
    assert_eq!(engine.hover_index(), None);
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert!(engine.has_pending_render());

    let frame = engine.build_render_frame();
    assert!(frame.layer(CanvasLayerKind::Crosshair).expect("layer").is_empty());
    assert!(frame.layer(CanvasLayerKind::Tooltip).expect("layer").is_empty());
}

#[test]
fn reload_with_more_candles_keeps_hover() {
    let mut engine = build_engine(900, 600);
    engine.set_candles(two_candles());
    engine.pointer_move(100.0, 100.0);
    assert_eq!(engine.hover_index(), Some(0));

    let candles: Vec<Candle> = (0..10)
        .map(|i| Candle::new(i * 60_000, 10.0, 12.0, 9.0, 11.0, 1.0))
        .collect();
    engine.set_candles(candles);
    assert_eq!(engine.hover_index(), Some(0));
}

#[test]
fn tooltip_is_painted_over_crosshair_and_bodies_over_wicks() {
    let mut engine = build_engine(900, 1040);
    engine.set_candles(two_candles());
    engine.pointer_move(500.0, 200.0);

    let frame = engine.build_render_frame();
    let position = |kind: CanvasLayerKind| {
        frame
            .layers
            .iter()
            .position(|layer| layer.kind == kind)
            .expect("layer present")
    };
    assert!(position(CanvasLayerKind::Crosshair) < position(CanvasLayerKind::Tooltip));
    assert!(position(CanvasLayerKind::Wicks) < position(CanvasLayerKind::Candles));

    // The horizontal crosshair at close 12 (y = 230) crosses the tooltip box.
    let horizontal = frame.layer(CanvasLayerKind::Crosshair).expect("crosshair").lines[1];
    let tooltip = frame.layer(CanvasLayerKind::Tooltip).expect("tooltip");
    let tooltip_box = tooltip.rects[0];
    assert_relative_eq!(horizontal.y1, 230.0);
    assert!(tooltip_box.y < horizontal.y1 && horizontal.y1 < tooltip_box.y + tooltip_box.height);
    assert!(tooltip.lines.is_empty());

    let bodies = frame.layer(CanvasLayerKind::Candles).expect("candles");
    assert!(bodies.lines.is_empty());
}

#[test]
fn flat_prices_render_mid_pane_without_error() {
    let mut engine = build_engine(900, 600);
    engine.set_candles(vec![
        Candle::new(0, 10.0, 10.0, 10.0, 10.0, 1.0),
        Candle::new(60_000, 10.0, 10.0, 10.0, 10.0, 1.0),
    ]);
    engine.render().expect("render");

    let layout = engine.pane_layout();
    let frame = engine.build_render_frame();
    let wick = frame.layer(CanvasLayerKind::Wicks).expect("layer").lines[0];
    assert_relative_eq!(wick.y1, (layout.price_top + layout.price_bottom) / 2.0);
}

#[test]
fn non_finite_candles_are_skipped_instead_of_failing_render() {
    let mut engine = build_engine(900, 600);
    engine.set_candles(vec![
        Candle::new(0, 10.0, 12.0, 9.0, 11.0, 1.0),
        Candle::new(60_000, f64::NAN, 12.0, 9.0, 11.0, 1.0),
    ]);
    engine.render().expect("render");

    let frame = engine.build_render_frame();
    assert_eq!(frame.layer(CanvasLayerKind::Candles).expect("layer").rects.len(), 1);
    assert_eq!(frame.layer(CanvasLayerKind::Wicks).expect("layer").lines.len(), 1);
}

#[test]
fn extreme_finite_values_still_render() {
    let mut engine = build_engine(900, 1040);
    engine.load_data(
        vec![
            Candle::new(0, 0.0, 1e308, -1e308, 0.0, 1.0),
            Candle::new(60_000, 0.0, 1e308, -1e308, 0.0, 1.0),
        ],
        indicators([IndicatorSeries::new("SMA", vec![1e308, 1e308], vec![0, 60_000])]),
    );
    engine.render().expect("render");

    let layout = engine.pane_layout();
    let frame = engine.build_render_frame();
    let overlay = frame.layer(CanvasLayerKind::Overlays).expect("overlays");
    assert_eq!(overlay.lines.len(), 1);
    assert_relative_eq!(overlay.lines[0].y1, layout.price_top);
    assert_eq!(frame.layer(CanvasLayerKind::Candles).expect("layer").rects.len(), 2);
}

#[test]
fn tiny_surface_only_clears() {
    let mut engine = build_engine(50, 50);
    engine.set_candles(two_candles());
    engine.render().expect("render");

    let frame = engine.build_render_frame();
    assert!(frame.is_blank());
}
