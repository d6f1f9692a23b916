use candle_canvas::api::{ChartEngine, ChartEngineConfig};
use candle_canvas::core::{
    Candle, IndicatorMap, IndicatorSeries, PaneRect, TimeSlots, ValueRange, Viewport,
    project_candles,
};
use candle_canvas::render::NullRenderer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let base = 100.0 + i as f64 * 0.05;
            let open = base;
            let close = if i % 2 == 0 { base + 1.0 } else { base - 1.0 };
            let low = open.min(close) - 0.75;
            let high = open.max(close) + 0.75;
            Candle::new(i as i64 * 60_000, open, high, low, close, 1_000.0)
        })
        .collect()
}

fn generated_indicators(candles: &[Candle]) -> IndicatorMap {
    let timestamps: Vec<i64> = candles.iter().map(|candle| candle.timestamp).collect();
    let sma: Vec<f64> = candles.iter().map(|candle| candle.close - 0.5).collect();
    let rsi: Vec<f64> = (0..candles.len())
        .map(|i| 50.0 + 30.0 * (i as f64 / 25.0).sin())
        .collect();

    let mut map = IndicatorMap::new();
    map.insert(
        "SMA20".to_owned(),
        IndicatorSeries::new("SMA20", sma, timestamps.clone()),
    );
    map.insert("RSI14".to_owned(), IndicatorSeries::new("RSI14", rsi, timestamps));
    map
}

fn bench_candle_projection_10k(c: &mut Criterion) {
    let candles = generated_candles(10_000);
    let slots = TimeSlots::new(60.0, 1_840.0, candles.len());
    let pane = PaneRect::new(60.0, 1_900.0, 20.0, 880.0);
    let range = ValueRange::new(90.0, 700.0);

    c.bench_function("candle_projection_10k", |b| {
        b.iter(|| {
            let _ = project_candles(
                black_box(&candles),
                black_box(slots),
                black_box(pane),
                black_box(range),
            );
        })
    });
}

fn bench_frame_build_10k(c: &mut Criterion) {
    let config = ChartEngineConfig::new(Viewport::new(1920, 1080));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let candles = generated_candles(10_000);
    let indicators = generated_indicators(&candles);
    engine.load_data(candles, indicators);
    engine.pointer_move(900.0, 300.0);

    c.bench_function("frame_build_10k", |b| {
        b.iter(|| {
            let _ = black_box(engine.build_render_frame());
        })
    });
}

criterion_group!(benches, bench_candle_projection_10k, bench_frame_build_10k);
criterion_main!(benches);
