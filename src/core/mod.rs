pub mod candle;
pub mod indicator;
pub mod layout;
pub mod primitives;
pub mod scale;
pub mod series_store;
pub mod ticks;
pub mod types;

pub use candle::{Candle, CandleGeometry, project_candles};
pub use indicator::{IndicatorClassifier, IndicatorPane, IndicatorSeries};
pub use layout::{ChartInsets, PaneLayout, PaneRect, SubchartLimits};
pub use scale::{SlotAnchor, TimeSlots, ValueRange, price_range};
pub use series_store::{IndicatorMap, SeriesStore};
pub use ticks::{
    TimeLabelZone, TimeTick, ValueTick, format_time_label, format_value_label, time_ticks,
    value_ticks,
};
pub use types::Viewport;
