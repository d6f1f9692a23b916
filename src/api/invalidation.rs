use serde::{Deserialize, Serialize};
use tracing::trace;

/// Reason a redraw was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationTopic {
    Candles,
    Indicators,
    Visibility,
    Cursor,
    Divider,
    Layout,
    Style,
}

impl InvalidationTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::Candles => 1 << 0,
            Self::Indicators => 1 << 1,
            Self::Visibility => 1 << 2,
            Self::Cursor => 1 << 3,
            Self::Divider => 1 << 4,
            Self::Layout => 1 << 5,
            Self::Style => 1 << 6,
        }
    }
}

/// Pending redraw requests, coalesced until the next render.
///
/// Every request is counted even when it coalesces into an already pending
/// one, so hosts can observe that a mutation asked for a redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderRequests {
    pending_topics: u8,
    total_requests: u64,
}

impl RenderRequests {
    pub fn request(&mut self, topic: InvalidationTopic) {
        self.pending_topics |= topic.bit();
        self.total_requests = self.total_requests.saturating_add(1);
        trace!(?topic, total = self.total_requests, "render requested");
    }

    #[must_use]
    pub fn is_pending(self) -> bool {
        self.pending_topics != 0
    }

    #[must_use]
    pub fn has_topic(self, topic: InvalidationTopic) -> bool {
        self.pending_topics & topic.bit() != 0
    }

    #[must_use]
    pub fn total_requests(self) -> u64 {
        self.total_requests
    }

    pub fn clear(&mut self) {
        self.pending_topics = 0;
    }
}
