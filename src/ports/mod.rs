//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by UI/adapter into the application
//! - Outbound: Called by application into infrastructure
//! - Progress: Use cases report pipeline stages to whichever UI is attached

pub mod inbound;
pub mod outbound;
pub mod progress;

pub use inbound::InputPort;
pub use outbound::{
    ArticleExtractorPort, LlmPort, MarketDataPort, NewsSourcePort, ReportPort,
    SentimentClassifierPort,
};
pub use progress::{NoopProgress, ProgressPort};
